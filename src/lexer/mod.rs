//! # Hexagn Lexer
//!
//! Tokenizes Hexagn source into a stream of [`Token`]s (spec §4.1).
//!
//! ## Features
//!
//! - **Keywords & types**: `void`, `int8..64`, `uint8..64`, `float32|64`,
//!   `string`, `char`, `if`, `else`, `while`, `return`, `import`, `urcl`
//! - **Literals**: unsigned digit runs (`NUM`), double-quoted strings with
//!   `\n \t \\ \"` escapes, single-quoted characters with `\n \t \' \\`
//! - **Operators**: `+ - * / %`, comparisons `== != > >= < <=`
//! - **Structure**: `= ; , ( ) { } . :`
//!
//! `//` comments and tab characters are stripped by [`crate::source::SourceBuffer`]
//! before the stripped text ever reaches this module, so the lexer itself has
//! no comment-skipping logic.

pub mod cursor;
pub mod token;


use crate::error::{ErrorKind, HResult, HexagnError, Span};
use cursor::Cursor;
use token::{Token, TokenKind};

/// Tokenize an entire (already comment/tab-stripped) source string.
///
/// Stops and returns the first lex error it hits, per spec §7's "no recovery,
/// no second error per run" — unlike the teacher's `tokenize`, which collects
/// every lexer error into a `Vec` before the caller looks at them.
#[must_use]
pub fn tokenize(source: &str) -> HResult<Vec<Token>> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lex_token(&mut cursor)? {
        tokens.push(token);
    }

    let (line, offset) = cursor.current_pos();
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        span: Span::new(line, offset, offset),
    });

    Ok(tokens)
}

fn lex_token(cursor: &mut Cursor) -> HResult<Option<Token>> {
    while matches!(cursor.peek(), Some(' ' | '\t' | '\n' | '\r')) {
        cursor.advance();
    }

    if cursor.is_at_end() {
        return Ok(None);
    }

    let (sl, so) = cursor.current_pos();
    let ch = cursor.peek().unwrap();

    let token = match ch {
        '"' => lex_string(cursor, sl, so)?,
        '\'' => lex_char(cursor, sl, so)?,
        c if c.is_ascii_digit() => lex_number(cursor, sl, so),
        c if c.is_ascii_alphabetic() || c == '_' => lex_word(cursor, sl, so),
        '=' => lex_one_or_two(cursor, sl, so, '=', TokenKind::Eq, TokenKind::Assign),
        '!' => lex_bang(cursor, sl, so)?,
        '>' => lex_one_or_two(cursor, sl, so, '=', TokenKind::Gte, TokenKind::Gt),
        '<' => lex_one_or_two(cursor, sl, so, '=', TokenKind::Lte, TokenKind::Lt),
        '(' => lex_single(cursor, sl, so, TokenKind::OpenParen),
        ')' => lex_single(cursor, sl, so, TokenKind::CloseParen),
        '{' => lex_single(cursor, sl, so, TokenKind::OpenBrace),
        '}' => lex_single(cursor, sl, so, TokenKind::CloseBrace),
        ',' => lex_single(cursor, sl, so, TokenKind::Comma),
        ';' => lex_single(cursor, sl, so, TokenKind::Semicolon),
        '.' => lex_single(cursor, sl, so, TokenKind::Dot),
        ':' => lex_single(cursor, sl, so, TokenKind::Colon),
        '+' => lex_single(cursor, sl, so, TokenKind::Plus),
        '-' => lex_single(cursor, sl, so, TokenKind::Minus),
        '*' => lex_single(cursor, sl, so, TokenKind::Mult),
        '/' => lex_single(cursor, sl, so, TokenKind::Div),
        '%' => lex_single(cursor, sl, so, TokenKind::Mod),
        _ => {
            cursor.advance();
            return Err(HexagnError::new(
                ErrorKind::UnexpectedCharacter,
                format!("Unexpected character: '{}'", ch),
                cursor.make_span(sl, so),
            ));
        }
    };

    Ok(Some(token))
}

fn lex_single(cursor: &mut Cursor, sl: usize, so: usize, kind: TokenKind) -> Token {
    let ch = cursor.advance().unwrap();
    Token {
        kind,
        text: ch.to_string(),
        span: cursor.make_span(sl, so),
    }
}

/// Lex `ch` optionally followed by `=`, producing `two` if present, else `one`.
/// Used for `== != >= <=` vs. their single-character counterparts.
fn lex_one_or_two(
    cursor: &mut Cursor,
    sl: usize,
    so: usize,
    second: char,
    two: TokenKind,
    one: TokenKind,
) -> Token {
    let first = cursor.advance().unwrap();
    if cursor.peek() == Some(second) {
        cursor.advance();
        Token {
            kind: two,
            text: format!("{first}{second}"),
            span: cursor.make_span(sl, so),
        }
    } else {
        Token {
            kind: one,
            text: first.to_string(),
            span: cursor.make_span(sl, so),
        }
    }
}

fn lex_bang(cursor: &mut Cursor, sl: usize, so: usize) -> HResult<Token> {
    cursor.advance();
    if cursor.peek() == Some('=') {
        cursor.advance();
        Ok(Token {
            kind: TokenKind::Neq,
            text: "!=".into(),
            span: cursor.make_span(sl, so),
        })
    } else {
        Err(HexagnError::new(
            ErrorKind::UnexpectedCharacter,
            "Unexpected character: '!'",
            cursor.make_span(sl, so),
        ))
    }
}

fn lex_number(cursor: &mut Cursor, sl: usize, so: usize) -> Token {
    let mut digits = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        digits.push(cursor.advance().unwrap());
    }
    Token {
        kind: TokenKind::Num,
        text: digits,
        span: cursor.make_span(sl, so),
    }
}

fn lex_word(cursor: &mut Cursor, sl: usize, so: usize) -> Token {
    let mut word = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
        word.push(cursor.advance().unwrap());
    }

    let kind = match word.as_str() {
        "void" => TokenKind::Void,
        "int8" | "int16" | "int32" | "int64" => TokenKind::Int,
        "uint8" | "uint16" | "uint32" | "uint64" => TokenKind::Uint,
        "float32" | "float64" => TokenKind::Float,
        "string" => TokenKind::StringType,
        "char" => TokenKind::CharacterType,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "return" => TokenKind::Return,
        "import" => TokenKind::Import,
        "urcl" => TokenKind::UrclBlock,
        _ => TokenKind::Identifier,
    };

    Token {
        kind,
        text: word,
        span: cursor.make_span(sl, so),
    }
}

fn lex_string(cursor: &mut Cursor, sl: usize, so: usize) -> HResult<Token> {
    cursor.advance(); // opening quote
    let mut processed = String::new();

    loop {
        match cursor.peek() {
            None | Some('\n') | Some('\r') => {
                return Err(HexagnError::new(
                    ErrorKind::UnterminatedString,
                    "Unterminated string literal",
                    cursor.make_span(sl, so),
                ));
            }
            Some('"') => {
                cursor.advance();
                break;
            }
            Some('\\') => {
                cursor.advance();
                let esc = cursor.peek().ok_or_else(|| {
                    HexagnError::new(
                        ErrorKind::UnterminatedString,
                        "Unterminated string literal",
                        cursor.make_span(sl, so),
                    )
                })?;
                match escape_for_string(esc) {
                    Some(resolved) => {
                        processed.push(resolved);
                        cursor.advance();
                    }
                    None => {
                        return Err(HexagnError::new(
                            ErrorKind::InvalidEscapeSequence,
                            format!("Invalid escape sequence: \\{}", esc),
                            cursor.make_span(sl, so),
                        ));
                    }
                }
            }
            Some(c) => {
                processed.push(c);
                cursor.advance();
            }
        }
    }

    Ok(Token {
        kind: TokenKind::Str,
        text: processed,
        span: cursor.make_span(sl, so),
    })
}

fn lex_char(cursor: &mut Cursor, sl: usize, so: usize) -> HResult<Token> {
    cursor.advance(); // opening quote
    let ch = if cursor.peek() == Some('\\') {
        cursor.advance();
        let esc = cursor.peek().ok_or_else(|| {
            HexagnError::new(
                ErrorKind::UnterminatedString,
                "Unterminated character literal",
                cursor.make_span(sl, so),
            )
        })?;
        let resolved = escape_for_char(esc).ok_or_else(|| {
            HexagnError::new(
                ErrorKind::InvalidEscapeSequence,
                format!("Invalid escape sequence: \\{}", esc),
                cursor.make_span(sl, so),
            )
        })?;
        cursor.advance();
        resolved
    } else {
        cursor.advance().ok_or_else(|| {
            HexagnError::new(
                ErrorKind::UnterminatedString,
                "Unterminated character literal",
                cursor.make_span(sl, so),
            )
        })?
    };

    if cursor.peek() != Some('\'') {
        return Err(HexagnError::new(
            ErrorKind::UnterminatedString,
            "Expected closing ' for character literal",
            cursor.make_span(sl, so),
        ));
    }
    cursor.advance();

    // `char` is a single byte (spec §3's `CharLit(u8, Span)`); a multi-byte
    // Unicode scalar has no single-byte representation, rather than one
    // that's silently truncated to its first UTF-8 byte.
    if !ch.is_ascii() {
        return Err(HexagnError::new(
            ErrorKind::UnexpectedCharacter,
            format!("Character literal '{ch}' is not representable in a single byte"),
            cursor.make_span(sl, so),
        ));
    }

    Ok(Token {
        kind: TokenKind::Char,
        text: ch.to_string(),
        span: cursor.make_span(sl, so),
    })
}

fn escape_for_string(esc: char) -> Option<char> {
    match esc {
        'n' => Some('\n'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        _ => None,
    }
}

fn escape_for_char(esc: char) -> Option<char> {
    match esc {
        'n' => Some('\n'),
        't' => Some('\t'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        _ => None,
    }
}
