//! # Token Types
//!
//! Defines every token kind the Hexagn lexer produces.
//!
//! Each token carries:
//! - `kind`: the token category
//! - `text`: the lexeme — for literals and type keywords this is the
//!   *processed* spelling (escapes resolved for `STR`/`CHAR`, the bare
//!   identifier for type keywords such as `"int32"`) rather than the raw
//!   source slice, so downstream consumers never re-parse it.
//! - `span`: location in source for error reporting

use crate::error::Span;

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

/// Token kinds for the Hexagn language (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // === Data-type tags ===
    Void,
    Int,  // int8 | int16 | int32 | int64 — width lives in `text`
    Uint, // uint8 | uint16 | uint32 | uint64
    Float, // float32 | float64
    StringType,
    CharacterType,

    // === Literals ===
    Num,  // digit run
    Flt,  // reserved: float literal grammar, see DESIGN.md
    Str,  // double-quoted string, escapes already resolved in `text`
    Char, // single-quoted character, escape already resolved in `text`

    Identifier,

    // === Punctuation & structure ===
    Assign,
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    OpenBrace,
    CloseBrace,
    Dot,
    Colon,

    // === Arithmetic operators ===
    Plus,
    Minus,
    Mult,
    Div,
    Mod,

    // === Comparisons ===
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,

    // === Keywords ===
    If,
    Else,
    While,
    Return,
    Import,
    UrclBlock,

    Eof,
}

impl TokenKind {
    /// Does this token start a `type` production (spec §4.2)?
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Void
                | TokenKind::Int
                | TokenKind::Uint
                | TokenKind::Float
                | TokenKind::StringType
                | TokenKind::CharacterType
        )
    }
}
