//! # Token Buffer
//!
//! A cursor over a finished token stream, handed from the lexer to the
//! parser. The parser never indexes `Vec<Token>` directly; it goes through
//! `current`/`next`/`advance`/`consume` so every lookahead and expectation
//! check is centralized in one place.

use crate::error::{ErrorKind, HResult, HexagnError};
use crate::lexer::token::{Token, TokenKind};

pub struct TokenBuffer {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// The token at the cursor. Always `Some` — the stream ends in `Eof`,
    /// which this never advances past.
    pub fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always has Eof"))
    }

    /// Lookahead one token past the cursor, clamped to the final `Eof`.
    pub fn next(&self) -> &Token {
        self.tokens
            .get(self.pos + 1)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always has Eof"))
    }

    /// Advance the cursor and return the token it was on.
    pub fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !matches!(tok.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        tok
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Advance past `kind`, or fail with `msg` anchored at the current token.
    pub fn consume(&mut self, kind: TokenKind, msg: &str) -> HResult<Token> {
        if self.current().kind == kind {
            Ok(self.advance())
        } else {
            Err(HexagnError::new(
                ErrorKind::UnexpectedToken,
                format!("{msg}, found '{}'", self.current().text),
                self.current().span,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            text: text.into(),
            span: Span::new(1, 0, 0),
        }
    }

    fn buffer() -> TokenBuffer {
        TokenBuffer::new(vec![
            tok(TokenKind::Int, "int32"),
            tok(TokenKind::Identifier, "x"),
            tok(TokenKind::Semicolon, ";"),
            tok(TokenKind::Eof, ""),
        ])
    }

    #[test]
    fn current_and_next() {
        let buf = buffer();
        assert_eq!(buf.current().kind, TokenKind::Int);
        assert_eq!(buf.next().kind, TokenKind::Identifier);
    }

    #[test]
    fn advance_walks_forward() {
        let mut buf = buffer();
        assert_eq!(buf.advance().kind, TokenKind::Int);
        assert_eq!(buf.advance().kind, TokenKind::Identifier);
        assert_eq!(buf.current().kind, TokenKind::Semicolon);
    }

    #[test]
    fn advance_stops_at_eof() {
        let mut buf = buffer();
        for _ in 0..10 {
            buf.advance();
        }
        assert!(buf.at_eof());
    }

    #[test]
    fn consume_matching_kind_advances() {
        let mut buf = buffer();
        let t = buf.consume(TokenKind::Int, "expected type").unwrap();
        assert_eq!(t.kind, TokenKind::Int);
        assert_eq!(buf.current().kind, TokenKind::Identifier);
    }

    #[test]
    fn consume_mismatch_is_fatal() {
        let mut buf = buffer();
        let err = buf.consume(TokenKind::Semicolon, "expected ';'").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }
}
