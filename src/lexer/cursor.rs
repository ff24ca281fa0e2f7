//! # Cursor
//!
//! Byte-by-byte navigation through Hexagn source with line/offset tracking.
//!
//! Hexagn source is ASCII for every construct the lexer recognizes (keywords,
//! punctuation, digit runs; string/char bodies may contain arbitrary bytes but
//! are never re-sliced by index), so the cursor walks a byte slice rather than
//! collecting into `Vec<char>` — the same tradeoff the teacher's cursor makes.

use crate::error::Span;

/// A cursor for iterating through source bytes, tracking line number and the
/// byte offset of the current line's start so spans can be computed as
/// "offset from most recent line start" per spec §4.1.
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.bytes.get(self.pos).map(|&b| b as char)
    }

    pub fn peek_at(&self, ahead: usize) -> Option<char> {
        self.bytes.get(self.pos + ahead).map(|&b| b as char)
    }

    /// Advance past the current byte, returning it. `\n` advances the line
    /// counter and resets the line-start marker used for span offsets.
    pub fn advance(&mut self) -> Option<char> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(b as char)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// `(line, offset-from-line-start)` of the current cursor position.
    pub fn current_pos(&self) -> (usize, usize) {
        (self.line, self.pos - self.line_start)
    }

    /// Build a span from a previously-captured `(line, offset)` start to the
    /// cursor's current position. Valid only while still on `start_line`,
    /// which holds for every token this lexer produces (unterminated
    /// multi-line strings are rejected before a span would need to cross
    /// lines).
    pub fn make_span(&self, start_line: usize, start_offset: usize) -> Span {
        Span::new(start_line, start_offset, self.pos - self.line_start)
    }
}
