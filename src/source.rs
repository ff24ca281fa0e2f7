//! # Source Buffer & Diagnostics
//!
//! Strips `//` line comments and expands tabs (spec §6), keeping the
//! stripped text around so spans computed during lexing/parsing/codegen can
//! be rendered back against it. The rendering shape — `"{line}: {source}"`
//! followed by a caret band — is the one the original Hexagn implementation
//! uses (`getSourceLine` + `drawArrows`); this crate folds both into one
//! value type instead of a pair of free functions over a process-wide global.

use crate::error::HexagnError;

pub struct SourceBuffer {
    /// Comment-and-tab-stripped source, split into lines for O(1) lookup.
    lines: Vec<String>,
}

impl SourceBuffer {
    pub fn new(raw: &str) -> Self {
        let lines = raw.lines().map(strip_comment_and_tabs).collect();
        Self { lines }
    }

    /// The stripped text, rejoined with `\n`, for feeding to the lexer.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn line(&self, number: usize) -> &str {
        self.lines.get(number.saturating_sub(1)).map(String::as_str).unwrap_or("")
    }

    /// Public accessor for the code generator's `-g` debug comments.
    pub fn source_line(&self, number: usize) -> &str {
        self.line(number)
    }

    /// Render a fatal diagnostic as `"<message>\n<line>: <source>\n<carets>"`.
    pub fn render(&self, err: &HexagnError) -> String {
        let line_text = self.line(err.span.line);
        let prefix = format!("{}: ", err.span.line);
        let start = err.span.start.min(line_text.len());
        let end = err.span.end.max(start).min(line_text.len());
        let width = (end - start).max(1);

        let mut carets = String::new();
        carets.push_str(&" ".repeat(prefix.len() + start));
        carets.push_str(&"^".repeat(width));

        format!("{}\n{}{}\n{}", err, prefix, line_text, carets)
    }
}

/// Strip a trailing `//` comment and expand tabs to two spaces, matching
/// the original implementation's `sourceParser.cpp` (`replace(tok, "\t", "
/// ")`) rather than deleting tabs outright, which would glue whatever
/// tokens they separated into one (`"\tint32\tx;"` would lex as a single
/// identifier instead of a type keyword and a name).
fn strip_comment_and_tabs(line: &str) -> String {
    let expanded = line.replace('\t', "  ");
    match expanded.find("//") {
        Some(idx) => expanded[..idx].to_string(),
        None => expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Span};

    #[test]
    fn strips_line_comments() {
        let buf = SourceBuffer::new("int32 x = 1; // comment\n");
        assert_eq!(buf.text(), "int32 x = 1; ");
    }

    #[test]
    fn expands_tabs_to_two_spaces() {
        let buf = SourceBuffer::new("\tint32\tx;");
        assert_eq!(buf.text(), "  int32  x;");
    }

    #[test]
    fn renders_caret_band() {
        let buf = SourceBuffer::new("int32 x = @;");
        let err = HexagnError::new(ErrorKind::UnexpectedCharacter, "Unexpected character: '@'", Span::new(1, 10, 11));
        let rendered = buf.render(&err);
        let mut lines = rendered.lines();
        assert_eq!(lines.next().unwrap(), "error: Unexpected character: '@'");
        assert_eq!(lines.next().unwrap(), "1: int32 x = @;");
        let carets = lines.next().unwrap();
        assert!(carets.ends_with('^'));
    }
}
