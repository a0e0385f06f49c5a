// Host-neutral text snapshot and position types.
//
// The editor host owns the live buffer; every request carries an immutable
// snapshot of it. All scanning and validation below this module works on
// these snapshots only, so the core pipeline never sees a host API type.

use serde::{Deserialize, Serialize};

/// A position in a document: 0-based line, 0-based byte column within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A span between two positions, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A span confined to a single line.
    pub fn on_line(line: u32, start_character: u32, end_character: u32) -> Self {
        Self {
            start: Position::new(line, start_character),
            end: Position::new(line, end_character),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }
}

/// An immutable snapshot of an open editor document.
///
/// Lines are split on `\n` exactly as the host reports the text; a trailing
/// `\r` from CRLF files stays on the line and is treated as whitespace by
/// the scanning rules.
#[derive(Debug, Clone)]
pub struct TextDocument {
    pub uri: String,
    pub language_id: String,
    pub version: i32,
    text: String,
    line_spans: Vec<std::ops::Range<usize>>,
}

impl TextDocument {
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        version: i32,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let mut line_spans = Vec::new();
        let mut start = 0usize;
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_spans.push(start..idx);
                start = idx + 1;
            }
        }
        line_spans.push(start..text.len());

        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            version,
            text,
            line_spans,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> u32 {
        self.line_spans.len() as u32
    }

    /// Text of a single line, without its terminator.
    pub fn line(&self, line: u32) -> Option<&str> {
        self.line_spans
            .get(line as usize)
            .map(|span| &self.text[span.clone()])
    }

    /// Text of a line up to the given position, clamped to the line end and
    /// to a character boundary.
    pub fn line_prefix(&self, position: Position) -> Option<&str> {
        let line = self.line(position.line)?;
        let mut cut = (position.character as usize).min(line.len());
        while cut > 0 && !line.is_char_boundary(cut) {
            cut -= 1;
        }
        Some(&line[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_access() {
        let doc = TextDocument::new("file:///a.erb", "erb", 1, "one\ntwo\nthree");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), Some("one"));
        assert_eq!(doc.line(1), Some("two"));
        assert_eq!(doc.line(2), Some("three"));
        assert_eq!(doc.line(3), None);
    }

    #[test]
    fn test_trailing_newline_yields_empty_final_line() {
        let doc = TextDocument::new("file:///a.erb", "erb", 1, "one\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line(1), Some(""));
    }

    #[test]
    fn test_empty_document_has_one_line() {
        let doc = TextDocument::new("file:///a.erb", "erb", 1, "");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line(0), Some(""));
    }

    #[test]
    fn test_line_prefix_clamps_to_line_end() {
        let doc = TextDocument::new("file:///a.erb", "erb", 1, "short");
        assert_eq!(doc.line_prefix(Position::new(0, 2)), Some("sh"));
        assert_eq!(doc.line_prefix(Position::new(0, 99)), Some("short"));
        assert_eq!(doc.line_prefix(Position::new(9, 0)), None);
    }

    #[test]
    fn test_line_prefix_respects_char_boundaries() {
        let doc = TextDocument::new("file:///a.erb", "erb", 1, "aé b");
        // Column 2 falls inside the two-byte é; the cut backs up to the boundary.
        assert_eq!(doc.line_prefix(Position::new(0, 2)), Some("a"));
    }

    #[test]
    fn test_range_contains() {
        let range = Range::on_line(3, 4, 8);
        assert!(range.contains(Position::new(3, 4)));
        assert!(range.contains(Position::new(3, 7)));
        assert!(!range.contains(Position::new(3, 8)));
        assert!(!range.contains(Position::new(2, 5)));
    }
}
