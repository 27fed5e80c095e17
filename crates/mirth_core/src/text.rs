//! Source positions and line lookup.
//!
//! Positions are produced by the scanner's cursor and carried by tokens and
//! diagnostics. Offsets are byte indices; columns count grapheme clusters.

use serde::Serialize;
use std::fmt;

/// A byte offset into source text.
pub type TextPos = usize;

/// A position in source text.
///
/// `line` and `column` are 1-based. The column advances by one per extended
/// grapheme cluster, not per byte or code point.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    /// Byte offset from the start of the buffer.
    pub offset: TextPos,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, in grapheme clusters.
    pub column: u32,
}

impl Position {
    #[inline]
    pub fn new(offset: TextPos, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position of the first byte of a buffer.
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of line starts, built once per buffer.
///
/// Used to fetch the text of a line when rendering diagnostics. Lines are
/// split on `\n`; a trailing `\r` is stripped from the returned line text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<TextPos>,
    len: TextPos,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| i + 1));
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Get the byte range of a 1-based line, excluding its line terminator.
    pub fn line_range(&self, text: &str, line: u32) -> Option<std::ops::Range<TextPos>> {
        let index = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let mut end = self
            .line_starts
            .get(index + 1)
            .map_or(self.len, |next| next - 1);
        if end > start && text.as_bytes().get(end - 1) == Some(&b'\r') {
            end -= 1;
        }
        Some(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let pos = Position::new(12, 3, 4);
        assert_eq!(pos.to_string(), "3:4");
        assert_eq!(format!("{:?}", pos), "3:4@12");
        assert_eq!(Position::default(), Position::new(0, 1, 1));
    }

    #[test]
    fn test_line_index() {
        let text = "line1\nline2\r\nline3";
        let index = LineIndex::new(text);
        let first = index.line_range(text, 1).unwrap();
        assert_eq!(&text[first], "line1");
        let second = index.line_range(text, 2).unwrap();
        assert_eq!(&text[second], "line2");
        let third = index.line_range(text, 3).unwrap();
        assert_eq!(&text[third], "line3");
        assert!(index.line_range(text, 0).is_none());
        assert!(index.line_range(text, 4).is_none());
    }

    #[test]
    fn test_line_index_trailing_newline() {
        let text = "a\n";
        let index = LineIndex::new(text);
        assert!(index.line_range(text, 3).is_none());
        let last = index.line_range(text, 2).unwrap();
        assert_eq!(&text[last], "");
    }
}
