//! Grapheme cursor over a source buffer.
//!
//! The cursor is a plain `Copy` value: a byte offset plus the line and column
//! of that offset. Lookahead is recomputed from the buffer on every call, so
//! there is no cache to keep in sync with the offset.

use crate::char_codes;
use mirth_core::text::{Position, TextPos};
use unicode_segmentation::UnicodeSegmentation;

/// One extended grapheme cluster of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grapheme<'a> {
    text: &'a str,
}

impl<'a> Grapheme<'a> {
    /// The grapheme returned at end of input.
    pub const EMPTY: Grapheme<'static> = Grapheme { text: "" };

    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The only scalar value of the cluster, or None when the cluster is
    /// empty or made of several scalar values.
    #[inline]
    pub fn single_char(&self) -> Option<char> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    /// Whether the cluster is exactly the given character.
    #[inline]
    pub fn is(&self, ch: char) -> bool {
        self.single_char() == Some(ch)
    }

    #[inline]
    pub fn is_decimal_digit(&self) -> bool {
        self.single_char().map_or(false, char_codes::is_decimal_digit)
    }

    #[inline]
    pub fn is_hex_digit(&self) -> bool {
        self.single_char().map_or(false, char_codes::is_hex_digit)
    }

    #[inline]
    pub fn is_octal_digit(&self) -> bool {
        self.single_char().map_or(false, char_codes::is_octal_digit)
    }

    #[inline]
    pub fn is_binary_digit(&self) -> bool {
        self.single_char().map_or(false, char_codes::is_binary_digit)
    }

    #[inline]
    pub fn is_radix_marker(&self) -> bool {
        self.single_char().map_or(false, char_codes::is_radix_marker)
    }

    /// `"\n"`, or `"\r\n"` which segments as a single cluster.
    #[inline]
    pub fn is_line_break(&self) -> bool {
        matches!(self.text, "\n" | "\r\n")
    }

    /// Whether the cluster may continue an identifier.
    pub fn is_identifier_part(&self) -> bool {
        !self.text.is_empty() && !self.text.chars().any(char_codes::is_identifier_terminator)
    }
}

impl std::fmt::Display for Grapheme<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text)
    }
}

/// A position in a source buffer that moves one grapheme cluster at a time.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: TextPos,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The unconsumed part of the buffer.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    #[inline]
    pub fn offset(&self) -> TextPos {
        self.offset
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    /// Source text between `start` and the current offset.
    #[inline]
    pub fn slice_from(&self, start: TextPos) -> &'a str {
        &self.source[start..self.offset]
    }

    /// The cluster at the current offset.
    #[inline]
    pub fn peek(&self) -> Grapheme<'a> {
        self.peek_nth(0)
    }

    /// The cluster right after the current one.
    #[inline]
    pub fn peek_next(&self) -> Grapheme<'a> {
        self.peek_nth(1)
    }

    /// The cluster `n` clusters ahead; `peek_nth(0)` is `peek()`.
    pub fn peek_nth(&self, n: usize) -> Grapheme<'a> {
        self.rest()
            .graphemes(true)
            .nth(n)
            .map_or(Grapheme::EMPTY, Grapheme::new)
    }

    /// Consume one cluster and return it. At end of input nothing moves and
    /// the empty grapheme is returned.
    pub fn advance(&mut self) -> Grapheme<'a> {
        let grapheme = self.peek();
        self.step(grapheme);
        grapheme
    }

    /// Consume up to `n` clusters.
    pub fn advance_by(&mut self, n: usize) {
        let rest = self.rest();
        for text in rest.graphemes(true).take(n) {
            self.step(Grapheme::new(text));
        }
    }

    #[inline]
    fn step(&mut self, grapheme: Grapheme<'a>) {
        if grapheme.is_empty() {
            return;
        }
        self.offset += grapheme.len();
        if grapheme.is_line_break() {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}
