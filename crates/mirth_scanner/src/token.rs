//! Tokens produced by the scanner.

use mirth_core::text::Position;
use mirth_syntax::TokenKind;
use serde::Serialize;

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Position of the first grapheme of the lexeme.
    pub position: Position,
    /// The lexeme. For rune, string and template-fragment literals this is
    /// the decoded content without delimiters.
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position, text: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {:?}", self.position, self.kind, self.text)
    }
}
