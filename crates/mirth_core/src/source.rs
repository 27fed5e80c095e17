//! Loading source buffers.
//!
//! The scanner works on `&str`, so byte buffers are validated as UTF-8 when
//! they are loaded. Invalid input is rejected here rather than surfacing as
//! odd grapheme clusters later.

use crate::text::{LineIndex, TextPos};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a source buffer.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source is not valid UTF-8: invalid byte sequence at offset {offset}")]
    InvalidUtf8 { offset: TextPos },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validate a byte buffer as UTF-8 and view it as text.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, SourceError> {
    simdutf8::compat::from_utf8(bytes).map_err(|err| SourceError::InvalidUtf8 {
        offset: err.valid_up_to(),
    })
}

/// An owned, validated source buffer together with its line index.
#[derive(Debug, Clone)]
pub struct SourceText {
    name: String,
    text: String,
    lines: LineIndex,
}

impl SourceText {
    /// Wrap already-validated text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::new(&text);
        Self {
            name: name.into(),
            text,
            lines,
        }
    }

    /// Validate a byte buffer and take ownership of it.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, SourceError> {
        let text = decode_utf8(bytes)?;
        Ok(Self::new(name, text))
    }

    /// Read a file from disk and validate it.
    pub fn read(path: &Path) -> Result<Self, SourceError> {
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path.display().to_string(), &bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the text of a 1-based line without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        self.lines
            .line_range(&self.text, line)
            .map(|range| &self.text[range])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_utf8("let x = '狼'".as_bytes()).unwrap(), "let x = '狼'");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let bytes = [b'l', b'e', b't', b' ', 0xFF, b'x'];
        match decode_utf8(&bytes) {
            Err(SourceError::InvalidUtf8 { offset }) => assert_eq!(offset, 4),
            other => panic!("expected InvalidUtf8, got {:?}", other),
        }
    }

    #[test]
    fn test_source_text_lines() {
        let source = SourceText::from_bytes("main.mi", b"let a = 1\nlet b = 2\n").unwrap();
        assert_eq!(source.name(), "main.mi");
        assert_eq!(source.line_text(1), Some("let a = 1"));
        assert_eq!(source.line_text(2), Some("let b = 2"));
        assert_eq!(source.line_text(3), Some(""));
        assert_eq!(source.line_text(4), None);
    }

    #[test]
    fn test_source_error_message() {
        let err = SourceText::from_bytes("bad.mi", &[0xC3]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "source is not valid UTF-8: invalid byte sequence at offset 0"
        );
    }
}
