//! mirth_core: Core utilities for the Mirth compiler front end.
//!
//! Provides source positions, line lookup and validated source buffers used
//! by the scanner and by diagnostic rendering.

pub mod source;
pub mod text;

// Re-export commonly used types
pub use source::{decode_utf8, SourceError, SourceText};
pub use text::{LineIndex, Position, TextPos};
