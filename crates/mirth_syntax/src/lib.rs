//! mirth_syntax: Token kinds and the keyword table for the Mirth language.
//!
//! The token kind enumeration is shared between the scanner and the parser.

pub mod token_kind;

// Re-export key types
pub use token_kind::TokenKind;
