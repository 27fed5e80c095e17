//! mirth_scanner: Grapheme-aware lexer for Mirth source code.
//!
//! The scanner is pull-based: each call to [`Scanner::next_token`] yields one
//! token or one diagnostic. Its unit of input is the extended grapheme
//! cluster, so an emoji built from several scalar values is a single lexical
//! character. Supported out of the box:
//! - Decimal, octal, hex and binary integers, floats and exponents
//! - Rune and string literals with escape decoding
//! - Template strings with nested `${...}` interpolation
//! - Line comments and statement-significant line breaks

mod char_codes;
mod cursor;
mod number;
mod scanner;
mod template;
mod text_literal;
mod token;

pub use cursor::{Cursor, Grapheme};
pub use scanner::{ScanOutput, Scanner, Tokens};
pub use token::Token;

pub use mirth_diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use mirth_options::ScannerOptions;
pub use mirth_syntax::TokenKind;
