//! mirth_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! A diagnostic is a plain record: severity, stable numeric code, source
//! position and an uncoloured message. Presentation (colour, labels, source
//! excerpts) is left to the caller; the `Display` impl here is plain text.

use mirth_core::text::Position;
use serde::Serialize;
use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Stable diagnostic codes.
///
/// The numeric values are part of the public contract and must not be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u16")]
#[repr(u16)]
pub enum DiagnosticCode {
    /// Fallback for errors without a dedicated classification.
    UnknownError = 0,
    /// Any violation of the lexical grammar.
    UnexpectedToken = 1,
    /// Input was exhausted before a token was produced.
    FailedToRetrieveToken = 2,
    /// Fallback for warnings without a dedicated classification.
    UnknownWarning = 3,
}

impl DiagnosticCode {
    #[inline]
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl From<DiagnosticCode> for u16 {
    fn from(code: DiagnosticCode) -> Self {
        code.as_u16()
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{:04}", self.as_u16())
    }
}

/// A diagnostic message template with a code and severity.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: DiagnosticCode,
    pub severity: Severity,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with position and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic from a message template.
    pub fn new(message: &DiagnosticMessage, position: Position, args: &[&str]) -> Self {
        Self {
            severity: message.severity,
            code: message.code,
            position,
            message: format_message(message.message, args),
        }
    }

    /// Whether this is the end-of-input sentinel rather than a lexical error.
    pub fn is_end_of_input(&self) -> bool {
        self.code == DiagnosticCode::FailedToRetrieveToken
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.position, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:ident, Error, $msg:expr) => {
            DiagnosticMessage { code: DiagnosticCode::$code, severity: Severity::Error, message: $msg }
        };
        ($code:ident, Warning, $msg:expr) => {
            DiagnosticMessage { code: DiagnosticCode::$code, severity: Severity::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Number literals
    // ========================================================================
    pub const MULTIPLE_LEADING_ZEROS: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: multiple leading zeros before radix symbol");
    pub const MULTIPLE_DECIMAL_POINTS: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: multiple decimal point '.'");
    pub const DECIMAL_POINT_AFTER_EXPONENT: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: decimal point '.' after exponent");
    pub const EXPONENT_AFTER_DECIMAL_POINT: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: exponent symbol 'e' after decimal point '.'");
    pub const MULTIPLE_EXPONENTS: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: multiple exponent symbol 'e'");
    pub const EXPONENT_WITH_RADIX_PREFIX: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: invalid number literal.\nTips: exponent should not start with '0o' or '0b'.");
    pub const EMPTY_EXPONENT: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: invalid number literal.\nTips: exponent should not be empty.");

    // ========================================================================
    // Escape sequences and text literals
    // ========================================================================
    pub const INVALID_ESCAPE_SYMBOL_0: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: invalid escape symbol '{0}'");
    pub const INVALID_HEX_DIGIT_0: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: invalid hexadecimal digit '{0}' in rune escape sequence");
    pub const INVALID_FIRST_DIGIT_AFTER_LONG_UNICODE_ESCAPE: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: invalid first hexadecimal digit after '\\U' in rune escape sequence. Digits after '\\U' must start with 0");
    pub const INVALID_CODE_POINT_0: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: invalid unicode code point '{0}' in escape sequence");
    pub const UNEXPECTED_LINE_BREAK: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected line break");
    pub const UNTERMINATED_LITERAL_0: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected end of input: unterminated {0} literal");

    // ========================================================================
    // Tokenizer
    // ========================================================================
    pub const INVALID_CHARACTER_0: DiagnosticMessage = diag!(UnexpectedToken, Error, "Unexpected token: invalid character '{0}'");
    pub const FAILED_TO_RETRIEVE_TOKEN: DiagnosticMessage = diag!(FailedToRetrieveToken, Error, "Failed to retrieve next token.");
    pub const INTERPOLATION_NESTED_TOO_DEEP_0: DiagnosticMessage = diag!(UnexpectedToken, Warning, "Unexpected token: template string interpolation nested too deep (more than {0})");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Unexpected token: invalid escape symbol '{0}'", &["q"]);
        assert_eq!(msg, "Unexpected token: invalid escape symbol 'q'");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Unexpected line break", &[]);
        assert_eq!(msg, "Unexpected line break");
    }

    #[test]
    fn test_stable_codes() {
        assert_eq!(DiagnosticCode::UnknownError.as_u16(), 0);
        assert_eq!(DiagnosticCode::UnexpectedToken.as_u16(), 1);
        assert_eq!(DiagnosticCode::FailedToRetrieveToken.as_u16(), 2);
        assert_eq!(DiagnosticCode::UnknownWarning.as_u16(), 3);
        assert_eq!(DiagnosticCode::UnexpectedToken.to_string(), "M0001");
    }

    #[test]
    fn test_diagnostic_from_template() {
        let diag = Diagnostic::new(
            &messages::INTERPOLATION_NESTED_TOO_DEEP_0,
            Position::new(14, 1, 15),
            &["5"],
        );
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.code, DiagnosticCode::UnexpectedToken);
        assert_eq!(
            diag.message,
            "Unexpected token: template string interpolation nested too deep (more than 5)"
        );
    }

    #[test]
    fn test_diagnostic_display_is_plain_text() {
        let diag = Diagnostic::new(&messages::UNEXPECTED_LINE_BREAK, Position::new(7, 1, 8), &[]);
        assert_eq!(diag.to_string(), "error[M0001] 1:8: Unexpected line break");
        assert!(!diag.to_string().contains('\x1b'));
    }

    #[test]
    fn test_collection_keeps_insertion_order() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::new(
            &messages::INTERPOLATION_NESTED_TOO_DEEP_0,
            Position::new(9, 2, 1),
            &["5"],
        ));
        collection.add(Diagnostic::new(
            &messages::INTERPOLATION_NESTED_TOO_DEEP_0,
            Position::new(3, 1, 4),
            &["5"],
        ));
        let offsets: Vec<_> = collection
            .diagnostics()
            .iter()
            .map(|d| d.position.offset)
            .collect();
        assert_eq!(offsets, vec![9, 3]);
        assert_eq!(collection.into_diagnostics().len(), 2);
    }

    #[test]
    fn test_diagnostic_serializes_numeric_code() {
        let diag = Diagnostic::new(&messages::FAILED_TO_RETRIEVE_TOKEN, Position::new(0, 1, 1), &[]);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["code"], 2);
        assert_eq!(json["severity"], "error");
        assert_eq!(json["position"]["offset"], 0);
    }
}
