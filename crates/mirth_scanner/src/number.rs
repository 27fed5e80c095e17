//! Number literal scanning.
//!
//! Grammar: an optional run of leading zeros (kept as one), an optional radix
//! marker after a lone leading zero, then digits with at most one `.` and at
//! most one exponent `e[+-]`. Errors are reported at the cursor where the
//! literal was rejected, not at its start.

use crate::cursor::{Cursor, Grapheme};
use mirth_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use mirth_syntax::TokenKind;

/// The digit set selected by the literal's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Radix {
    fn from_marker(marker: Grapheme<'_>) -> Option<Radix> {
        match marker.single_char()? {
            'b' | 'B' => Some(Radix::Binary),
            'o' | 'O' => Some(Radix::Octal),
            'x' | 'X' => Some(Radix::Hex),
            _ => None,
        }
    }

    fn kind(self) -> TokenKind {
        match self {
            Radix::Binary => TokenKind::BinaryIntegerLiteral,
            Radix::Octal => TokenKind::OctalIntegerLiteral,
            Radix::Decimal => TokenKind::DecimalIntegerLiteral,
            Radix::Hex => TokenKind::HexIntegerLiteral,
        }
    }

    fn accepts(self, grapheme: Grapheme<'_>) -> bool {
        match self {
            Radix::Binary => grapheme.is_binary_digit(),
            Radix::Octal => grapheme.is_octal_digit(),
            Radix::Decimal => grapheme.is_decimal_digit(),
            Radix::Hex => grapheme.is_hex_digit(),
        }
    }
}

fn reject(message: &DiagnosticMessage, cursor: &Cursor<'_>) -> Diagnostic {
    Diagnostic::new(message, cursor.position(), &[])
}

/// Scan a number literal. The cursor must be on a decimal digit.
pub(crate) fn scan_number(cursor: &mut Cursor<'_>) -> Result<(TokenKind, String), Diagnostic> {
    let starts_with_zero = cursor.peek().is('0');
    let mut kind = if starts_with_zero {
        TokenKind::OctalIntegerLiteral
    } else {
        TokenKind::DecimalIntegerLiteral
    };
    let mut text = String::from(cursor.advance().as_str());

    let mut multiple_leading_zeros = false;
    if starts_with_zero {
        while cursor.peek().is('0') {
            multiple_leading_zeros = true;
            cursor.advance();
        }
    }

    let marker = cursor.peek();
    if multiple_leading_zeros && (marker.is_radix_marker() || marker.is('.') || marker.is('e')) {
        return Err(reject(&messages::MULTIPLE_LEADING_ZEROS, cursor));
    }

    let mut radix = Radix::Decimal;
    if starts_with_zero {
        if let Some(selected) = Radix::from_marker(marker) {
            radix = selected;
            kind = selected.kind();
            text.push_str(cursor.advance().as_str());
        }
    }
    let has_radix_prefix = radix != Radix::Decimal;

    let mut has_dot = false;
    // Number of digits after the exponent marker, once one has been seen.
    let mut exponent_digits: Option<usize> = None;

    loop {
        let current = cursor.peek();

        if current.is('.') {
            // `..` and `...` belong to the operator after the literal.
            if cursor.peek_next().is('.') {
                break;
            }
            if has_dot {
                return Err(reject(&messages::MULTIPLE_DECIMAL_POINTS, cursor));
            }
            if exponent_digits.is_some() {
                return Err(reject(&messages::DECIMAL_POINT_AFTER_EXPONENT, cursor));
            }
            has_dot = true;
            kind = TokenKind::FloatLiteral;
            text.push_str(cursor.advance().as_str());
            continue;
        }

        if current.is('e') && radix != Radix::Hex {
            if text.ends_with('.') {
                return Err(reject(&messages::EXPONENT_AFTER_DECIMAL_POINT, cursor));
            }
            if exponent_digits.is_some() {
                return Err(reject(&messages::MULTIPLE_EXPONENTS, cursor));
            }
            exponent_digits = Some(0);
            kind = TokenKind::ExponentLiteral;
            text.push_str(cursor.advance().as_str());

            let sign = cursor.peek();
            if sign.is('+') || sign.is('-') {
                text.push_str(cursor.advance().as_str());
            }
            continue;
        }

        if !radix.accepts(current) {
            break;
        }
        text.push_str(cursor.advance().as_str());
        if let Some(count) = exponent_digits.as_mut() {
            *count += 1;
        }
    }

    if let Some(digits) = exponent_digits {
        if has_radix_prefix {
            return Err(reject(&messages::EXPONENT_WITH_RADIX_PREFIX, cursor));
        }
        if digits == 0 {
            return Err(reject(&messages::EMPTY_EXPONENT, cursor));
        }
    }

    Ok((kind, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Result<(TokenKind, String), Diagnostic> {
        let mut cursor = Cursor::new(source);
        scan_number(&mut cursor)
    }

    #[test]
    fn test_leading_zero_defaults_to_octal() {
        assert_eq!(scan("0").unwrap(), (TokenKind::OctalIntegerLiteral, "0".to_string()));
        assert_eq!(scan("007").unwrap(), (TokenKind::OctalIntegerLiteral, "07".to_string()));
    }

    #[test]
    fn test_hex_keeps_e_as_digit() {
        assert_eq!(
            scan("0x1e3").unwrap(),
            (TokenKind::HexIntegerLiteral, "0x1e3".to_string())
        );
        assert_eq!(
            scan("0xe").unwrap(),
            (TokenKind::HexIntegerLiteral, "0xe".to_string())
        );
    }

    #[test]
    fn test_radix_marker_needs_leading_zero() {
        let mut cursor = Cursor::new("1x2");
        assert_eq!(
            scan_number(&mut cursor).unwrap(),
            (TokenKind::DecimalIntegerLiteral, "1".to_string())
        );
        assert_eq!(cursor.peek().as_str(), "x");
    }

    #[test]
    fn test_stops_before_range() {
        let mut cursor = Cursor::new("1..5");
        assert_eq!(
            scan_number(&mut cursor).unwrap(),
            (TokenKind::DecimalIntegerLiteral, "1".to_string())
        );
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_signed_exponent_without_digits_is_empty() {
        let err = scan("1e+").unwrap_err();
        assert_eq!(err.message, messages::EMPTY_EXPONENT.message);
        assert_eq!(err.position.offset, 3);
    }

    #[test]
    fn test_binary_exponent_is_rejected() {
        let err = scan("0b1e1").unwrap_err();
        assert_eq!(err.message, messages::EXPONENT_WITH_RADIX_PREFIX.message);
        assert_eq!(err.position.offset, 5);
    }

    #[test]
    fn test_zero_exponent_is_allowed() {
        assert_eq!(
            scan("0e5").unwrap(),
            (TokenKind::ExponentLiteral, "0e5".to_string())
        );
    }
}
