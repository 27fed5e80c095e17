//! Rune, string and template-fragment scanning.
//!
//! All three share one content reader: raw graphemes are copied, escapes are
//! decoded, and hitting end of input reports the literal as unterminated.
//! Only template text may contain raw line breaks.

use crate::char_codes::{self, BACKSLASH, BACKTICK, DOLLAR_SIGN};
use crate::cursor::Cursor;
use mirth_diagnostics::{messages, Diagnostic};

/// Which literal the content reader is inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextLiteral {
    Rune,
    String,
    Template,
}

impl TextLiteral {
    fn name(self) -> &'static str {
        match self {
            TextLiteral::Rune => "rune",
            TextLiteral::String => "string",
            TextLiteral::Template => "template string",
        }
    }

    fn allows_line_breaks(self) -> bool {
        self == TextLiteral::Template
    }

    fn escape(self, symbol: char) -> Option<char> {
        match (self, symbol) {
            (TextLiteral::Template, BACKTICK | DOLLAR_SIGN) => Some(symbol),
            _ => char_codes::single_escape(symbol),
        }
    }

    fn unterminated(self, cursor: &Cursor<'_>) -> Diagnostic {
        Diagnostic::new(
            &messages::UNTERMINATED_LITERAL_0,
            cursor.position(),
            &[self.name()],
        )
    }
}

/// Scan a rune or string literal and return its decoded content. The cursor
/// must be on the opening delimiter.
pub(crate) fn scan_quoted(
    cursor: &mut Cursor<'_>,
    literal: TextLiteral,
) -> Result<String, Diagnostic> {
    let delimiter = cursor.advance();
    let mut content = String::new();
    loop {
        if cursor.peek() == delimiter {
            cursor.advance();
            return Ok(content);
        }
        read_content(cursor, literal, &mut content)?;
    }
}

/// Scan template text up to the closing backtick or the next `${`. Neither
/// is consumed. The result may be empty.
pub(crate) fn scan_template_fragment(cursor: &mut Cursor<'_>) -> Result<String, Diagnostic> {
    let mut content = String::new();
    loop {
        let current = cursor.peek();
        if current.is(BACKTICK) || (current.is(DOLLAR_SIGN) && cursor.peek_next().is('{')) {
            return Ok(content);
        }
        read_content(cursor, TextLiteral::Template, &mut content)?;
    }
}

/// Read one grapheme or one escape sequence of literal content.
fn read_content(
    cursor: &mut Cursor<'_>,
    literal: TextLiteral,
    out: &mut String,
) -> Result<(), Diagnostic> {
    let current = cursor.peek();
    if current.is_empty() {
        return Err(literal.unterminated(cursor));
    }
    if current.is_line_break() && !literal.allows_line_breaks() {
        return Err(Diagnostic::new(
            &messages::UNEXPECTED_LINE_BREAK,
            cursor.position(),
            &[],
        ));
    }
    if current.is(BACKSLASH) {
        return read_escape(cursor, literal, out);
    }
    out.push_str(cursor.advance().as_str());
    Ok(())
}

fn read_escape(
    cursor: &mut Cursor<'_>,
    literal: TextLiteral,
    out: &mut String,
) -> Result<(), Diagnostic> {
    let backslash = cursor.position();
    let symbol = cursor.peek_next();
    if symbol.is_empty() {
        cursor.advance();
        return Err(literal.unterminated(cursor));
    }

    if let Some(decoded) = symbol.single_char().and_then(|ch| literal.escape(ch)) {
        cursor.advance_by(2);
        out.push(decoded);
        return Ok(());
    }

    let digits = match symbol.as_str() {
        "x" => 2,
        "u" => 4,
        "U" => 8,
        _ => {
            return Err(Diagnostic::new(
                &messages::INVALID_ESCAPE_SYMBOL_0,
                backslash,
                &[symbol.as_str()],
            ))
        }
    };
    cursor.advance_by(2);

    if digits == 8 && !cursor.peek().is('0') {
        if cursor.is_eof() {
            return Err(literal.unterminated(cursor));
        }
        return Err(Diagnostic::new(
            &messages::INVALID_FIRST_DIGIT_AFTER_LONG_UNICODE_ESCAPE,
            cursor.position(),
            &[],
        ));
    }

    out.push(read_hex_scalar(cursor, literal, digits)?);
    Ok(())
}

/// Read exactly `digits` hex digits and decode them as a scalar value.
fn read_hex_scalar(
    cursor: &mut Cursor<'_>,
    literal: TextLiteral,
    digits: usize,
) -> Result<char, Diagnostic> {
    let start = cursor.offset();
    for _ in 0..digits {
        let current = cursor.peek();
        if current.is_empty() {
            return Err(literal.unterminated(cursor));
        }
        if !current.is_hex_digit() {
            return Err(Diagnostic::new(
                &messages::INVALID_HEX_DIGIT_0,
                cursor.position(),
                &[current.as_str()],
            ));
        }
        cursor.advance();
    }

    let hex = cursor.slice_from(start);
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| {
            Diagnostic::new(&messages::INVALID_CODE_POINT_0, cursor.position(), &[hex])
        })
}
