//! Character classes used by the scanner.

pub const BACKSLASH: char = '\\';
pub const BACKTICK: char = '`';
pub const DOLLAR_SIGN: char = '$';

/// Characters that can never appear inside an identifier.
///
/// A grapheme containing any of these, even alongside combining marks, ends
/// the identifier being scanned.
pub const IDENTIFIER_TERMINATORS: &[char] = &[
    ' ', '\t', '\r', '\n', ';', ':', ',', '(', ')', '{', '}', '[', ']', '.', '=', '?', '!', '*',
    '/', '%', '^', '|', '&', '~', '>', '<', '+', '-', '\'', '"', '`',
];

#[inline]
pub fn is_identifier_terminator(ch: char) -> bool {
    IDENTIFIER_TERMINATORS.contains(&ch)
}

#[inline]
pub fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// `b B o O x X` after a leading zero.
#[inline]
pub fn is_radix_marker(ch: char) -> bool {
    matches!(ch, 'b' | 'B' | 'o' | 'O' | 'x' | 'X')
}

/// Map the character after a backslash to the character it stands for.
pub fn single_escape(ch: char) -> Option<char> {
    match ch {
        'n' => Some('\n'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        'r' => Some('\r'),
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'v' => Some('\u{0B}'),
        '0' => Some('\0'),
        _ => None,
    }
}
