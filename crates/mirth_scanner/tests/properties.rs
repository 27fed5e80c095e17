//! Property-based tests for the scanner.
//!
//! 1. Idempotence: two scanners over one buffer agree exactly
//! 2. Escapes: `\x`, `\u` and `\U` decode to the character they name
//! 3. Punctuation: every fixed operator scans back to itself

use mirth_scanner::{Scanner, TokenKind};
use proptest::prelude::*;

const PUNCTUATION: &[(&str, TokenKind)] = &[
    (";", TokenKind::SemicolonToken),
    (",", TokenKind::CommaToken),
    (":", TokenKind::ColonToken),
    ("~", TokenKind::TildeToken),
    (".", TokenKind::DotToken),
    ("..", TokenKind::DotDotToken),
    ("...", TokenKind::DotDotDotToken),
    ("=>", TokenKind::EqualsGreaterThanToken),
    ("**", TokenKind::AsteriskAsteriskToken),
    ("*=", TokenKind::AsteriskEqualsToken),
    ("&&", TokenKind::AmpersandAmpersandToken),
    ("||", TokenKind::BarBarToken),
    ("<<=", TokenKind::LessThanLessThanEqualsToken),
    (">>=", TokenKind::GreaterThanGreaterThanEqualsToken),
    ("??", TokenKind::QuestionQuestionToken),
    ("?.", TokenKind::QuestionDotToken),
    ("!=", TokenKind::ExclamationEqualsToken),
    ("%=", TokenKind::PercentEqualsToken),
];

/// Source built from Mirth-flavoured fragments, valid or not.
fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "let", " ", "\n", "\r\n", "x", "42", "0x1F", "1.5e3", "0o7e1", "..", "<<=", "'a'",
            "\"s\\n\"", "`", "${", "}", "{", "// c", "😀", "\u{0301}", "\\q", "\"", "e", ".",
        ]),
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn scanning_is_idempotent(source in source_strategy()) {
        let first = Scanner::new(&source).scan_to_end();
        let second = Scanner::new(&source).scan_to_end();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tokens_never_overlap(source in source_strategy()) {
        let output = Scanner::new(&source).scan_to_end();
        for pair in output.tokens.windows(2) {
            prop_assert!(pair[0].position.offset < pair[1].position.offset);
        }
    }

    #[test]
    fn long_unicode_escape_decodes(ch in any::<char>()) {
        let source = format!("\"\\U{:08X}\"", ch as u32);
        let mut scanner = Scanner::new(&source);
        let token = scanner.next_token().unwrap();
        prop_assert_eq!(token.kind, TokenKind::StringLiteral);
        prop_assert_eq!(token.text, ch.to_string());
    }

    #[test]
    fn short_unicode_escape_decodes(ch in any::<char>().prop_filter("BMP", |c| (*c as u32) <= 0xFFFF)) {
        let source = format!("'\\u{:04X}'", ch as u32);
        let token = Scanner::new(&source).next_token().unwrap();
        prop_assert_eq!(token.text, ch.to_string());
    }

    #[test]
    fn byte_escape_decodes(byte in 0u8..=0xFF) {
        let source = format!("\"\\x{:02x}\"", byte);
        let token = Scanner::new(&source).next_token().unwrap();
        prop_assert_eq!(token.text, char::from(byte).to_string());
    }

    #[test]
    fn punctuation_round_trips(index in 0..PUNCTUATION.len()) {
        let (text, kind) = PUNCTUATION[index];
        let output = Scanner::new(text).scan_to_end();
        prop_assert!(output.error.is_none());
        prop_assert_eq!(output.tokens.len(), 1);
        prop_assert_eq!(output.tokens[0].kind, kind);
        prop_assert_eq!(output.tokens[0].text.as_str(), text);
    }

    #[test]
    fn identifiers_scan_whole(name in "[a-z_][a-z0-9_]{0,12}") {
        let output = Scanner::new(&name).scan_to_end();
        prop_assert_eq!(output.tokens.len(), 1);
        let token = &output.tokens[0];
        prop_assert_eq!(token.text.as_str(), name.as_str());
        let expected = TokenKind::from_keyword(&name).unwrap_or(TokenKind::Identifier);
        prop_assert_eq!(token.kind, expected);
    }
}
