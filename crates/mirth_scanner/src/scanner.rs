//! The Mirth scanner.
//!
//! Converts source text into tokens one call at a time. Fixed punctuation is
//! resolved here with up to three graphemes of lookahead; literals are handed
//! to the number and text-literal sub-scanners.

use crate::cursor::Cursor;
use crate::number::scan_number;
use crate::template::{CloseBrace, TemplateStack};
use crate::text_literal::{scan_quoted, scan_template_fragment, TextLiteral};
use crate::token::Token;
use mirth_core::source::{decode_utf8, SourceError};
use mirth_core::text::{LineIndex, Position};
use mirth_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use mirth_options::ScannerOptions;
use mirth_syntax::TokenKind;
use serde::Serialize;
use tracing::{debug, trace};

/// The scanner converts Mirth source text into tokens.
pub struct Scanner<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Current position in the text.
    cursor: Cursor<'src>,
    /// Line starts, for rendering diagnostics.
    lines: LineIndex,
    /// Open template strings and interpolations.
    templates: TemplateStack,
    options: ScannerOptions,
    /// Accumulated warnings. Errors are returned, never stored.
    warnings: DiagnosticCollection,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner with default options.
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    pub fn with_options(source: &'src str, options: ScannerOptions) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            lines: LineIndex::new(source),
            templates: TemplateStack::new(),
            options,
            warnings: DiagnosticCollection::new(),
        }
    }

    /// Create a scanner over a byte buffer, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: &'src [u8]) -> Result<Self, SourceError> {
        Ok(Self::new(decode_utf8(bytes)?))
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Current cursor position. After an error this is where scanning stopped.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Text of a 1-based line without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&'src str> {
        self.lines
            .line_range(self.source, line)
            .map(|range| &self.source[range])
    }

    /// Warnings recorded so far, in order.
    pub fn warnings(&self) -> &[Diagnostic] {
        self.warnings.diagnostics()
    }

    /// Take the accumulated warnings, leaving an empty collection.
    pub fn take_warnings(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.warnings)
    }

    /// Iterate over the remaining tokens. Ends at end of input, or right
    /// after yielding the first error.
    pub fn tokens(&mut self) -> Tokens<'_, 'src> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    /// Scan to the end of input or the first error.
    pub fn scan_to_end(&mut self) -> ScanOutput {
        let mut tokens = Vec::new();
        let mut error = None;
        for result in self.tokens() {
            match result {
                Ok(token) => tokens.push(token),
                Err(diagnostic) => error = Some(diagnostic),
            }
        }
        ScanOutput {
            tokens,
            error,
            warnings: self.take_warnings().into_diagnostics(),
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token.
    ///
    /// At end of input this returns a `FailedToRetrieveToken` diagnostic.
    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        if self.templates.in_text() {
            let start = self.cursor.position();
            let fragment = scan_template_fragment(&mut self.cursor)?;
            if !fragment.is_empty() {
                return Ok(self.make_token(TokenKind::TemplateStringFragment, start, fragment));
            }
        }

        while !self.cursor.is_eof() {
            let start = self.cursor.position();
            let current = self.cursor.peek();

            let kind = match current.as_str() {
                " " | "\t" | "\r" => {
                    self.cursor.advance();
                    continue;
                }
                "\n" | "\r\n" => self.single(TokenKind::LineBreak),

                ";" => self.single(TokenKind::SemicolonToken),
                "," => self.single(TokenKind::CommaToken),
                ":" => self.single(TokenKind::ColonToken),
                "(" => self.single(TokenKind::OpenParenToken),
                ")" => self.single(TokenKind::CloseParenToken),
                "[" => self.single(TokenKind::OpenBracketToken),
                "]" => self.single(TokenKind::CloseBracketToken),
                "~" => self.single(TokenKind::TildeToken),
                "{" => self.scan_open_brace(),
                "}" => self.scan_close_brace(),

                "." => self.scan_dot(),
                "=" => self.scan_equals(),
                "!" => self.scan_exclamation(),
                "+" => self.scan_plus(),
                "-" => self.scan_minus(),
                "*" => self.scan_asterisk(),
                "/" if self.next_is('/') => return Ok(self.scan_line_comment(start)),
                "/" => self.scan_slash(),
                "%" => self.scan_percent(),
                "&" => self.scan_ampersand(),
                "|" => self.scan_bar(),
                "^" => self.scan_caret(),
                "<" => self.scan_less_than(),
                ">" => self.scan_greater_than(),
                "?" => self.scan_question(),

                "`" => self.scan_template_quote(),
                "$" if self.next_is('{') => self.scan_interpolation_start(start),

                "'" => {
                    let text = scan_quoted(&mut self.cursor, TextLiteral::Rune)?;
                    return Ok(self.make_token(TokenKind::RuneLiteral, start, text));
                }
                "\"" => {
                    let text = scan_quoted(&mut self.cursor, TextLiteral::String)?;
                    return Ok(self.make_token(TokenKind::StringLiteral, start, text));
                }

                _ if current.is_decimal_digit() => {
                    let (kind, text) = scan_number(&mut self.cursor)?;
                    return Ok(self.make_token(kind, start, text));
                }
                _ if current.is_identifier_part() => return Ok(self.scan_identifier(start)),

                _ => {
                    return Err(Diagnostic::new(
                        &messages::INVALID_CHARACTER_0,
                        start,
                        &[current.as_str()],
                    ))
                }
            };

            let text = self.cursor.slice_from(start.offset);
            return Ok(self.make_token(kind, start, text));
        }

        if self.templates.depth() > 0 {
            return Err(Diagnostic::new(
                &messages::UNTERMINATED_LITERAL_0,
                self.cursor.position(),
                &["template string"],
            ));
        }
        Err(Diagnostic::new(
            &messages::FAILED_TO_RETRIEVE_TOKEN,
            self.cursor.position(),
            &[],
        ))
    }

    fn make_token(&self, kind: TokenKind, start: Position, text: impl Into<String>) -> Token {
        let token = Token::new(kind, start, text);
        trace!(kind = %token.kind, offset = start.offset, "scanned token");
        token
    }

    #[inline]
    fn next_is(&self, ch: char) -> bool {
        self.cursor.peek_next().is(ch)
    }

    #[inline]
    fn nth_is(&self, n: usize, ch: char) -> bool {
        self.cursor.peek_nth(n).is(ch)
    }

    #[inline]
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    #[inline]
    fn double(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance_by(2);
        kind
    }

    #[inline]
    fn triple(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance_by(3);
        kind
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_open_brace(&mut self) -> TokenKind {
        self.templates.open_brace();
        self.single(TokenKind::OpenBraceToken)
    }

    fn scan_close_brace(&mut self) -> TokenKind {
        if self.templates.close_brace() == CloseBrace::EndInterpolation {
            debug!(
                offset = self.cursor.offset(),
                depth = self.templates.depth(),
                "closed template interpolation"
            );
        }
        self.single(TokenKind::CloseBraceToken)
    }

    fn scan_dot(&mut self) -> TokenKind {
        if self.next_is('.') {
            if self.nth_is(2, '.') {
                self.triple(TokenKind::DotDotDotToken)
            } else {
                self.double(TokenKind::DotDotToken)
            }
        } else {
            self.single(TokenKind::DotToken)
        }
    }

    fn scan_equals(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::EqualsEqualsToken)
        } else if self.next_is('>') {
            self.double(TokenKind::EqualsGreaterThanToken)
        } else {
            self.single(TokenKind::EqualsToken)
        }
    }

    fn scan_exclamation(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::ExclamationEqualsToken)
        } else {
            self.single(TokenKind::ExclamationToken)
        }
    }

    fn scan_plus(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::PlusEqualsToken)
        } else if self.next_is('+') {
            self.double(TokenKind::PlusPlusToken)
        } else {
            self.single(TokenKind::PlusToken)
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::MinusEqualsToken)
        } else if self.next_is('-') {
            self.double(TokenKind::MinusMinusToken)
        } else {
            self.single(TokenKind::MinusToken)
        }
    }

    fn scan_asterisk(&mut self) -> TokenKind {
        if self.next_is('*') {
            self.double(TokenKind::AsteriskAsteriskToken)
        } else if self.next_is('=') {
            self.double(TokenKind::AsteriskEqualsToken)
        } else {
            self.single(TokenKind::AsteriskToken)
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::SlashEqualsToken)
        } else {
            self.single(TokenKind::SlashToken)
        }
    }

    fn scan_percent(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::PercentEqualsToken)
        } else {
            self.single(TokenKind::PercentToken)
        }
    }

    fn scan_ampersand(&mut self) -> TokenKind {
        if self.next_is('&') {
            self.double(TokenKind::AmpersandAmpersandToken)
        } else if self.next_is('=') {
            self.double(TokenKind::AmpersandEqualsToken)
        } else {
            self.single(TokenKind::AmpersandToken)
        }
    }

    fn scan_bar(&mut self) -> TokenKind {
        if self.next_is('|') {
            self.double(TokenKind::BarBarToken)
        } else if self.next_is('=') {
            self.double(TokenKind::BarEqualsToken)
        } else {
            self.single(TokenKind::BarToken)
        }
    }

    fn scan_caret(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::CaretEqualsToken)
        } else {
            self.single(TokenKind::CaretToken)
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::LessThanEqualsToken)
        } else if self.next_is('<') {
            if self.nth_is(2, '=') {
                self.triple(TokenKind::LessThanLessThanEqualsToken)
            } else {
                self.double(TokenKind::LessThanLessThanToken)
            }
        } else {
            self.single(TokenKind::LessThanToken)
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        if self.next_is('=') {
            self.double(TokenKind::GreaterThanEqualsToken)
        } else if self.next_is('>') {
            if self.nth_is(2, '=') {
                self.triple(TokenKind::GreaterThanGreaterThanEqualsToken)
            } else {
                self.double(TokenKind::GreaterThanGreaterThanToken)
            }
        } else {
            self.single(TokenKind::GreaterThanToken)
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        if self.next_is('?') {
            self.double(TokenKind::QuestionQuestionToken)
        } else if self.next_is('.') {
            self.double(TokenKind::QuestionDotToken)
        } else {
            self.single(TokenKind::QuestionToken)
        }
    }

    fn scan_template_quote(&mut self) -> TokenKind {
        let opened = self.templates.quote();
        debug!(
            offset = self.cursor.offset(),
            depth = self.templates.depth(),
            "{} template string",
            if opened { "opened" } else { "closed" }
        );
        self.single(TokenKind::TemplateStringQuote)
    }

    fn scan_interpolation_start(&mut self, start: Position) -> TokenKind {
        let depth = self.templates.open_interpolation();
        let max = self.options.max_interpolation_depth;
        if depth > max {
            debug!(offset = start.offset, depth, max, "interpolation nested too deep");
            self.warnings.add(Diagnostic::new(
                &messages::INTERPOLATION_NESTED_TOO_DEEP_0,
                start,
                &[&max.to_string()],
            ));
        }
        self.double(TokenKind::InterpolationStart)
    }

    /// Scan `//` up to, not including, the next line break.
    fn scan_line_comment(&mut self, start: Position) -> Token {
        while !self.cursor.is_eof() && !self.cursor.peek().is_line_break() {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start.offset);
        self.make_token(TokenKind::LineComment, start, text)
    }

    fn scan_identifier(&mut self, start: Position) -> Token {
        while self.cursor.peek().is_identifier_part() {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start.offset);
        let kind = TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind, start, text)
    }
}

/// Iterator over the remaining tokens of a [`Scanner`].
pub struct Tokens<'s, 'src> {
    scanner: &'s mut Scanner<'src>,
    done: bool,
}

impl Iterator for Tokens<'_, '_> {
    type Item = Result<Token, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next_token() {
            Ok(token) => Some(Ok(token)),
            Err(diagnostic) => {
                self.done = true;
                if diagnostic.is_end_of_input() {
                    None
                } else {
                    Some(Err(diagnostic))
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Tokens<'_, '_> {}

/// Everything produced by scanning a buffer to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    /// The error that stopped scanning, if any.
    pub error: Option<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ScanOutput {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(source);
        scanner
            .tokens()
            .map(|result| result.map(|token| token.kind))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } [ ] ; , : ~"),
            vec![
                TokenKind::OpenParenToken,
                TokenKind::CloseParenToken,
                TokenKind::OpenBraceToken,
                TokenKind::CloseBraceToken,
                TokenKind::OpenBracketToken,
                TokenKind::CloseBracketToken,
                TokenKind::SemicolonToken,
                TokenKind::CommaToken,
                TokenKind::ColonToken,
                TokenKind::TildeToken,
            ]
        );
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let mut scanner = Scanner::new("let x1 = true");
        let first = scanner.next_token().unwrap();
        assert_eq!(first.kind, TokenKind::LetKeyword);
        let second = scanner.next_token().unwrap();
        assert_eq!(second.kind, TokenKind::Identifier);
        assert_eq!(second.text, "x1");
        assert_eq!(second.position, Position::new(4, 1, 5));
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::EqualsToken);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::TrueKeyword);
    }

    #[test]
    fn test_end_of_input() {
        let mut scanner = Scanner::new("  \t");
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.code, crate::DiagnosticCode::FailedToRetrieveToken);
        assert_eq!(err.message, "Failed to retrieve next token.");
        assert_eq!(err.position.offset, 3);
    }

    #[test]
    fn test_dollar_alone_is_identifier() {
        let mut scanner = Scanner::new("$ $a");
        let first = scanner.next_token().unwrap();
        assert_eq!((first.kind, first.text.as_str()), (TokenKind::Identifier, "$"));
        let second = scanner.next_token().unwrap();
        assert_eq!(second.text, "$a");
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let mut scanner = Scanner::new("x // trailing");
        scanner.next_token().unwrap();
        let comment = scanner.next_token().unwrap();
        assert_eq!(comment.kind, TokenKind::LineComment);
        assert_eq!(comment.text, "// trailing");
        assert!(scanner.next_token().unwrap_err().is_end_of_input());
    }

    #[test]
    fn test_invalid_character() {
        let mut scanner = Scanner::new("a ;\u{0301}");
        scanner.next_token().unwrap();
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.message, "Unexpected token: invalid character ';\u{0301}'");
        assert_eq!(err.position.offset, 2);
    }

    #[test]
    fn test_crlf_is_one_line_break() {
        let mut scanner = Scanner::new("a\r\nb");
        scanner.next_token().unwrap();
        let line_break = scanner.next_token().unwrap();
        assert_eq!(line_break.kind, TokenKind::LineBreak);
        assert_eq!(line_break.text, "\r\n");
        let b = scanner.next_token().unwrap();
        assert_eq!(b.position, Position::new(3, 2, 1));
    }

    #[test]
    fn test_line_text() {
        let scanner = Scanner::new("let a = 1\r\nlet b = 2");
        assert_eq!(scanner.line_text(1), Some("let a = 1"));
        assert_eq!(scanner.line_text(2), Some("let b = 2"));
        assert_eq!(scanner.line_text(3), None);
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        assert!(Scanner::from_bytes(b"let \xFF").is_err());
        assert!(Scanner::from_bytes(b"let x").is_ok());
    }

    #[test]
    fn test_error_leaves_cursor_at_failure() {
        let mut scanner = Scanner::new("x = 123.456.789");
        let mut tokens = scanner.tokens();
        assert!(tokens.next().unwrap().is_ok());
        assert!(tokens.next().unwrap().is_ok());
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
        assert_eq!(scanner.position().offset, 11);
    }
}
