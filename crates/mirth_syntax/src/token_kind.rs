//! TokenKind enum - every kind of token the Mirth scanner produces.

use serde::Serialize;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum TokenKind {
    Identifier = 0,

    // ========================================================================
    // Keywords
    // ========================================================================
    LetKeyword = 1,
    ConstKeyword = 2,
    FuncKeyword = 3,
    IfKeyword = 4,
    ElseKeyword = 5,
    ForKeyword = 6,
    LoopKeyword = 7,
    ReturnKeyword = 8,
    BreakKeyword = 9,
    ContinueKeyword = 10,
    StructKeyword = 11,
    InterfaceKeyword = 12,
    TrueKeyword = 13,
    FalseKeyword = 14,

    // ========================================================================
    // Punctuation
    // ========================================================================
    LineBreak = 15,
    SemicolonToken = 16,
    CommaToken = 17,
    ColonToken = 18,
    OpenParenToken = 19,
    CloseParenToken = 20,
    OpenBraceToken = 21,
    CloseBraceToken = 22,
    OpenBracketToken = 23,
    CloseBracketToken = 24,
    TildeToken = 25,
    DotToken = 26,
    DotDotToken = 27,
    DotDotDotToken = 28,
    EqualsToken = 29,
    EqualsEqualsToken = 30,
    EqualsGreaterThanToken = 31,
    ExclamationToken = 32,
    ExclamationEqualsToken = 33,
    PlusToken = 34,
    PlusPlusToken = 35,
    PlusEqualsToken = 36,
    MinusToken = 37,
    MinusMinusToken = 38,
    MinusEqualsToken = 39,
    AsteriskToken = 40,
    AsteriskAsteriskToken = 41,
    AsteriskEqualsToken = 42,
    SlashToken = 43,
    SlashEqualsToken = 44,
    PercentToken = 45,
    PercentEqualsToken = 46,
    AmpersandToken = 47,
    AmpersandAmpersandToken = 48,
    AmpersandEqualsToken = 49,
    BarToken = 50,
    BarBarToken = 51,
    BarEqualsToken = 52,
    CaretToken = 53,
    CaretEqualsToken = 54,
    LessThanToken = 55,
    LessThanEqualsToken = 56,
    LessThanLessThanToken = 57,
    LessThanLessThanEqualsToken = 58,
    GreaterThanToken = 59,
    GreaterThanEqualsToken = 60,
    GreaterThanGreaterThanToken = 61,
    GreaterThanGreaterThanEqualsToken = 62,
    QuestionToken = 63,
    QuestionQuestionToken = 64,
    QuestionDotToken = 65,

    // ========================================================================
    // Literals
    // ========================================================================
    DecimalIntegerLiteral = 66,
    OctalIntegerLiteral = 67,
    HexIntegerLiteral = 68,
    BinaryIntegerLiteral = 69,
    FloatLiteral = 70,
    ExponentLiteral = 71,
    RuneLiteral = 72,
    StringLiteral = 73,

    // Template strings
    TemplateStringQuote = 74,
    TemplateStringFragment = 75,
    InterpolationStart = 76,

    // Trivia
    LineComment = 77,
}

impl TokenKind {
    pub const FIRST_KEYWORD: TokenKind = TokenKind::LetKeyword;
    pub const LAST_KEYWORD: TokenKind = TokenKind::FalseKeyword;
    pub const FIRST_PUNCTUATION: TokenKind = TokenKind::SemicolonToken;
    pub const LAST_PUNCTUATION: TokenKind = TokenKind::QuestionDotToken;
    pub const FIRST_LITERAL: TokenKind = TokenKind::DecimalIntegerLiteral;
    pub const LAST_LITERAL: TokenKind = TokenKind::StringLiteral;
    pub const FIRST_TEMPLATE: TokenKind = TokenKind::TemplateStringQuote;
    pub const LAST_TEMPLATE: TokenKind = TokenKind::InterpolationStart;
}

impl TokenKind {
    /// Whether this kind represents a keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_KEYWORD as u16 && v <= Self::LAST_KEYWORD as u16
    }

    /// Whether this kind represents a punctuation or operator token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_PUNCTUATION as u16 && v <= Self::LAST_PUNCTUATION as u16
    }

    /// Whether this kind represents a number, rune or string literal.
    #[inline]
    pub fn is_literal(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_LITERAL as u16 && v <= Self::LAST_LITERAL as u16
    }

    /// Whether this kind represents a number literal.
    #[inline]
    pub fn is_number(self) -> bool {
        let v = self as u16;
        v >= TokenKind::DecimalIntegerLiteral as u16 && v <= TokenKind::ExponentLiteral as u16
    }

    /// Whether this kind belongs to a template string.
    #[inline]
    pub fn is_template(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_TEMPLATE as u16 && v <= Self::LAST_TEMPLATE as u16
    }

    /// Whether this kind is an assignment operator (`=` or a compound form).
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::EqualsToken
                | TokenKind::PlusEqualsToken
                | TokenKind::MinusEqualsToken
                | TokenKind::AsteriskEqualsToken
                | TokenKind::SlashEqualsToken
                | TokenKind::PercentEqualsToken
                | TokenKind::AmpersandEqualsToken
                | TokenKind::BarEqualsToken
                | TokenKind::CaretEqualsToken
                | TokenKind::LessThanLessThanEqualsToken
                | TokenKind::GreaterThanGreaterThanEqualsToken
        )
    }

    /// Get the keyword text for a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            TokenKind::LetKeyword => Some("let"),
            TokenKind::ConstKeyword => Some("const"),
            TokenKind::FuncKeyword => Some("func"),
            TokenKind::IfKeyword => Some("if"),
            TokenKind::ElseKeyword => Some("else"),
            TokenKind::ForKeyword => Some("for"),
            TokenKind::LoopKeyword => Some("loop"),
            TokenKind::ReturnKeyword => Some("return"),
            TokenKind::BreakKeyword => Some("break"),
            TokenKind::ContinueKeyword => Some("continue"),
            TokenKind::StructKeyword => Some("struct"),
            TokenKind::InterfaceKeyword => Some("interface"),
            TokenKind::TrueKeyword => Some("true"),
            TokenKind::FalseKeyword => Some("false"),
            _ => None,
        }
    }

    /// Look up the keyword table.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "let" => Some(TokenKind::LetKeyword),
            "const" => Some(TokenKind::ConstKeyword),
            "func" => Some(TokenKind::FuncKeyword),
            "if" => Some(TokenKind::IfKeyword),
            "else" => Some(TokenKind::ElseKeyword),
            "for" => Some(TokenKind::ForKeyword),
            "loop" => Some(TokenKind::LoopKeyword),
            "return" => Some(TokenKind::ReturnKeyword),
            "break" => Some(TokenKind::BreakKeyword),
            "continue" => Some(TokenKind::ContinueKeyword),
            "struct" => Some(TokenKind::StructKeyword),
            "interface" => Some(TokenKind::InterfaceKeyword),
            "true" => Some(TokenKind::TrueKeyword),
            "false" => Some(TokenKind::FalseKeyword),
            _ => None,
        }
    }

    /// Get the fixed text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::SemicolonToken => Some(";"),
            TokenKind::CommaToken => Some(","),
            TokenKind::ColonToken => Some(":"),
            TokenKind::OpenParenToken => Some("("),
            TokenKind::CloseParenToken => Some(")"),
            TokenKind::OpenBraceToken => Some("{"),
            TokenKind::CloseBraceToken => Some("}"),
            TokenKind::OpenBracketToken => Some("["),
            TokenKind::CloseBracketToken => Some("]"),
            TokenKind::TildeToken => Some("~"),
            TokenKind::DotToken => Some("."),
            TokenKind::DotDotToken => Some(".."),
            TokenKind::DotDotDotToken => Some("..."),
            TokenKind::EqualsToken => Some("="),
            TokenKind::EqualsEqualsToken => Some("=="),
            TokenKind::EqualsGreaterThanToken => Some("=>"),
            TokenKind::ExclamationToken => Some("!"),
            TokenKind::ExclamationEqualsToken => Some("!="),
            TokenKind::PlusToken => Some("+"),
            TokenKind::PlusPlusToken => Some("++"),
            TokenKind::PlusEqualsToken => Some("+="),
            TokenKind::MinusToken => Some("-"),
            TokenKind::MinusMinusToken => Some("--"),
            TokenKind::MinusEqualsToken => Some("-="),
            TokenKind::AsteriskToken => Some("*"),
            TokenKind::AsteriskAsteriskToken => Some("**"),
            TokenKind::AsteriskEqualsToken => Some("*="),
            TokenKind::SlashToken => Some("/"),
            TokenKind::SlashEqualsToken => Some("/="),
            TokenKind::PercentToken => Some("%"),
            TokenKind::PercentEqualsToken => Some("%="),
            TokenKind::AmpersandToken => Some("&"),
            TokenKind::AmpersandAmpersandToken => Some("&&"),
            TokenKind::AmpersandEqualsToken => Some("&="),
            TokenKind::BarToken => Some("|"),
            TokenKind::BarBarToken => Some("||"),
            TokenKind::BarEqualsToken => Some("|="),
            TokenKind::CaretToken => Some("^"),
            TokenKind::CaretEqualsToken => Some("^="),
            TokenKind::LessThanToken => Some("<"),
            TokenKind::LessThanEqualsToken => Some("<="),
            TokenKind::LessThanLessThanToken => Some("<<"),
            TokenKind::LessThanLessThanEqualsToken => Some("<<="),
            TokenKind::GreaterThanToken => Some(">"),
            TokenKind::GreaterThanEqualsToken => Some(">="),
            TokenKind::GreaterThanGreaterThanToken => Some(">>"),
            TokenKind::GreaterThanGreaterThanEqualsToken => Some(">>="),
            TokenKind::QuestionToken => Some("?"),
            TokenKind::QuestionQuestionToken => Some("??"),
            TokenKind::QuestionDotToken => Some("?."),
            TokenKind::TemplateStringQuote => Some("`"),
            TokenKind::InterpolationStart => Some("${"),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_round_trips() {
        for kind in [
            TokenKind::LetKeyword,
            TokenKind::ConstKeyword,
            TokenKind::FuncKeyword,
            TokenKind::IfKeyword,
            TokenKind::ElseKeyword,
            TokenKind::ForKeyword,
            TokenKind::LoopKeyword,
            TokenKind::ReturnKeyword,
            TokenKind::BreakKeyword,
            TokenKind::ContinueKeyword,
            TokenKind::StructKeyword,
            TokenKind::InterfaceKeyword,
            TokenKind::TrueKeyword,
            TokenKind::FalseKeyword,
        ] {
            let text = kind.keyword_text().unwrap();
            assert_eq!(TokenKind::from_keyword(text), Some(kind));
            assert!(kind.is_keyword());
        }
        assert_eq!(TokenKind::from_keyword("function"), None);
        assert_eq!(TokenKind::from_keyword("Let"), None);
    }

    #[test]
    fn test_kind_ranges() {
        assert!(TokenKind::SemicolonToken.is_punctuation());
        assert!(TokenKind::QuestionDotToken.is_punctuation());
        assert!(!TokenKind::LineBreak.is_punctuation());
        assert!(TokenKind::HexIntegerLiteral.is_number());
        assert!(!TokenKind::RuneLiteral.is_number());
        assert!(TokenKind::StringLiteral.is_literal());
        assert!(TokenKind::InterpolationStart.is_template());
        assert!(!TokenKind::Identifier.is_keyword());
    }

    #[test]
    fn test_assignment_operators() {
        assert!(TokenKind::LessThanLessThanEqualsToken.is_assignment_operator());
        assert!(TokenKind::EqualsToken.is_assignment_operator());
        assert!(!TokenKind::EqualsEqualsToken.is_assignment_operator());
    }

    #[test]
    fn test_punctuation_text() {
        assert_eq!(TokenKind::DotDotDotToken.punctuation_text(), Some("..."));
        assert_eq!(TokenKind::InterpolationStart.punctuation_text(), Some("${"));
        assert_eq!(TokenKind::Identifier.punctuation_text(), None);
    }
}
