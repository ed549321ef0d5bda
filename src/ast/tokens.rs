use std::fmt;

use crate::{metadata::FieldType, value::Value};

/// Lexical category of a [`Token`].
///
/// The kind a pattern produces is only a candidate: the lexer's context
/// classifier decides the effective kind, so a `Literal` may become a
/// `Field`, a typed value, or `None` depending on what precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Classification failed. The token still carries the offending text.
    None,
    /// Whitespace
    Space,

    // Grouping
    /// `(`
    OpenGroup,
    /// `)`
    CloseGroup,

    // Separators
    /// `,`
    Comma,
    /// `/`
    Slash,

    // Logic
    /// `and`, `&&`
    And,
    /// `or`, `||`
    Or,

    // Comparers
    /// `=`, `equal`
    Equal,
    /// `!=`, `not equal`
    NotEqual,
    /// `>`, `greater than`
    GreaterThan,
    /// `>=`, `greater than or equal`
    GreaterThanOrEqual,
    /// `<`, `less than`
    LessThan,
    /// `<=`, `less than or equal`
    LessThanOrEqual,
    /// `~`, `contain`
    Contain,
    /// `!~`, `not contain`
    NotContain,
    /// `~*`, `start with`
    StartWith,
    /// `!~*`, `not start with`
    NotStartWith,
    /// `*~`, `end with`
    EndWith,
    /// `!*~`, `not end with`
    NotEndWith,
    /// `in`
    In,
    /// `not in`
    NotIn,

    // Not comparers
    /// `[]`, `blank`
    Blank,
    /// `![]`, `not blank`
    NotBlank,

    /// A schema field, by name or label
    Field,

    // Values
    /// Untyped value, only synthesized for operand-less operators
    Value,
    /// Quoted string
    StringValue,
    /// Number
    NumberValue,
    /// `true` / `false`
    BooleanValue,
    /// `YYYY-MM-DD`
    DateValue,
    /// `HH:MM[:SS]` or duration shorthand such as `1h 15m`
    TimeValue,
    /// `YYYY-MM-DD HH:MM[:SS]`
    DateTimeValue,

    /// Unclassified identifier-shaped text
    Literal,
}

impl TokenKind {
    /// Operators that take an operand.
    pub fn is_comparer(self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::GreaterThan
                | TokenKind::GreaterThanOrEqual
                | TokenKind::LessThan
                | TokenKind::LessThanOrEqual
                | TokenKind::Contain
                | TokenKind::NotContain
                | TokenKind::StartWith
                | TokenKind::NotStartWith
                | TokenKind::EndWith
                | TokenKind::NotEndWith
                | TokenKind::In
                | TokenKind::NotIn
        )
    }

    /// Operators that take no operand.
    pub fn is_not_comparer(self) -> bool {
        matches!(self, TokenKind::Blank | TokenKind::NotBlank)
    }

    pub fn is_operator(self) -> bool {
        self.is_comparer() || self.is_not_comparer()
    }

    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::Value
                | TokenKind::StringValue
                | TokenKind::NumberValue
                | TokenKind::BooleanValue
                | TokenKind::DateValue
                | TokenKind::TimeValue
                | TokenKind::DateTimeValue
        )
    }

    pub fn is_logic(self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    pub fn is_separator(self) -> bool {
        matches!(self, TokenKind::Comma | TokenKind::Slash)
    }

    pub fn is_field(self) -> bool {
        self == TokenKind::Field
    }

    /// Positions after which a field is expected.
    pub fn is_pre_field(self) -> bool {
        self == TokenKind::OpenGroup || self.is_logic()
    }

    /// Kinds that close a leaf expression.
    pub fn is_complete(self) -> bool {
        self.is_value() || self.is_not_comparer() || self == TokenKind::CloseGroup
    }

    /// The typed value kind an accepted operand of `field_type` carries.
    pub fn value_of(field_type: FieldType) -> TokenKind {
        match field_type.element() {
            FieldType::Number => TokenKind::NumberValue,
            FieldType::Boolean => TokenKind::BooleanValue,
            FieldType::Date => TokenKind::DateValue,
            FieldType::Time => TokenKind::TimeValue,
            FieldType::DateTime => TokenKind::DateTimeValue,
            _ => TokenKind::StringValue,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One classified lexical unit.
///
/// Non-value tokens carry their matched text as a [`Value::String`]; field
/// tokens carry the canonical field name; value tokens carry the casted value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Value,
}

impl Token {
    pub fn new(kind: TokenKind, value: Value) -> Self {
        Token { kind, value }
    }

    /// A token holding raw text.
    pub fn text(kind: TokenKind, text: &str) -> Self {
        Token {
            kind,
            value: Value::String(text.to_string()),
        }
    }

    /// A token that failed classification.
    pub fn invalid(text: &str) -> Self {
        Token::text(TokenKind::None, text)
    }

    pub fn is_invalid(&self) -> bool {
        self.kind == TokenKind::None
    }

    /// Text form of the payload, suitable for reclassification.
    pub fn raw(&self) -> String {
        self.value.to_string()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}
