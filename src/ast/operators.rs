use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::TokenKind;

/// Comparison, membership and shape tests a field may allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (`=`, `equal`)
    Equal,
    /// Not equal (`!=`, `not equal`)
    NotEqual,
    /// Greater than (`>`, `greater than`)
    GreaterThan,
    /// Greater than or equal (`>=`, `greater than or equal`)
    GreaterThanOrEqual,
    /// Less than (`<`, `less than`)
    LessThan,
    /// Less than or equal (`<=`, `less than or equal`)
    LessThanOrEqual,
    /// Value is missing or empty (`[]`, `blank`)
    Blank,
    /// Value is present (`![]`, `not blank`)
    NotBlank,
    /// Substring or element match (`~`, `contain`)
    Contain,
    /// Negated substring or element match (`!~`, `not contain`)
    NotContain,
    /// Prefix match (`~*`, `start with`)
    StartWith,
    /// Negated prefix match (`!~*`, `not start with`)
    NotStartWith,
    /// Suffix match (`*~`, `end with`)
    EndWith,
    /// Negated suffix match (`!*~`, `not end with`)
    NotEndWith,
    /// Membership in a value list (`in`)
    In,
    /// Negated membership in a value list (`not in`)
    NotIn,
    /// Keyword that resolved to no operator
    Unknown,
}

impl Operator {
    pub const ALL: [Operator; 16] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::Blank,
        Operator::NotBlank,
        Operator::Contain,
        Operator::NotContain,
        Operator::StartWith,
        Operator::NotStartWith,
        Operator::EndWith,
        Operator::NotEndWith,
        Operator::In,
        Operator::NotIn,
    ];

    /// Operators that take an operand.
    pub fn is_comparer(self) -> bool {
        !matches!(self, Operator::Blank | Operator::NotBlank | Operator::Unknown)
    }

    /// Operators that take no operand.
    pub fn is_not_comparer(self) -> bool {
        matches!(self, Operator::Blank | Operator::NotBlank)
    }

    /// Operators whose operand may be a comma or slash separated list.
    pub fn allows_multiple_values(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Canonical keyword, as used by the JSON grammar.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Equal => "Equal",
            Operator::NotEqual => "NotEqual",
            Operator::GreaterThan => "GreaterThan",
            Operator::GreaterThanOrEqual => "GreaterThanOrEqual",
            Operator::LessThan => "LessThan",
            Operator::LessThanOrEqual => "LessThanOrEqual",
            Operator::Blank => "Blank",
            Operator::NotBlank => "NotBlank",
            Operator::Contain => "Contain",
            Operator::NotContain => "NotContain",
            Operator::StartWith => "StartWith",
            Operator::NotStartWith => "NotStartWith",
            Operator::EndWith => "EndWith",
            Operator::NotEndWith => "NotEndWith",
            Operator::In => "In",
            Operator::NotIn => "NotIn",
            Operator::Unknown => "Unknown",
        }
    }

    /// Keyword form used when rendering the text grammar.
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::Equal => "equal",
            Operator::NotEqual => "not equal",
            Operator::GreaterThan => "greater than",
            Operator::GreaterThanOrEqual => "greater than or equal",
            Operator::LessThan => "less than",
            Operator::LessThanOrEqual => "less than or equal",
            Operator::Blank => "blank",
            Operator::NotBlank => "not blank",
            Operator::Contain => "contain",
            Operator::NotContain => "not contain",
            Operator::StartWith => "start with",
            Operator::NotStartWith => "not start with",
            Operator::EndWith => "end with",
            Operator::NotEndWith => "not end with",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Unknown => "unknown",
        }
    }
}

impl From<TokenKind> for Operator {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Equal => Operator::Equal,
            TokenKind::NotEqual => Operator::NotEqual,
            TokenKind::GreaterThan => Operator::GreaterThan,
            TokenKind::GreaterThanOrEqual => Operator::GreaterThanOrEqual,
            TokenKind::LessThan => Operator::LessThan,
            TokenKind::LessThanOrEqual => Operator::LessThanOrEqual,
            TokenKind::Blank => Operator::Blank,
            TokenKind::NotBlank => Operator::NotBlank,
            TokenKind::Contain => Operator::Contain,
            TokenKind::NotContain => Operator::NotContain,
            TokenKind::StartWith => Operator::StartWith,
            TokenKind::NotStartWith => Operator::NotStartWith,
            TokenKind::EndWith => Operator::EndWith,
            TokenKind::NotEndWith => Operator::NotEndWith,
            TokenKind::In => Operator::In,
            TokenKind::NotIn => Operator::NotIn,
            TokenKind::None
            | TokenKind::Space
            | TokenKind::OpenGroup
            | TokenKind::CloseGroup
            | TokenKind::Comma
            | TokenKind::Slash
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Field
            | TokenKind::Value
            | TokenKind::StringValue
            | TokenKind::NumberValue
            | TokenKind::BooleanValue
            | TokenKind::DateValue
            | TokenKind::TimeValue
            | TokenKind::DateTimeValue
            | TokenKind::Literal => Operator::Unknown,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Boolean combinators joining two or more expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Logic {
    /// Logical AND (`and`, `&&`)
    And,
    /// Logical OR (`or`, `||`)
    Or,
    /// Keyword that resolved to no combinator
    Unknown,
}

impl Logic {
    /// Canonical keyword, as used by the JSON grammar.
    pub fn name(self) -> &'static str {
        match self {
            Logic::And => "And",
            Logic::Or => "Or",
            Logic::Unknown => "Unknown",
        }
    }

    /// Exact keyword lookup (case-insensitive, no pattern matching).
    pub fn from_keyword(keyword: &str) -> Logic {
        match keyword.to_ascii_lowercase().as_str() {
            "and" | "&&" => Logic::And,
            "or" | "||" => Logic::Or,
            _ => Logic::Unknown,
        }
    }
}

impl From<TokenKind> for Logic {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::And => Logic::And,
            TokenKind::Or => Logic::Or,
            TokenKind::None
            | TokenKind::Space
            | TokenKind::OpenGroup
            | TokenKind::CloseGroup
            | TokenKind::Comma
            | TokenKind::Slash
            | TokenKind::Field
            | TokenKind::Value
            | TokenKind::StringValue
            | TokenKind::NumberValue
            | TokenKind::BooleanValue
            | TokenKind::DateValue
            | TokenKind::TimeValue
            | TokenKind::DateTimeValue
            | TokenKind::Literal
            | TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::GreaterThan
            | TokenKind::GreaterThanOrEqual
            | TokenKind::LessThan
            | TokenKind::LessThanOrEqual
            | TokenKind::Blank
            | TokenKind::NotBlank
            | TokenKind::Contain
            | TokenKind::NotContain
            | TokenKind::StartWith
            | TokenKind::NotStartWith
            | TokenKind::EndWith
            | TokenKind::NotEndWith
            | TokenKind::In
            | TokenKind::NotIn => Logic::Unknown,
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
