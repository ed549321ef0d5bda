//! Pattern-table lexer with a context-sensitive classifier.
//!
//! Lexing is two steps. [`Lexer::find`] runs an ordered table of anchored,
//! case-insensitive patterns over the start of the remaining input and
//! reports the first one that matches, regardless of match length. That
//! only yields a *candidate* kind. [`Lexer::create_token`] then decides the
//! effective kind from the tokens accepted so far, summarised in a
//! [`Context`]: the same text may become a field, a casted value of the
//! current field's type, or an invalid token.
//!
//! Table order, front to back:
//!
//! 1. punctuation: `(` `)` `,` `/`
//! 2. logic: `and` `&&` `or` `||`
//! 3. comparers: `=` `!=` `>=` `>` `<=` `<` and their keyword forms
//! 4. operand-less operators: `[]` `![]` `blank` `not blank`
//! 5. string matching: `~*` `!~*` `*~` `!*~` `~` `!~` and keyword forms
//! 6. sets: `in` `not in`
//! 7. one label pattern and one name pattern per schema field
//! 8. literal shapes: quoted string, datetime, date, clock time,
//!    duration, number, boolean, then any identifier-shaped text
//!
//! Keywords come before fields, so a field named `and` is never reachable.

mod context;

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::trace;

use crate::{
    ast::{Operator, Token, TokenKind},
    metadata::{Field, FieldType, Metadata},
    value::{Value, strip_quotes},
};

pub use context::Context;

#[derive(Debug, Error)]
pub enum LexError {
    /// A pattern derived from a field name or label did not compile
    #[error("invalid pattern for field '{field}': {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// An anchored regex and the candidate kind it produces.
#[derive(Debug)]
struct Pattern {
    regex: Regex,
    kind: TokenKind,
}

impl Pattern {
    fn new(source: &str, kind: TokenKind) -> Self {
        let regex = Regex::new(&format!("(?i)^(?:{})", source))
            .unwrap_or_else(|e| panic!("invalid builtin pattern {:?}: {}", source, e));
        Pattern { regex, kind }
    }

    fn field(text: &str, field: &Field) -> Result<Self, LexError> {
        let boundary = if text.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let regex = Regex::new(&format!("(?i)^{}{}", regex::escape(text), boundary)).map_err(
            |source| LexError::Pattern {
                field: field.name.clone(),
                source,
            },
        )?;
        Ok(Pattern {
            regex,
            kind: TokenKind::Field,
        })
    }
}

static KEYWORDS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        Pattern::new(r"\(", TokenKind::OpenGroup),
        Pattern::new(r"\)", TokenKind::CloseGroup),
        Pattern::new(r",", TokenKind::Comma),
        Pattern::new(r"/", TokenKind::Slash),
        Pattern::new(r"and\b|&&", TokenKind::And),
        Pattern::new(r"or\b|\|\|", TokenKind::Or),
        Pattern::new(r"=|equal\b", TokenKind::Equal),
        Pattern::new(r"!=|not\s*equal\b", TokenKind::NotEqual),
        Pattern::new(r">=|greater\s*than\s*or\s*equal\b", TokenKind::GreaterThanOrEqual),
        Pattern::new(r">|greater\s*than\b", TokenKind::GreaterThan),
        Pattern::new(r"<=|less\s*than\s*or\s*equal\b", TokenKind::LessThanOrEqual),
        Pattern::new(r"<|less\s*than\b", TokenKind::LessThan),
        Pattern::new(r"\[\]|blank\b", TokenKind::Blank),
        Pattern::new(r"!\[\]|not\s*blank\b", TokenKind::NotBlank),
        Pattern::new(r"~\*|starts?\s*with\b", TokenKind::StartWith),
        Pattern::new(r"!~\*|not\s*starts?\s*with\b", TokenKind::NotStartWith),
        Pattern::new(r"\*~|ends?\s*with\b", TokenKind::EndWith),
        Pattern::new(r"!\*~|not\s*ends?\s*with\b", TokenKind::NotEndWith),
        Pattern::new(r"~|contains?\b", TokenKind::Contain),
        Pattern::new(r"!~|not\s*contains?\b", TokenKind::NotContain),
        Pattern::new(r"in\b", TokenKind::In),
        Pattern::new(r"not\s*in\b", TokenKind::NotIn),
    ]
});

static LITERALS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        Pattern::new(r#""[^"]*"|'[^']*'"#, TokenKind::StringValue),
        Pattern::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}(?::\d{2})?\b", TokenKind::DateTimeValue),
        Pattern::new(r"\d{4}-\d{2}-\d{2}\b", TokenKind::DateValue),
        Pattern::new(r"\d{2}:\d{2}(?::\d{2})?\b", TokenKind::TimeValue),
        // Every group is optional: an empty match here means "no match".
        Pattern::new(r"(?:\d+h)?(?: ?\d+m)?(?: ?\d+s)?\b", TokenKind::TimeValue),
        Pattern::new(r"[-+]?\d+(?:\.\d+)?\b", TokenKind::NumberValue),
        Pattern::new(r"(?:true|false)\b", TokenKind::BooleanValue),
        Pattern::new(r#"[^\s(),/"'=<>!~*\[\]&|]+"#, TokenKind::Literal),
    ]
});

/// Whether all of `text` lexes as punctuation, logic or an operator.
///
/// Keywords come first in every table, so this holds for any schema.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS
        .iter()
        .find_map(|pattern| pattern.regex.find(text))
        .is_some_and(|matched| matched.len() == text.len())
}

/// Pattern table and classifier for one schema.
///
/// Field patterns are compiled once here; keyword and literal patterns are
/// shared by every lexer.
#[derive(Debug)]
pub struct Lexer<'m> {
    metadata: &'m Metadata,
    fields: Vec<Pattern>,
}

impl<'m> Lexer<'m> {
    pub fn new(metadata: &'m Metadata) -> Result<Self, LexError> {
        let mut fields = Vec::with_capacity(metadata.fields.len() * 2);
        for field in &metadata.fields {
            if !field.label.is_empty() {
                fields.push(Pattern::field(&field.label, field)?);
            }
            fields.push(Pattern::field(&field.name, field)?);
        }
        Ok(Lexer { metadata, fields })
    }

    pub fn metadata(&self) -> &'m Metadata {
        self.metadata
    }

    fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        KEYWORDS
            .iter()
            .chain(self.fields.iter())
            .chain(LITERALS.iter())
    }

    /// First pattern matching the start of `text`, with the matched slice.
    ///
    /// Empty matches, and matches that begin with whitespace, do not count.
    pub fn find<'t>(&self, text: &'t str) -> Option<(TokenKind, &'t str)> {
        self.patterns().find_map(|pattern| {
            let matched = pattern.regex.find(text)?.as_str();
            if matched.is_empty() || matched.starts_with(char::is_whitespace) {
                None
            } else {
                Some((pattern.kind, matched))
            }
        })
    }

    /// Like [`Lexer::find`], but only when the first match spans all of `text`.
    pub fn find_exact(&self, text: &str) -> Option<TokenKind> {
        match self.find(text) {
            Some((kind, matched)) if matched.len() == text.len() => Some(kind),
            _ => None,
        }
    }

    /// Classify a candidate against what has been accepted so far.
    ///
    /// Returns `None` only for a redundant space. Everything else yields a
    /// token, with kind [`TokenKind::None`] when the candidate is not
    /// acceptable here.
    pub fn create_token(
        &self,
        context: &Context<'m>,
        kind: TokenKind,
        raw: &str,
    ) -> Option<Token> {
        let token = match kind {
            TokenKind::Space => {
                if context.last == Some(TokenKind::Space) {
                    return None;
                }
                Token::text(TokenKind::Space, raw)
            }
            TokenKind::None => Token::invalid(raw),
            TokenKind::Field | TokenKind::Literal => {
                if context.expects_field() {
                    self.field_token(raw)
                } else if context.expects_value() {
                    self.value_token(context, raw)
                } else {
                    Token::invalid(raw)
                }
            }
            TokenKind::Value
            | TokenKind::StringValue
            | TokenKind::NumberValue
            | TokenKind::BooleanValue
            | TokenKind::DateValue
            | TokenKind::TimeValue
            | TokenKind::DateTimeValue => {
                if context.expects_value() {
                    self.value_token(context, raw)
                } else {
                    Token::invalid(raw)
                }
            }
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
            | TokenKind::Blank
            | TokenKind::NotBlank => {
                let allowed = context.previous == Some(TokenKind::Field)
                    && context
                        .field
                        .is_some_and(|field| field.allows(Operator::from(kind)));
                if allowed {
                    Token::text(kind, raw)
                } else {
                    Token::invalid(raw)
                }
            }
            TokenKind::And | TokenKind::Or => {
                if context.is_complete() {
                    Token::text(kind, raw)
                } else {
                    Token::invalid(raw)
                }
            }
            TokenKind::OpenGroup => {
                if context.expects_field() {
                    Token::text(kind, raw)
                } else {
                    Token::invalid(raw)
                }
            }
            TokenKind::CloseGroup => {
                if context.open > context.close && context.is_complete() {
                    Token::text(kind, raw)
                } else {
                    Token::invalid(raw)
                }
            }
            TokenKind::Comma | TokenKind::Slash => {
                let multiple = context
                    .operator
                    .is_some_and(|op| op.is_comparer() && op.allows_multiple_values());
                if multiple && context.previous.is_some_and(TokenKind::is_value) {
                    Token::text(kind, raw)
                } else {
                    Token::invalid(raw)
                }
            }
        };

        if token.is_invalid() {
            trace!(candidate = %kind, raw, "rejected token");
        } else {
            trace!(kind = %token.kind, value = %token.value, "accepted token");
        }
        Some(token)
    }

    /// A field token carrying the field's canonical name.
    fn field_token(&self, raw: &str) -> Token {
        match self.metadata.field(raw) {
            Some(field) => Token::text(TokenKind::Field, &field.name),
            None => Token::invalid(raw),
        }
    }

    /// Resolve `raw` as an operand of the current field: substitute a lookup,
    /// check it against the field type and cast it. Operand-less operators
    /// reject any operand.
    pub fn value_token(&self, context: &Context<'m>, raw: &str) -> Token {
        let Some(field) = context.field else {
            return Token::invalid(raw);
        };
        let text = field
            .lookup(raw)
            .or_else(|| field.lookup(strip_quotes(raw)))
            .map_or(raw, |lookup| lookup.value.as_str());

        match Value::cast(field.field_type, text) {
            Some(value) if context.operator.is_some_and(Operator::is_comparer) => {
                Token::new(TokenKind::value_of(field.field_type), value)
            }
            _ => Token::invalid(raw),
        }
    }

    /// Whether the current field accepts free text when nothing else matches.
    pub fn accepts_text(&self, context: &Context<'m>) -> bool {
        context
            .field
            .is_some_and(|field| field.field_type.element() == FieldType::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Field;

    fn metadata() -> Metadata {
        Metadata::new(vec![
            Field::new("value", "Value", FieldType::String)
                .with_operators([Operator::Equal, Operator::In, Operator::Blank]),
            Field::new("count", "", FieldType::Number).with_operators([Operator::Equal]),
        ])
    }

    #[test]
    fn test_first_match_wins() {
        let metadata = metadata();
        let lexer = Lexer::new(&metadata).unwrap();

        assert_eq!(lexer.find(">= 5"), Some((TokenKind::GreaterThanOrEqual, ">=")));
        assert_eq!(lexer.find("!~* x"), Some((TokenKind::NotStartWith, "!~*")));
        assert_eq!(lexer.find("not in (x)"), Some((TokenKind::NotIn, "not in")));
        assert_eq!(lexer.find("NotEqual"), Some((TokenKind::NotEqual, "NotEqual")));
        assert_eq!(lexer.find("Value = 1"), Some((TokenKind::Field, "Value")));
        assert_eq!(lexer.find("value2"), Some((TokenKind::Literal, "value2")));
        assert_eq!(lexer.find("android"), Some((TokenKind::Literal, "android")));
    }

    #[test]
    fn test_empty_duration_match_falls_through() {
        let metadata = metadata();
        let lexer = Lexer::new(&metadata).unwrap();

        assert_eq!(lexer.find("10"), Some((TokenKind::NumberValue, "10")));
        assert_eq!(lexer.find("1h 15m"), Some((TokenKind::TimeValue, "1h 15m")));
        assert_eq!(lexer.find("2hours"), Some((TokenKind::Literal, "2hours")));
        assert_eq!(lexer.find(" 5m"), None);
    }

    #[test]
    fn test_create_token_is_idempotent() {
        let metadata = metadata();
        let lexer = Lexer::new(&metadata).unwrap();
        let context = Context::new();

        let field = lexer.create_token(&context, TokenKind::Literal, "VALUE").unwrap();
        assert_eq!(field, Token::text(TokenKind::Field, "value"));
        let again = lexer.create_token(&context, field.kind, &field.raw()).unwrap();
        assert_eq!(again, field);

        let context = context.push(&field, &metadata);
        let operator = lexer.create_token(&context, TokenKind::Equal, "=").unwrap();
        let context = context.push(&operator, &metadata);

        let value = lexer.create_token(&context, TokenKind::StringValue, "\"Test\"").unwrap();
        assert_eq!(value, Token::new(TokenKind::StringValue, Value::String("Test".into())));
        let again = lexer.create_token(&context, value.kind, &value.raw()).unwrap();
        assert_eq!(again, value);
    }

    #[test]
    fn test_operator_must_be_declared() {
        let metadata = metadata();
        let lexer = Lexer::new(&metadata).unwrap();
        let context = Context::new();
        let field = lexer.create_token(&context, TokenKind::Field, "count").unwrap();
        let context = context.push(&field, &metadata);

        let token = lexer.create_token(&context, TokenKind::In, "in").unwrap();
        assert!(token.is_invalid());
        let token = lexer.create_token(&context, TokenKind::Equal, "equal").unwrap();
        assert_eq!(token.kind, TokenKind::Equal);
    }

    #[test]
    fn test_consecutive_spaces_collapse() {
        let metadata = metadata();
        let lexer = Lexer::new(&metadata).unwrap();
        let context = Context::new();

        let space = lexer.create_token(&context, TokenKind::Space, " ").unwrap();
        let context = context.push(&space, &metadata);
        assert_eq!(lexer.create_token(&context, TokenKind::Space, " "), None);
    }
}
