//! Acceptance checks that run without building an expression.
//!
//! A query validates exactly when it parses.

pub mod json;
pub mod text;

use thiserror::Error;

use crate::{lexer::LexError, tokenizer::TokenizeError};

pub use json::JsonValidator;
pub use text::TextValidator;

/// A query grammar acceptance check.
pub trait QueryValidator {
    fn validate(&self, query: &str) -> Result<(), ValidationError>;
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error("invalid token '{0}'")]
    InvalidToken(String),

    #[error("mismatched groups: {open} '(' and {close} ')'")]
    MismatchedGroups { open: usize, close: usize },

    /// The query ends on a field, operator, separator, logic or `(`
    #[error("query ends after '{0}'")]
    IncompleteExpression(String),
}
