//! Front-ends driving the [`Lexer`](crate::lexer::Lexer).
//!
//! - [`TextTokenizer`] scans free text into a flat token stream.
//! - [`JsonTokenizer`] walks a nested JSON array into a [`Node`](crate::ast::Node) tree.
//!
//! Both classify through the same [`Lexer::create_token`](crate::lexer::Lexer::create_token),
//! so the grammar rules are identical across the two.

pub mod json;
pub mod text;

use thiserror::Error;

pub use json::JsonTokenizer;
pub use text::TextTokenizer;

/// Structural failures of JSON queries.
#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an array")]
    NotAnArray,

    /// Neither a `[field, operator, value]` leaf nor a `[logic, [children]]` node
    #[error("expected an array of 2 or 3 elements, found {0}")]
    InvalidArity(usize),

    #[error("expected a string")]
    ExpectedString,

    #[error("expected a string, number, boolean or null value")]
    ExpectedScalar,

    #[error("empty list")]
    EmptyList,
}
