//! CLI support for sift-lang
//!
//! Provides programmatic access to sift CLI functionality for embedding
//! in other tools.

mod check;
mod docs;
mod onboard;

pub use check::{CheckOptions, CheckResult, Grammar, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use onboard::get_onboarding_content;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid schema: {0}")]
    Schema(serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Lex(#[from] crate::LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Invalid query: {0}")]
    Validation(#[from] crate::ValidationError),

    #[error("Output error: {0}")]
    Output(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoQuery,

    #[error("Unknown category: '{0}'\nRun 'sift docs' to see available categories.")]
    UnknownCategory(String),
}
