//! Validate or compile sift queries against a schema

use tracing::info;

use super::CliError;
use crate::{
    JsonParser, JsonValidator, Metadata, QueryParser, QueryValidator, TextParser, TextValidator,
    output::to_json,
};

/// Query grammar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grammar {
    /// `field operator value and ...`
    #[default]
    Text,
    /// `["And", [["field", "Operator", value], ...]]`
    Json,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to check
    pub query: String,
    /// Schema JSON
    pub schema: String,
    /// Grammar the query is written in
    pub grammar: Grammar,
    /// Only validate, don't compile
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Validation passed
    Valid,
    /// The query is empty
    Empty,
    /// Compiled expression in JSON grammar form
    Expression(serde_json::Value),
}

/// Execute a sift check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let metadata = Metadata::from_json(&options.schema).map_err(CliError::Schema)?;
    info!(fields = metadata.fields.len(), grammar = ?options.grammar, "loaded schema");

    if options.syntax_only {
        let validator: Box<dyn QueryValidator + '_> = match options.grammar {
            Grammar::Text => Box::new(TextValidator::new(&metadata)?),
            Grammar::Json => Box::new(JsonValidator::new(&metadata)?),
        };
        validator.validate(&options.query)?;
        return Ok(CheckResult::Valid);
    }

    let parser: Box<dyn QueryParser + '_> = match options.grammar {
        Grammar::Text => Box::new(TextParser::new(&metadata)?),
        Grammar::Json => Box::new(JsonParser::new(&metadata)?),
    };
    Ok(match parser.parse(&options.query)? {
        Some(expr) => CheckResult::Expression(to_json(&expr)),
        None => CheckResult::Empty,
    })
}
