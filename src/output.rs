//! JSON grammar rendering of compiled expressions.
//!
//! [`to_json()`] produces the nested-array form the
//! [`JsonParser`](crate::JsonParser) reads, so a compiled expression can be
//! stored or sent elsewhere and compiled again against the same schema.
//!
//! - leaves → `["field", "Operator", value]`, list operands as arrays
//! - logic → `["And", [child, ...]]`
//! - numbers and booleans stay JSON numbers and booleans; dates, datetimes
//!   and times are rendered as strings in the form the lexer reads back
//! - strings that would lex as a keyword (`and`, `in`, `(`), or that begin or
//!   end with a quote, are wrapped in `"`; reading them strips it again
//!
//! # Examples
//!
//! ```
//! use sift_lang::{Expression, Operator, Value};
//! use sift_lang::metadata::FieldType;
//! use sift_lang::output::to_json_string;
//!
//! let expr = Expression::operator(FieldType::Number, "age", Operator::GreaterThan, Value::Number(18.0));
//! assert_eq!(to_json_string(&expr), r#"["age","GreaterThan",18.0]"#);
//! ```

use serde_json::{Value as Json, json};

use crate::{ast::Expression, lexer::is_keyword, value::Value};

pub fn to_json(expr: &Expression) -> Json {
    match expr {
        Expression::Operator(leaf) => json!([
            leaf.field_name,
            leaf.operator.name(),
            value_to_json(&leaf.value)
        ]),
        Expression::Logic(node) => json!([
            node.logic.name(),
            node.expressions.iter().map(to_json).collect::<Vec<_>>()
        ]),
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) if needs_quotes(s) => Json::String(format!("\"{}\"", s)),
        Value::String(s) => Json::String(s.clone()),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Boolean(b) => Json::Bool(*b),
        Value::List(values) => Json::Array(values.iter().map(value_to_json).collect()),
        Value::Date(_) | Value::DateTime(_) | Value::Time(_) => Json::String(value.to_string()),
    }
}

fn needs_quotes(text: &str) -> bool {
    let quote = ['"', '\''];
    is_keyword(text) || text.starts_with(quote) || text.ends_with(quote)
}

/// Compact JSON grammar text.
pub fn to_json_string(expr: &Expression) -> String {
    to_json(expr).to_string()
}

/// JSON grammar text with 2-space indentation.
pub fn to_json_pretty(expr: &Expression) -> String {
    serde_json::to_string_pretty(&to_json(expr)).unwrap_or_default()
}
