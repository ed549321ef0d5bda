use tracing::debug;

use crate::{
    ast::Expression,
    lexer::LexError,
    metadata::Metadata,
    parser::{ParseError, QueryParser, to_expression},
    tokenizer::JsonTokenizer,
};

/// Parser for the nested-array JSON grammar.
///
/// ```text
/// ["And", [["Value1", "Equal", "Test1"], ["Value2", "In", ["a", "b"]]]]
/// ```
#[derive(Debug)]
pub struct JsonParser<'m> {
    metadata: &'m Metadata,
    tokenizer: JsonTokenizer<'m>,
}

impl<'m> JsonParser<'m> {
    pub fn new(metadata: &'m Metadata) -> Result<Self, LexError> {
        Ok(JsonParser {
            metadata,
            tokenizer: JsonTokenizer::new(metadata)?,
        })
    }

    /// Parse an already decoded JSON query.
    pub fn parse_value(&self, query: &serde_json::Value) -> Result<Option<Expression>, ParseError> {
        self.tokenizer
            .tokenize_value(query)?
            .map(|node| to_expression(node, self.metadata))
            .transpose()
    }
}

impl QueryParser for JsonParser<'_> {
    fn parse(&self, query: &str) -> Result<Option<Expression>, ParseError> {
        let result = self
            .tokenizer
            .tokenize(query)
            .map_err(ParseError::from)
            .and_then(|node| {
                node.map(|node| to_expression(node, self.metadata))
                    .transpose()
            });
        match &result {
            Ok(_) => debug!(query, "parsed JSON query"),
            Err(e) => debug!(query, error = %e, "failed to parse JSON query"),
        }
        result
    }
}
