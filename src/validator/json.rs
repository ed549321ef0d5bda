use tracing::debug;

use crate::{
    lexer::LexError,
    metadata::Metadata,
    tokenizer::JsonTokenizer,
    validator::{QueryValidator, ValidationError},
};

/// Validator for the nested-array JSON grammar.
#[derive(Debug)]
pub struct JsonValidator<'m> {
    tokenizer: JsonTokenizer<'m>,
}

impl<'m> JsonValidator<'m> {
    pub fn new(metadata: &'m Metadata) -> Result<Self, LexError> {
        Ok(JsonValidator {
            tokenizer: JsonTokenizer::new(metadata)?,
        })
    }
}

impl QueryValidator for JsonValidator<'_> {
    fn validate(&self, query: &str) -> Result<(), ValidationError> {
        let Some(node) = self.tokenizer.tokenize(query)? else {
            return Ok(());
        };

        match node.find_invalid() {
            Some(token) => {
                debug!(query, token = %token.value, "invalid token");
                Err(ValidationError::InvalidToken(token.raw()))
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::Operator,
        metadata::{Field, FieldType},
        tokenizer::TokenizeError,
    };

    #[test]
    fn test_validate_json() {
        let metadata = Metadata::new(vec![
            Field::new("a", "", FieldType::Date).with_operators([Operator::LessThan]),
        ]);
        let validator = JsonValidator::new(&metadata).unwrap();

        assert!(validator.validate("[]").is_ok());
        assert!(validator.validate(r#"["a", "<", "2024-01-01"]"#).is_ok());
        assert!(validator.validate(r#"["And", [["a", "<", "2024-01-01"], ["a", "less than", "2025-01-01"]]]"#).is_ok());

        assert!(matches!(
            validator.validate(r#"["a", "<", "yesterday"]"#),
            Err(ValidationError::InvalidToken(t)) if t == "yesterday"
        ));
        assert!(matches!(
            validator.validate(r#"["a", "<"]"#),
            Err(ValidationError::Tokenize(TokenizeError::NotAnArray))
        ));
        assert!(matches!(
            validator.validate("not json"),
            Err(ValidationError::Tokenize(TokenizeError::Json(_)))
        ));
    }
}
