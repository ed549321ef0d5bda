use tracing::debug;

use crate::{
    ast::TokenKind,
    lexer::LexError,
    metadata::Metadata,
    tokenizer::TextTokenizer,
    validator::{QueryValidator, ValidationError},
};

/// Validator for the free-text grammar.
#[derive(Debug)]
pub struct TextValidator<'m> {
    tokenizer: TextTokenizer<'m>,
}

impl<'m> TextValidator<'m> {
    pub fn new(metadata: &'m Metadata) -> Result<Self, LexError> {
        Ok(TextValidator {
            tokenizer: TextTokenizer::new(metadata)?,
        })
    }
}

impl QueryValidator for TextValidator<'_> {
    fn validate(&self, query: &str) -> Result<(), ValidationError> {
        let tokens = self.tokenizer.tokenize(query);

        if let Some(token) = tokens.iter().find(|token| token.is_invalid()) {
            debug!(query, token = %token.value, "invalid token");
            return Err(ValidationError::InvalidToken(token.raw()));
        }

        let open = tokens.iter().filter(|t| t.kind == TokenKind::OpenGroup).count();
        let close = tokens.iter().filter(|t| t.kind == TokenKind::CloseGroup).count();
        if open != close {
            return Err(ValidationError::MismatchedGroups { open, close });
        }

        let last = tokens.iter().rev().find(|t| t.kind != TokenKind::Space);
        match last {
            None => Ok(()),
            Some(token)
                if token.kind.is_field()
                    || token.kind.is_comparer()
                    || token.kind.is_separator()
                    || token.kind.is_logic()
                    || token.kind == TokenKind::OpenGroup =>
            {
                Err(ValidationError::IncompleteExpression(token.raw()))
            }
            Some(_) => Ok(()),
        }
    }
}
