use serde_json::Value as Json;
use tracing::debug;

use crate::{
    ast::{Logic, Node, Operand, Token, TokenKind},
    lexer::{Context, LexError, Lexer},
    metadata::Metadata,
    tokenizer::TokenizeError,
    value::Value,
};

/// Tokenizes nested-array queries into a [`Node`] tree.
///
/// Fields, operators and values are matched against the lexer's pattern
/// table and classified with the smallest context the text grammar would
/// have at that point: nothing before a field, the field before an operator.
#[derive(Debug)]
pub struct JsonTokenizer<'m> {
    lexer: Lexer<'m>,
}

impl<'m> JsonTokenizer<'m> {
    pub fn new(metadata: &'m Metadata) -> Result<Self, LexError> {
        Ok(JsonTokenizer {
            lexer: Lexer::new(metadata)?,
        })
    }

    /// Tokenize a JSON query. The empty array `[]` is the empty query.
    pub fn tokenize(&self, json: &str) -> Result<Option<Node>, TokenizeError> {
        let query: Json = serde_json::from_str(json)?;
        let node = self.tokenize_value(&query)?;
        debug!(query = json, empty = node.is_none(), "tokenized JSON query");
        Ok(node)
    }

    pub fn tokenize_value(&self, query: &Json) -> Result<Option<Node>, TokenizeError> {
        match query {
            Json::Array(items) if items.is_empty() => Ok(None),
            _ => self.node(query).map(Some),
        }
    }

    fn node(&self, query: &Json) -> Result<Node, TokenizeError> {
        let items = query.as_array().ok_or(TokenizeError::NotAnArray)?;
        match items.as_slice() {
            [field, operator, operand] => self.leaf(field, operator, operand),
            [logic, children] => self.logic(logic, children),
            _ => Err(TokenizeError::InvalidArity(items.len())),
        }
    }

    fn leaf(&self, field: &Json, operator: &Json, operand: &Json) -> Result<Node, TokenizeError> {
        let metadata = self.lexer.metadata();

        let context = Context::new();
        let field = self.classify(&context, string(field)?, TokenKind::is_field);
        let context = context.push(&field, metadata);
        let operator = self.classify(&context, string(operator)?, TokenKind::is_operator);
        let context = context.push(&operator, metadata);

        let operand = match operand {
            Json::Array(values) => Operand::List(self.values(context, values)?),
            scalar => Operand::Single(self.value(&context, &scalar_text(scalar)?)),
        };

        Ok(Node::Leaf {
            field,
            operator,
            operand,
        })
    }

    fn logic(&self, logic: &Json, children: &Json) -> Result<Node, TokenizeError> {
        let keyword = string(logic)?;
        let logic = match Logic::from_keyword(keyword) {
            Logic::And => Token::text(TokenKind::And, keyword),
            Logic::Or => Token::text(TokenKind::Or, keyword),
            Logic::Unknown => Token::invalid(keyword),
        };

        let children = children.as_array().ok_or(TokenizeError::NotAnArray)?;
        if children.is_empty() {
            return Err(TokenizeError::EmptyList);
        }
        let children = children
            .iter()
            .map(|child| self.node(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Node::Logic { logic, children })
    }

    /// Elements after the first are classified behind a separator, so lists
    /// are only accepted where the text grammar would accept them.
    fn values(&self, context: Context<'m>, values: &[Json]) -> Result<Vec<Token>, TokenizeError> {
        if values.is_empty() {
            return Err(TokenizeError::EmptyList);
        }

        let metadata = self.lexer.metadata();
        let mut context = context;
        let mut tokens: Vec<Token> = Vec::with_capacity(values.len());
        for value in values {
            if let Some(previous) = tokens.last() {
                context = context.push(previous, metadata);
                let separator = self
                    .lexer
                    .create_token(&context, TokenKind::Comma, ",")
                    .unwrap_or_else(|| Token::invalid(","));
                context = context.push(&separator, metadata);
            }
            tokens.push(self.value(&context, &scalar_text(value)?));
        }
        Ok(tokens)
    }

    fn value(&self, context: &Context<'m>, text: &str) -> Token {
        let operand_less = context.operator.is_some_and(|op| op.is_not_comparer());
        if operand_less && text.is_empty() {
            return Token::new(TokenKind::Value, Value::String(String::new()));
        }

        let token = match self.lexer.find_exact(text) {
            Some(kind) => self
                .lexer
                .create_token(context, kind, text)
                .unwrap_or_else(|| Token::invalid(text)),
            None if self.lexer.accepts_text(context) && context.expects_value() => {
                self.lexer.value_token(context, text)
            }
            None => Token::invalid(text),
        };
        slot(token, text, TokenKind::is_value)
    }

    fn classify(&self, context: &Context<'m>, text: &str, expected: fn(TokenKind) -> bool) -> Token {
        let token = self
            .lexer
            .find_exact(text)
            .and_then(|kind| self.lexer.create_token(context, kind, text))
            .unwrap_or_else(|| Token::invalid(text));
        slot(token, text, expected)
    }
}

/// Each array position holds one kind of token. A token the classifier
/// accepted as something else, such as `and` after `Blank`, is invalid there.
fn slot(token: Token, text: &str, expected: fn(TokenKind) -> bool) -> Token {
    if token.is_invalid() || expected(token.kind) {
        token
    } else {
        Token::invalid(text)
    }
}

fn string(value: &Json) -> Result<&str, TokenizeError> {
    value.as_str().ok_or(TokenizeError::ExpectedString)
}

/// Literal text of a scalar operand. `null` is the empty operand.
fn scalar_text(value: &Json) -> Result<String, TokenizeError> {
    match value {
        Json::String(s) => Ok(s.clone()),
        Json::Number(n) => Ok(n.to_string()),
        Json::Bool(b) => Ok(b.to_string()),
        Json::Null => Ok(String::new()),
        Json::Array(_) | Json::Object(_) => Err(TokenizeError::ExpectedScalar),
    }
}
