//! Parsers folding tokens into an [`Expression`].
//!
//! Both grammars build the same [`Node`] tree and share [`to_expression`]
//! for the final conversion, so equivalent leaves compile to equal
//! [`OperatorExpression`](crate::ast::OperatorExpression)s whichever grammar
//! they were written in.
//!
//! Chained logic differs in shape: the text grammar nests to the right
//! (`a and b and c` is `and[a, and[b, c]]`), while a JSON logic node keeps
//! all of its children in one list.

pub mod json;
pub mod text;

use thiserror::Error;

use crate::{
    ast::{Expression, Logic, Node, Operand, Operator, Token, TokenKind},
    lexer::LexError,
    metadata::Metadata,
    tokenizer::TokenizeError,
    value::Value,
};

pub use json::JsonParser;
pub use text::TextParser;

/// A query grammar front-end.
pub trait QueryParser {
    /// Compile `query`. `Ok(None)` is the empty query.
    fn parse(&self, query: &str) -> Result<Option<Expression>, ParseError>;
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// Text that is not acceptable at its position
    #[error("invalid token '{0}'")]
    InvalidToken(String),

    /// A valid token in a position the fold does not expect
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown logic '{0}'")]
    UnknownLogic(String),

    #[error("invalid value '{0}'")]
    InvalidValue(String),

    #[error("unclosed group")]
    UnclosedGroup,

    #[error("unexpected ')'")]
    UnexpectedCloseGroup,

    #[error("incomplete expression")]
    IncompleteExpression,
}

/// Convert a token tree into an expression, resolving fields, operators
/// and logic against `metadata`.
pub fn to_expression(node: Node, metadata: &Metadata) -> Result<Expression, ParseError> {
    match node {
        Node::Leaf {
            field,
            operator,
            operand,
        } => {
            let name = field.raw();
            let field = match field.kind {
                TokenKind::Field => metadata.field(&name),
                _ => None,
            }
            .ok_or(ParseError::UnknownField(name))?;

            let resolved = Operator::from(operator.kind);
            if resolved == Operator::Unknown {
                return Err(ParseError::UnknownOperator(operator.raw()));
            }

            let value = match operand {
                Operand::Single(token) => operand_value(token)?,
                Operand::List(tokens) => Value::List(
                    tokens
                        .into_iter()
                        .map(operand_value)
                        .collect::<Result<_, _>>()?,
                ),
            };

            Ok(Expression::operator(
                field.field_type,
                field.name.clone(),
                resolved,
                value,
            ))
        }
        Node::Logic { logic, children } => {
            let resolved = Logic::from(logic.kind);
            if resolved == Logic::Unknown {
                return Err(ParseError::UnknownLogic(logic.raw()));
            }

            let expressions = children
                .into_iter()
                .map(|child| to_expression(child, metadata))
                .collect::<Result<_, _>>()?;
            Ok(Expression::logic(resolved, expressions))
        }
    }
}

fn operand_value(token: Token) -> Result<Value, ParseError> {
    if token.kind.is_value() {
        Ok(token.value)
    } else {
        Err(ParseError::InvalidValue(token.raw()))
    }
}
