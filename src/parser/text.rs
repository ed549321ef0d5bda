use tracing::debug;

use crate::{
    ast::{Expression, Node, Operand, Token, TokenKind},
    lexer::LexError,
    metadata::Metadata,
    parser::{ParseError, QueryParser, to_expression},
    tokenizer::TextTokenizer,
    value::Value,
};

/// Parser for the free-text grammar.
///
/// # Example
///
/// ```
/// use sift_lang::{Expression, Operator, TextParser, Value, QueryParser};
/// use sift_lang::metadata::{Field, FieldType, Metadata};
///
/// let metadata = Metadata::new(vec![
///     Field::new("value", "Value", FieldType::String).with_operators([Operator::Equal]),
/// ]);
/// let parser = TextParser::new(&metadata).unwrap();
///
/// assert_eq!(
///     parser.parse("Value Equal Test").unwrap(),
///     Some(Expression::operator(FieldType::String, "value", Operator::Equal, Value::String("Test".into())))
/// );
/// ```
#[derive(Debug)]
pub struct TextParser<'m> {
    tokenizer: TextTokenizer<'m>,
}

impl<'m> TextParser<'m> {
    pub fn new(metadata: &'m Metadata) -> Result<Self, LexError> {
        Ok(TextParser {
            tokenizer: TextTokenizer::new(metadata)?,
        })
    }

    /// Fold a token stream into a token tree.
    pub fn fold(&self, tokens: Vec<Token>) -> Result<Option<Node>, ParseError> {
        let (node, _) = fold(&mut tokens.into_iter(), 0)?;
        Ok(node)
    }
}

impl QueryParser for TextParser<'_> {
    fn parse(&self, query: &str) -> Result<Option<Expression>, ParseError> {
        let tokens = self.tokenizer.tokenize(query);
        let metadata = self.tokenizer.lexer().metadata();

        let result = self
            .fold(tokens)
            .and_then(|node| node.map(|node| to_expression(node, metadata)).transpose());
        match &result {
            Ok(_) => debug!(query, "parsed text query"),
            Err(e) => debug!(query, error = %e, "failed to parse text query"),
        }
        result
    }
}

/// Partially folded input at one nesting level.
enum Partial {
    Empty,
    Field(Token),
    Operator(Token, Token),
    Leaf(Token, Token, Operand),
    /// A list operand waiting for its next value
    Separated(Token, Token, Vec<Token>),
    Node(Node),
}

impl Partial {
    fn finish(self) -> Result<Option<Node>, ParseError> {
        match self {
            Partial::Empty => Ok(None),
            Partial::Leaf(field, operator, operand) => Ok(Some(Node::Leaf {
                field,
                operator,
                operand,
            })),
            Partial::Node(node) => Ok(Some(node)),
            Partial::Field(_) | Partial::Operator(..) | Partial::Separated(..) => {
                Err(ParseError::IncompleteExpression)
            }
        }
    }
}

/// Fold tokens up to the end of input or the `)` closing this level.
///
/// Returns the folded node and whether a `)` ended it. A logic token folds
/// the whole remainder of its level as its right operand.
fn fold(
    tokens: &mut impl Iterator<Item = Token>,
    depth: usize,
) -> Result<(Option<Node>, bool), ParseError> {
    let mut partial = Partial::Empty;

    while let Some(token) = tokens.next() {
        partial = match (partial, token.kind) {
            (partial, TokenKind::Space) => partial,
            (_, TokenKind::None) => return Err(ParseError::InvalidToken(token.raw())),

            (Partial::Empty, TokenKind::Field) => Partial::Field(token),
            (Partial::Field(field), kind) if kind.is_comparer() => Partial::Operator(field, token),
            (Partial::Field(field), kind) if kind.is_not_comparer() => {
                let empty = Token::new(TokenKind::Value, Value::String(String::new()));
                Partial::Leaf(field, token, Operand::Single(empty))
            }

            (Partial::Operator(field, operator), kind) if kind.is_value() => {
                Partial::Leaf(field, operator, Operand::Single(token))
            }
            (Partial::Separated(field, operator, mut values), kind) if kind.is_value() => {
                values.push(token);
                Partial::Leaf(field, operator, Operand::List(values))
            }
            (Partial::Leaf(field, operator, operand), kind) if kind.is_separator() => {
                let values = match operand {
                    Operand::Single(value) => vec![value],
                    Operand::List(values) => values,
                };
                Partial::Separated(field, operator, values)
            }

            (left, kind) if kind.is_logic() => {
                let Some(left) = left.finish()? else {
                    return Err(ParseError::UnexpectedToken(token.raw()));
                };
                let (right, closed) = fold(tokens, depth)?;
                let right = right.ok_or(ParseError::IncompleteExpression)?;
                let node = Node::Logic {
                    logic: token,
                    children: vec![left, right],
                };
                return Ok((Some(node), closed));
            }

            (Partial::Empty, TokenKind::OpenGroup) => {
                let (group, closed) = fold(tokens, depth + 1)?;
                if !closed {
                    return Err(ParseError::UnclosedGroup);
                }
                Partial::Node(group.ok_or(ParseError::IncompleteExpression)?)
            }
            (partial, TokenKind::CloseGroup) => {
                if depth == 0 {
                    return Err(ParseError::UnexpectedCloseGroup);
                }
                return Ok((partial.finish()?, true));
            }

            (_, _) => return Err(ParseError::UnexpectedToken(token.raw())),
        };
    }

    Ok((partial.finish()?, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Logic, Operator},
        metadata::{Field, FieldType},
    };

    fn metadata() -> Metadata {
        Metadata::new(vec![
            Field::new("a", "A", FieldType::Number)
                .with_operators([Operator::Equal, Operator::In]),
        ])
    }

    fn leaf(value: f64) -> Expression {
        Expression::operator(FieldType::Number, "a", Operator::Equal, Value::Number(value))
    }

    #[test]
    fn test_chained_logic_nests_right() {
        let metadata = metadata();
        let parser = TextParser::new(&metadata).unwrap();

        let expr = parser.parse("a = 1 and a = 2 or a = 3").unwrap().unwrap();
        assert_eq!(
            expr,
            Expression::logic(
                Logic::And,
                vec![leaf(1.0), Expression::logic(Logic::Or, vec![leaf(2.0), leaf(3.0)])]
            )
        );
    }

    #[test]
    fn test_group_closes_enclosing_logic() {
        let metadata = metadata();
        let parser = TextParser::new(&metadata).unwrap();

        let expr = parser.parse("(a = 1 or a = 2) and a = 3").unwrap().unwrap();
        assert_eq!(
            expr,
            Expression::logic(
                Logic::And,
                vec![Expression::logic(Logic::Or, vec![leaf(1.0), leaf(2.0)]), leaf(3.0)]
            )
        );

        let expr = parser.parse("a = 3 and (a = 1 or a = 2)").unwrap().unwrap();
        assert_eq!(
            expr,
            Expression::logic(
                Logic::And,
                vec![leaf(3.0), Expression::logic(Logic::Or, vec![leaf(1.0), leaf(2.0)])]
            )
        );
    }

    #[test]
    fn test_fold_errors() {
        let metadata = metadata();
        let parser = TextParser::new(&metadata).unwrap();

        assert!(matches!(parser.parse("(a = 1"), Err(ParseError::UnclosedGroup)));
        assert!(matches!(parser.parse("a ="), Err(ParseError::IncompleteExpression)));
        assert!(matches!(parser.parse("a = 1 and"), Err(ParseError::IncompleteExpression)));
        assert!(matches!(parser.parse("a in 1,"), Err(ParseError::IncompleteExpression)));
        assert!(matches!(parser.parse("a = x"), Err(ParseError::InvalidToken(t)) if t == "x"));
    }

    #[test]
    fn test_fold_rejects_misplaced_tokens() {
        let metadata = metadata();
        let parser = TextParser::new(&metadata).unwrap();
        let field = Token::text(TokenKind::Field, "a");
        let close = Token::text(TokenKind::CloseGroup, ")");

        assert!(matches!(
            parser.fold(vec![field.clone(), field]),
            Err(ParseError::UnexpectedToken(t)) if t == "a"
        ));
        assert!(matches!(parser.fold(vec![close]), Err(ParseError::UnexpectedCloseGroup)));
    }
}
