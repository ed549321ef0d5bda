use std::fmt;

use crate::{
    ast::{Logic, Operator},
    metadata::FieldType,
    value::Value,
};

/// Backend-agnostic filter tree produced by the parsers.
///
/// Builders consume it: leaves carry everything needed to pick a predicate
/// (`field_type`, `operator`) and its already-casted operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Operator(OperatorExpression),
    Logic(LogicExpression),
}

/// Leaf test on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorExpression {
    pub field_type: FieldType,

    /// Canonical field name, even when the query used the label
    pub field_name: String,

    pub operator: Operator,

    /// Casted operand, [`Value::List`] for multi-value operators, empty
    /// string for operand-less operators
    pub value: Value,
}

/// AND/OR over child expressions, in query order.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicExpression {
    pub logic: Logic,
    pub expressions: Vec<Expression>,
}

impl Expression {
    pub fn operator(
        field_type: FieldType,
        field_name: impl Into<String>,
        operator: Operator,
        value: Value,
    ) -> Self {
        Expression::Operator(OperatorExpression {
            field_type,
            field_name: field_name.into(),
            operator,
            value,
        })
    }

    pub fn logic(logic: Logic, expressions: Vec<Expression>) -> Self {
        Expression::Logic(LogicExpression { logic, expressions })
    }

    /// Canonical names of every field the expression tests, in order of appearance.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Expression::Operator(expr) => vec![expr.field_name.as_str()],
            Expression::Logic(expr) => expr
                .expressions
                .iter()
                .flat_map(Expression::field_names)
                .collect(),
        }
    }
}

/// Quote text operands so they lex back as a single string literal.
///
/// The text grammar has no escapes: a string holding both `"` and `'` has no
/// single-literal form. It is written in `'…'` and does not read back whole.
fn write_operand(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) if s.contains('"') => write!(f, "'{}'", s),
        Value::String(s) => write!(f, "\"{}\"", s),
        Value::List(values) => {
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_operand(f, value)?;
            }
            Ok(())
        }
        other => write!(f, "{}", other),
    }
}

/// Renders the text grammar with canonical keywords. See `write_operand` for
/// strings that cannot be quoted.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Operator(expr) => {
                write!(f, "{} {}", expr.field_name, expr.operator.keyword())?;
                if expr.operator.is_comparer() {
                    f.write_str(" ")?;
                    write_operand(f, &expr.value)?;
                }
                Ok(())
            }
            Expression::Logic(expr) => {
                let keyword = match expr.logic {
                    Logic::And => " and ",
                    Logic::Or => " or ",
                    Logic::Unknown => " ? ",
                };
                for (i, child) in expr.expressions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(keyword)?;
                    }
                    match child {
                        Expression::Logic(_) => write!(f, "({})", child)?,
                        Expression::Operator(_) => write!(f, "{}", child)?,
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_grammar() {
        let expr = Expression::logic(
            Logic::Or,
            vec![
                Expression::operator(
                    FieldType::String,
                    "name",
                    Operator::In,
                    Value::List(vec![Value::String("a".into()), Value::String("b c".into())]),
                ),
                Expression::logic(
                    Logic::And,
                    vec![
                        Expression::operator(
                            FieldType::Number,
                            "age",
                            Operator::GreaterThan,
                            Value::Number(18.0),
                        ),
                        Expression::operator(
                            FieldType::String,
                            "note",
                            Operator::Blank,
                            Value::String(String::new()),
                        ),
                    ],
                ),
            ],
        );

        assert_eq!(
            expr.to_string(),
            r#"name in "a", "b c" or (age greater than 18 and note blank)"#
        );
        assert_eq!(expr.field_names(), vec!["name", "age", "note"]);
    }

    #[test]
    fn test_display_quote_choice() {
        let leaf = |text: &str| {
            Expression::operator(
                FieldType::String,
                "note",
                Operator::Equal,
                Value::String(text.into()),
            )
        };

        assert_eq!(leaf("it's").to_string(), r#"note equal "it's""#);
        assert_eq!(leaf(r#"say "hi""#).to_string(), r#"note equal 'say "hi"'"#);
        assert_eq!(leaf(r#"it's "x""#).to_string(), r#"note equal 'it's "x"'"#);
    }
}
