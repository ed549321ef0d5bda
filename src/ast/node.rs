use crate::ast::Token;

/// Operand slot of a leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Single(Token),
    /// Comma or slash separated values
    List(Vec<Token>),
}

impl Operand {
    pub fn tokens(&self) -> &[Token] {
        match self {
            Operand::Single(token) => std::slice::from_ref(token),
            Operand::List(tokens) => tokens,
        }
    }
}

/// Token tree produced by both front-ends before conversion to an
/// [`Expression`](crate::ast::Expression).
///
/// The text grammar folds its flat token stream into this shape; the JSON
/// grammar tokenizes straight into it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `field operator operand`
    Leaf {
        field: Token,
        operator: Token,
        operand: Operand,
    },

    /// `logic [children]`
    Logic { logic: Token, children: Vec<Node> },
}

impl Node {
    /// First token anywhere in the tree that failed classification.
    pub fn find_invalid(&self) -> Option<&Token> {
        match self {
            Node::Leaf {
                field,
                operator,
                operand,
            } => std::iter::once(field)
                .chain(std::iter::once(operator))
                .chain(operand.tokens())
                .find(|token| token.is_invalid()),
            Node::Logic { logic, children } => {
                if logic.is_invalid() {
                    Some(logic)
                } else {
                    children.iter().find_map(Node::find_invalid)
                }
            }
        }
    }
}
