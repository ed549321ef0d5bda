use crate::{
    ast::{Operator, Token, TokenKind},
    metadata::{Field, Metadata},
};

/// What the classifier needs to know about the tokens accepted so far.
///
/// Contexts are small `Copy` values: each accepted token produces a new one
/// through [`Context::push`], and recursive callers hand them down by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context<'m> {
    /// Most recent field
    pub field: Option<&'m Field>,
    /// Most recent operator
    pub operator: Option<Operator>,
    /// Most recent token, ignoring spaces
    pub previous: Option<TokenKind>,
    /// Most recent token, spaces included
    pub last: Option<TokenKind>,
    /// `(` accepted so far
    pub open: usize,
    /// `)` accepted so far
    pub close: usize,
}

impl<'m> Context<'m> {
    /// Context at the start of a stream.
    pub fn new() -> Self {
        Context::default()
    }

    /// At stream start, or after `(`, `and`, `or`.
    pub fn expects_field(&self) -> bool {
        self.previous.is_none_or(TokenKind::is_pre_field)
    }

    /// After an operator or a separator.
    pub fn expects_value(&self) -> bool {
        self.previous
            .is_some_and(|kind| kind.is_operator() || kind.is_separator())
    }

    /// After a value, `)`, or an operand-less operator.
    pub fn is_complete(&self) -> bool {
        self.previous.is_some_and(TokenKind::is_complete)
    }

    /// The context after accepting `token`.
    pub fn push(self, token: &Token, metadata: &'m Metadata) -> Self {
        let mut next = self;
        next.last = Some(token.kind);
        if token.kind == TokenKind::Space {
            return next;
        }

        next.previous = Some(token.kind);
        match token.kind {
            TokenKind::Field => {
                next.field = token.value.as_str().and_then(|name| metadata.field(name));
            }
            TokenKind::OpenGroup => next.open += 1,
            TokenKind::CloseGroup => next.close += 1,
            kind if kind.is_operator() => next.operator = Some(Operator::from(kind)),
            _ => {}
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FieldType;

    #[test]
    fn test_push_tracks_field_operator_and_groups() {
        let metadata = Metadata::new(vec![Field::new("a", "A", FieldType::String)]);
        let context = Context::new()
            .push(&Token::text(TokenKind::OpenGroup, "("), &metadata)
            .push(&Token::text(TokenKind::Field, "a"), &metadata)
            .push(&Token::text(TokenKind::Space, " "), &metadata)
            .push(&Token::text(TokenKind::In, "in"), &metadata);

        assert_eq!(context.field.map(|f| f.name.as_str()), Some("a"));
        assert_eq!(context.operator, Some(Operator::In));
        assert_eq!(context.previous, Some(TokenKind::In));
        assert_eq!(context.last, Some(TokenKind::In));
        assert_eq!((context.open, context.close), (1, 0));
        assert!(context.expects_value());
        assert!(!context.expects_field());
    }

    #[test]
    fn test_spaces_do_not_change_position() {
        let metadata = Metadata::default();
        let context = Context::new().push(&Token::text(TokenKind::Space, " "), &metadata);

        assert!(context.expects_field());
        assert_eq!(context.previous, None);
        assert_eq!(context.last, Some(TokenKind::Space));
    }
}
