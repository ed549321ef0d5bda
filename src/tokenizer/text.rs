use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    ast::{Token, TokenKind},
    lexer::{Context, LexError, Lexer},
    metadata::Metadata,
};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+ ?").expect("word pattern"));

/// Scans free text into a flat token stream.
///
/// Scanning never fails: text that cannot be classified becomes
/// [`TokenKind::None`] tokens and scanning continues after it.
#[derive(Debug)]
pub struct TextTokenizer<'m> {
    lexer: Lexer<'m>,
}

impl<'m> TextTokenizer<'m> {
    pub fn new(metadata: &'m Metadata) -> Result<Self, LexError> {
        Ok(TextTokenizer {
            lexer: Lexer::new(metadata)?,
        })
    }

    pub fn lexer(&self) -> &Lexer<'m> {
        &self.lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let metadata = self.lexer.metadata();
        let mut tokens = Vec::new();
        let mut context = Context::new();
        let mut rest = text;

        while let Some(first) = rest.chars().next() {
            let (token, consumed) = match self.lexer.find(rest) {
                Some((kind, matched)) => (
                    self.lexer.create_token(&context, kind, matched),
                    matched.len(),
                ),
                None if first.is_whitespace() => {
                    let width = first.len_utf8();
                    (
                        self.lexer
                            .create_token(&context, TokenKind::Space, &rest[..width]),
                        width,
                    )
                }
                None => {
                    let word = WORD.find(rest).map_or(rest, |m| m.as_str());
                    (Some(Token::invalid(word.trim_end())), word.len())
                }
            };

            if let Some(token) = token {
                context = context.push(&token, metadata);
                tokens.push(token);
            }
            rest = &rest[consumed..];
        }

        debug!(query = text, tokens = tokens.len(), "tokenized text query");
        tokens
    }
}
