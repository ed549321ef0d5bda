pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod metadata;
pub mod output;
pub mod parser;
pub mod tokenizer;
pub mod validator;
pub mod value;

pub use ast::{
    Expression, Logic, LogicExpression, Node, Operand, Operator, OperatorExpression, Token,
    TokenKind,
};
pub use lexer::{Context, LexError, Lexer};
pub use metadata::{Field, FieldType, Lookup, Metadata};
pub use output::{to_json, to_json_pretty, to_json_string};
pub use parser::{JsonParser, ParseError, QueryParser, TextParser};
pub use tokenizer::{JsonTokenizer, TextTokenizer, TokenizeError};
pub use validator::{JsonValidator, QueryValidator, TextValidator, ValidationError};
pub use value::Value;
