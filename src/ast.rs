//! # Sift Query Language - Abstract Syntax Tree
//!
//! Sift queries filter records on a caller-supplied field schema. The same
//! query can be written in two grammars.
//!
//! ## Text grammar
//!
//! ```text
//! status = Enabled and (age >= 18 or role in admin, owner)
//! ```
//!
//! Keywords are case-insensitive and have symbol forms:
//!
//! | keyword | symbol |
//! | --- | --- |
//! | `and` / `or` | `&&` / `\|\|` |
//! | `equal` / `not equal` | `=` / `!=` |
//! | `greater than` / `greater than or equal` | `>` / `>=` |
//! | `less than` / `less than or equal` | `<` / `<=` |
//! | `blank` / `not blank` | `[]` / `![]` |
//! | `contain` / `not contain` | `~` / `!~` |
//! | `start with` / `not start with` | `~*` / `!~*` |
//! | `end with` / `not end with` | `*~` / `!*~` |
//! | `in` / `not in` | |
//!
//! Multi-value operands are separated by `,` or `/`.
//!
//! ## JSON grammar
//!
//! ```text
//! ["And", [["status", "Equal", "Enabled"], ["role", "In", ["admin", "owner"]]]]
//! ```
//!
//! A three element array is a leaf, a two element array a logic node.
//!
//! ## Modules
//!
//! - **[tokens]** - Tokens and token kinds produced by the lexer
//! - **[operators]** - Operators and logic combinators
//! - **[node]** - Token tree shared by both grammars
//! - **[expressions]** - The finished expression tree
pub mod expressions;
pub mod node;
pub mod operators;
pub mod tokens;

pub use expressions::{Expression, LogicExpression, OperatorExpression};
pub use node::{Node, Operand};
pub use operators::{Logic, Operator};
pub use tokens::{Token, TokenKind};
