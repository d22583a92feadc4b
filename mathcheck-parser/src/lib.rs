//! Tokenizer and parser for the linear algebraic notation consumed by the equivalence checker.
//!
//! The input language is plain infix algebra: integer and decimal literals, identifiers,
//! function calls, parentheses, prefix negation, and the binary operators `+`, `-`, `*`, `/`,
//! and `^`. Multiplication may be implicit (`2x`, `2(x + 1)`, `(a)(b)`), matching what the
//! markup translator emits.
//!
//! Parsing an expression:
//!
//! ```
//! use mathcheck_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("x^2 + 5x + 6").try_parse_full::<Expr>().unwrap();
//! ```
//!
//! Errors produced by the parser are spanned [`mathcheck_error::ErrorKind`] values that can be
//! rendered as [`ariadne`] reports.

pub mod parser;
pub mod tokenizer;
