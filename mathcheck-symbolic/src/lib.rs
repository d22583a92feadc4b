//! Symbolic manipulation of algebraic expressions, and the equivalence evaluator built on it.
//!
//! # Expression representation
//!
//! Algebraic expressions in this crate are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`mathcheck_parser::parser::ast::Expr`] nodes produced by the parser, with the
//! main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`, whereas the parser's node
//! would have two children, `x` and `(y + z)`.
//!
//! This is done to make it easier to perform algebraic manipulations on the expression. A common
//! step in simplifying an expression is to combine "like terms", that is, to combine terms that
//! share the same factors (e.g. `x + x = 2x`). This is much easier to do when the terms in
//! question are all at the same level in the tree.
//!
//! ```
//! use mathcheck_parser::parser::{ast::Expr, Parser};
//! use mathcheck_symbolic::expr::{Primary, SymExpr};
//!
//! let ast_expr = Parser::new("x + (y + z)").try_parse_full::<Expr>().unwrap();
//!
//! let expr: SymExpr = ast_expr.into();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::Primary(Primary::Symbol("x".to_string())),
//!     SymExpr::Primary(Primary::Symbol("y".to_string())),
//!     SymExpr::Primary(Primary::Symbol("z".to_string())),
//! ]));
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a canonical form by applying a set of rewrite rules
//! in multiple passes, bottom-up, until none of them applies anymore. The rule set covers
//! combining like terms and factors, distributing multiplication over addition, power rules, and
//! root extraction; see [`simplify::rules`].
//!
//! # Equivalence
//!
//! The [`equiv`] module answers the question the rest of the system actually asks: do two
//! expression strings denote the same value for every variable assignment? See
//! [`equiv::are_equivalent`].

pub mod approx;
pub mod equiv;
pub mod expr;
pub mod primitive;
pub mod simplify;
pub mod step_collector;

pub use equiv::{are_equivalent, ComparisonMode, EquivStrategy, Verdict};
pub use expr::SymExpr;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
