//! Simplification of symbolic expressions.
//!
//! [`simplify()`] reduces an expression toward a canonical form with the lowest complexity in
//! the set of expressions semantically equivalent to it, where complexity is roughly the number
//! of nodes in the tree. `x + x` is not simplified, because it can be reduced to the single term
//! `2x`.
//!
//! Simplification works bottom-up: the children of a node are simplified first, then the rules
//! in [`rules`] are applied to the node itself, and the process repeats until no rule applies
//! anymore. Each rule is a function that accepts an expression and returns `Some(expr)` with the
//! rewritten expression if the rule is applicable.
//!
//! ```
//! use mathcheck_parser::parser::{ast::Expr, Parser};
//! use mathcheck_symbolic::expr::{Primary, SymExpr};
//! use mathcheck_symbolic::primitive::int;
//! use mathcheck_symbolic::simplify::simplify;
//!
//! let ast_expr = Parser::new("x + x + x").try_parse_full::<Expr>().unwrap();
//! let simplified = simplify(&ast_expr.into());
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplified, SymExpr::Mul(vec![
//!     SymExpr::Primary(Primary::Integer(int(3))),
//!     SymExpr::Primary(Primary::Symbol("x".to_string())),
//! ]));
//! ```

pub mod fraction;
pub mod rules;
pub mod step;

use crate::expr::{Primary, SymExpr};
use crate::step_collector::StepCollector;
use step::Step;

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the given expression, reporting each applied rule to the given step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut current = expr.clone();
    loop {
        current = simplify_children(current, step_collector);
        match rules::all(&current, step_collector) {
            Some(next) => current = next,
            None => return current,
        }
    }
}

/// Simplifies the given expression, returning the simplified expression along with the rules
/// that were applied.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &mut steps);
    (simplified, steps)
}

/// Simplifies the children of a node. Simplified children of sums and products are re-flattened
/// into their parent, since a child may itself have simplified into a sum / product.
fn simplify_children(expr: SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => SymExpr::Primary(Primary::Call(
            name,
            args.into_iter()
                .map(|arg| simplify_with(&arg, &mut *step_collector))
                .collect(),
        )),
        expr @ SymExpr::Primary(_) => expr,
        SymExpr::Add(terms) => terms
            .into_iter()
            .map(|term| simplify_with(&term, &mut *step_collector))
            .fold(SymExpr::Add(Vec::new()), |sum, term| sum + term)
            .downgrade(),
        SymExpr::Mul(factors) => factors
            .into_iter()
            .map(|factor| simplify_with(&factor, &mut *step_collector))
            .fold(SymExpr::Mul(Vec::new()), |product, factor| product * factor)
            .downgrade(),
        SymExpr::Exp(base, exp) => SymExpr::Exp(
            Box::new(simplify_with(&base, step_collector)),
            Box::new(simplify_with(&exp, step_collector)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::{Primary, SymExpr};
    use crate::primitive::int;
    use mathcheck_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse and simplify the given expression.
    fn simplify_str(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        simplify(&SymExpr::from(expr))
    }

    fn integer(n: i32) -> SymExpr {
        SymExpr::Primary(Primary::Integer(int(n)))
    }

    fn symbol(name: &str) -> SymExpr {
        SymExpr::Primary(Primary::Symbol(name.to_string()))
    }

    #[test]
    fn combine_terms() {
        assert_eq!(simplify_str("x + x + x"), SymExpr::Mul(vec![integer(3), symbol("x")]));
        assert_eq!(simplify_str("2a + 3a"), SymExpr::Mul(vec![integer(5), symbol("a")]));
    }

    #[test]
    fn cancel_terms() {
        assert_eq!(simplify_str("x - x"), integer(0));
        assert_eq!(simplify_str("2x + 1 - 2x - 1"), integer(0));
    }

    #[test]
    fn numeric_arithmetic() {
        assert_eq!(simplify_str("2 + 3 * 4"), integer(14));
        assert_eq!(simplify_str("2^10"), integer(1024));
        assert_eq!(simplify_str("12 / 3"), integer(4));
    }

    #[test]
    fn reduce_fractions() {
        // 3/12 = 1/4
        assert_eq!(
            simplify_str("3 / 12"),
            SymExpr::Exp(Box::new(integer(4)), Box::new(integer(-1))),
        );
    }

    #[test]
    fn expand_binomial() {
        let expanded = simplify_str("(x + 1)^2");
        let expected = simplify_str("x^2 + 2x + 1");
        assert_eq!(expanded, expected);
    }

    #[test]
    fn distribute() {
        let expanded = simplify_str("2(x + y)");
        let expected = simplify_str("2x + 2y");
        assert_eq!(expanded, expected);
    }

    #[test]
    fn roots() {
        assert_eq!(simplify_str("sqrt(4)"), integer(2));
        assert_eq!(
            simplify_str("sqrt(12)"),
            SymExpr::Mul(vec![
                integer(2),
                SymExpr::Primary(Primary::Call("sqrt".to_string(), vec![integer(3)])),
            ]),
        );
    }

    #[test]
    fn opaque_calls_are_preserved() {
        assert_eq!(
            simplify_str("f(x + x)"),
            SymExpr::Primary(Primary::Call(
                "f".to_string(),
                vec![SymExpr::Mul(vec![integer(2), symbol("x")])],
            )),
        );
    }

    #[test]
    fn collects_steps() {
        let expr = Parser::new("x + x").try_parse_full::<AstExpr>().unwrap();
        let (simplified, steps) = simplify_with_steps(&SymExpr::from(expr));

        assert_eq!(simplified, SymExpr::Mul(vec![integer(2), symbol("x")]));
        assert!(steps.contains(&Step::CombineLikeTerms));
    }
}
