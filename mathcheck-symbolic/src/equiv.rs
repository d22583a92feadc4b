//! The equivalence evaluator: decides whether two expression strings denote the same value for
//! all variable assignments.
//!
//! This is the contract the quiz grader and question editor program against:
//!
//! ```
//! use mathcheck_symbolic::equiv::{are_equivalent, ComparisonMode};
//!
//! assert!(are_equivalent("(x+1)^2", "x^2+2*x+1", ComparisonMode::Algebraic));
//! assert!(!are_equivalent("x+1", "x+2", ComparisonMode::Algebraic));
//! ```
//!
//! Comparison is purely symbolic: exact integer / rational arithmetic, no floating-point
//! tolerance, and no domain checking (`1/x` forms stay symbolic). Input that cannot be parsed is
//! reported as [`Verdict::Malformed`], which [`are_equivalent`] folds into `false` — a malformed
//! answer is simply marked incorrect, never an error.

use crate::expr::{Primary, SymExpr};
use crate::simplify::simplify;
use mathcheck_parser::parser::{ast::Expr as AstExpr, Parser};
use std::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How two expressions should be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComparisonMode {
    /// The expressions must be mathematically equal; any algebraic rewriting is tolerated.
    /// `x^2+2x+1` matches an expected answer of `(x+1)^2`.
    Algebraic,

    /// The expressions must agree in surface form, up to surrounding whitespace. `1/2` does
    /// **not** match `0.5`.
    Exact,
}

/// How algebraic equivalence is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EquivStrategy {
    /// Expand `lhs - rhs` and test whether it reduces to the literal zero. This is the default:
    /// term orderings that canonicalization fails to collapse still cancel in the difference.
    #[default]
    ExpandDifference,

    /// Expand both sides independently and compare the results under strict equality.
    ExpandCompare,
}

/// The outcome of an equivalence check.
///
/// The grader only distinguishes "equivalent" from everything else, but keeping malformed input
/// apart from genuine mathematical inequality is useful for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Verdict {
    /// The expressions denote the same value for every variable assignment.
    Equivalent,

    /// Both expressions parsed, but they are not equal.
    NotEquivalent,

    /// At least one side could not be parsed at all.
    Malformed,
}

/// Returns true if the two expression strings are equivalent under the given comparison mode.
///
/// Any failure along the way — either side failing to parse, most prominently — yields `false`
/// rather than an error.
pub fn are_equivalent(lhs: &str, rhs: &str, mode: ComparisonMode) -> bool {
    verdict(lhs, rhs, mode) == Verdict::Equivalent
}

/// Compares two expression strings under the given comparison mode, using the default
/// [`EquivStrategy`].
pub fn verdict(lhs: &str, rhs: &str, mode: ComparisonMode) -> Verdict {
    verdict_with(lhs, rhs, mode, EquivStrategy::default())
}

/// Compares two expression strings under the given comparison mode and strategy.
pub fn verdict_with(lhs: &str, rhs: &str, mode: ComparisonMode, strategy: EquivStrategy) -> Verdict {
    match mode {
        ComparisonMode::Exact => {
            if lhs.trim() == rhs.trim() {
                Verdict::Equivalent
            } else {
                Verdict::NotEquivalent
            }
        },
        ComparisonMode::Algebraic => {
            let (Some(lhs), Some(rhs)) = (parse(lhs), parse(rhs)) else {
                return Verdict::Malformed;
            };

            let equivalent = match strategy {
                EquivStrategy::ExpandDifference => is_zero(&simplify(&(lhs + rhs.neg()))),
                EquivStrategy::ExpandCompare => simplify(&lhs) == simplify(&rhs),
            };

            if equivalent {
                Verdict::Equivalent
            } else {
                Verdict::NotEquivalent
            }
        },
    }
}

/// Parses an expression string into its symbolic representation, if it parses at all.
fn parse(source: &str) -> Option<SymExpr> {
    Parser::new(source)
        .try_parse_full::<AstExpr>()
        .ok()
        .map(SymExpr::from)
}

/// Returns true if the expression is the number zero. A difference of two decimal-literal
/// expressions can reduce to the float zero rather than the integer zero.
fn is_zero(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Integer(n)) => n.is_zero(),
        SymExpr::Primary(Primary::Float(f)) => f.is_zero(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflexivity() {
        for expr in ["x", "x + 1", "(x+1)^2", "sqrt(2x)", "1/x", "x/y + y/x"] {
            assert!(are_equivalent(expr, expr, ComparisonMode::Algebraic), "{expr} == {expr}");
        }
    }

    #[test]
    fn symmetry() {
        let pairs = [
            ("(x+1)^2", "x^2+2*x+1"),
            ("x+1", "x+2"),
            ("2x", "x*2"),
            ("((", "x"),
        ];

        for (lhs, rhs) in pairs {
            for mode in [ComparisonMode::Algebraic, ComparisonMode::Exact] {
                assert_eq!(
                    are_equivalent(lhs, rhs, mode),
                    are_equivalent(rhs, lhs, mode),
                    "{lhs} vs {rhs}",
                );
            }
        }
    }

    #[test]
    fn known_equivalences() {
        let pairs = [
            ("(x+1)^2", "x^2+2*x+1"),
            ("2*x", "x+x"),
            ("x/2", "0.5*x"),
            ("1/2", "0.5"),
            ("(x+y)*(x-y)", "x^2-y^2"),
            ("sqrt(4)", "2"),
            ("sqrt(12)", "2*sqrt(3)"),
            ("(2*x)^3", "8*x^3"),
            ("x*(x+1)", "x^2+x"),
            ("3/12", "1/4"),
        ];

        for (lhs, rhs) in pairs {
            assert!(are_equivalent(lhs, rhs, ComparisonMode::Algebraic), "{lhs} == {rhs}");
        }
    }

    #[test]
    fn known_non_equivalences() {
        let pairs = [
            ("x+1", "x+2"),
            ("x^2", "x^3"),
            ("2*x", "2*y"),
            ("sqrt(x)", "x"),
            ("1/2", "1/3"),
        ];

        for (lhs, rhs) in pairs {
            assert!(!are_equivalent(lhs, rhs, ComparisonMode::Algebraic), "{lhs} != {rhs}");
        }
    }

    #[test]
    fn exact_mode_is_surface_sensitive() {
        assert!(are_equivalent(" 1/2 ", "1/2", ComparisonMode::Exact));
        assert!(!are_equivalent("1/2", "0.5", ComparisonMode::Exact));
        assert!(are_equivalent("1/2", "0.5", ComparisonMode::Algebraic));
        assert!(!are_equivalent("x+1", "1+x", ComparisonMode::Exact));
        assert!(are_equivalent("x+1", "1+x", ComparisonMode::Algebraic));
    }

    #[test]
    fn malformed_input_is_not_equivalent() {
        assert_eq!(verdict("((", "x", ComparisonMode::Algebraic), Verdict::Malformed);
        assert!(!are_equivalent("((", "x", ComparisonMode::Algebraic));
        assert!(!are_equivalent("x", "", ComparisonMode::Algebraic));
        assert!(!are_equivalent("x +* 1", "x", ComparisonMode::Algebraic));
    }

    #[test]
    fn verdict_distinguishes_inequality_from_garbage() {
        assert_eq!(verdict("x+1", "x+2", ComparisonMode::Algebraic), Verdict::NotEquivalent);
        assert_eq!(verdict("x+1", "x+}", ComparisonMode::Algebraic), Verdict::Malformed);
    }

    #[test]
    fn strategies_agree() {
        let pairs = [
            ("(x+1)^2", "x^2+2*x+1", true),
            ("x+1", "x+2", false),
            ("2(x + y)", "2x + 2y", true),
        ];

        for (lhs, rhs, expected) in pairs {
            for strategy in [EquivStrategy::ExpandDifference, EquivStrategy::ExpandCompare] {
                assert_eq!(
                    verdict_with(lhs, rhs, ComparisonMode::Algebraic, strategy),
                    if expected { Verdict::Equivalent } else { Verdict::NotEquivalent },
                    "{lhs} vs {rhs} with {strategy:?}",
                );
            }
        }
    }
}
