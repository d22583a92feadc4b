//! Simplification rules for expressions involving addition, including combining like terms.

use crate::expr::{Primary, SymExpr};
use crate::primitive::int;
use crate::simplify::{
    fraction::{as_rational, extract_fractional, make_fraction},
    rules::do_add,
    step::Step,
};
use crate::step_collector::StepCollector;

/// Adds two coefficients, folding exact rationals (and floats, through their recovered rational
/// value) into a single number.
fn add_coefficients(lhs: SymExpr, rhs: SymExpr) -> SymExpr {
    // two floats are added directly, without the rational detour
    if lhs.is_float() && rhs.is_float() {
        return lhs + rhs;
    }

    match (as_rational(&lhs), as_rational(&rhs)) {
        (Some((num1, den1)), Some((num2, den2))) => {
            // a/b + c/d = (a*d + c*b) / (b*d)
            let numerator = num1 * &den2 + num2 * &den1;
            let denominator = den1 * den2;
            if denominator == 1 {
                SymExpr::Primary(Primary::Integer(numerator))
            } else if denominator == -1 {
                SymExpr::Primary(Primary::Integer(-numerator))
            } else {
                make_fraction(
                    SymExpr::Primary(Primary::Integer(numerator)),
                    SymExpr::Primary(Primary::Integer(denominator)),
                )
            }
        },
        _ => lhs + rhs,
    }
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| {
                // keep all non-zero terms
                term.as_integer()
                    .map(|n| !n.is_zero())
                    .unwrap_or(true)
            })
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        /// Splits a term into its numeric coefficient and its remaining factors. If the term has
        /// no explicit coefficient, the coefficient is 1.
        ///
        /// - `5` -> `(5, 1)`
        /// - `3*a` -> `(3, a)`
        /// - `1/4*a*b` -> `(1/4, a*b)`
        /// - `a` -> `(1, a)`
        fn coefficient_and_factors(expr: &SymExpr) -> (SymExpr, SymExpr) {
            match expr {
                SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => {
                    (expr.clone(), SymExpr::Primary(Primary::Integer(int(1))))
                },
                SymExpr::Mul(factors) => {
                    let mut factors = factors.clone();
                    let coefficient = extract_fractional(&mut factors)
                        .unwrap_or_else(|| SymExpr::Primary(Primary::Integer(int(1))));

                    (coefficient, SymExpr::Mul(factors).downgrade())
                },
                SymExpr::Exp(..) if expr.is_integer_recip() => {
                    (expr.clone(), SymExpr::Primary(Primary::Integer(int(1))))
                },
                _ => (SymExpr::Primary(Primary::Integer(int(1))), expr.clone()),
            }
        }

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut coefficient, factors) = coefficient_and_factors(&new_terms[current_term_idx]);

            // look at every term after the current one
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_coefficient, next_factors) = coefficient_and_factors(&new_terms[next_term_idx]);

                // factors must be strictly equal to apply a*n + a*m = (n+m)*a
                if factors == next_factors {
                    coefficient = add_coefficients(coefficient, next_coefficient);
                    new_terms.swap_remove(next_term_idx);
                } else {
                    next_term_idx += 1;
                }
            }

            if coefficient.as_integer().map(|n| n == &1).unwrap_or(false) {
                new_terms[current_term_idx] = factors;
            } else {
                new_terms[current_term_idx] = coefficient * factors;
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| combine_like_terms(expr, step_collector))
}
