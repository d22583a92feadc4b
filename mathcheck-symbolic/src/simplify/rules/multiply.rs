//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::expr::{Primary, SymExpr};
use crate::primitive::{float, int};
use crate::simplify::{
    fraction::{extract_integer_fraction, make_fraction},
    rules::do_multiply,
    step::Step,
};
use crate::step_collector::StepCollector;

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(|factor| factor.as_integer().map(|n| n.is_zero()).unwrap_or(false)) {
            Some(SymExpr::Primary(Primary::Integer(int(0))))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| {
                // keep all non-one factors
                factor.as_integer()
                    .map(|n| n != &1)
                    .unwrap_or(true)
            })
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Folds a float factor together with an integer or reciprocal-integer factor.
///
/// `0.5 * 4 = 2.0`
/// `0.5 / 2 = 0.25`
pub fn multiply_float(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let float_idx = factors.iter().position(|factor| factor.is_float())?;
        let numeric_idx = factors.iter()
            .position(|factor| factor.is_integer() || factor.is_integer_recip())?;

        let mut new_factors = factors.to_vec();

        // remove the higher index first so the lower one stays valid
        let (float_factor, numeric_factor) = if float_idx > numeric_idx {
            let float_factor = new_factors.swap_remove(float_idx);
            (float_factor, new_factors.swap_remove(numeric_idx))
        } else {
            let numeric_factor = new_factors.swap_remove(numeric_idx);
            (new_factors.swap_remove(float_idx), numeric_factor)
        };

        let SymExpr::Primary(Primary::Float(value)) = float_factor else {
            return None;
        };
        let folded = if numeric_factor.is_integer() {
            float(value * numeric_factor.into_integer()?)
        } else {
            let denominator = numeric_factor.into_integer_recip()?;
            if denominator.is_zero() {
                return None;
            }
            float(value / denominator)
        };

        Some(SymExpr::Mul(new_factors).downgrade() * SymExpr::Primary(Primary::Float(folded)))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Simplifies numerical fractions.
///
/// `3/12 = 1/4`
/// `12/3 = 4`
pub fn reduce_numerical_fraction(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();

        // extract a fraction, an Integer and an Integer^-1
        let (numerator, denominator) = extract_integer_fraction(&mut new_factors)?;

        // reduce the fraction
        let gcd = numerator.clone().gcd(&denominator);
        if gcd == 1 {
            return None;
        }

        // insert the reduced fraction back into the factors
        Some(SymExpr::Mul(new_factors) * make_fraction(
            SymExpr::Primary(Primary::Integer(numerator / &gcd)),
            SymExpr::Primary(Primary::Integer(denominator / &gcd)),
        ))
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `a^c*b^c = (a*b)^c`
/// etc.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        /// Splits a factor into its base and exponent. If the factor is not [`SymExpr::Exp`],
        /// the exponent is `1`.
        ///
        /// - `a^b` -> `(a, b)`
        /// - `a` -> `(a, 1)`
        fn base_and_exponent(expr: &SymExpr) -> (SymExpr, SymExpr) {
            match expr {
                SymExpr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
                expr => (expr.clone(), SymExpr::Primary(Primary::Integer(int(1)))),
            }
        }

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            let (mut base, mut exponent) = base_and_exponent(&new_factors[current_factor_idx]);

            // look at every factor after the current one
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                let (next_base, next_exponent) = base_and_exponent(&new_factors[next_factor_idx]);

                if exponent == next_exponent
                    && (base.is_integer() && next_base.is_integer()
                        || base.is_float() && next_base.is_float()) {
                    // exponents must be strictly equal
                    // if they are, apply a^c*b^c = (a*b)^c
                    base = base * next_base;
                    new_factors.swap_remove(next_factor_idx);
                } else if base == next_base {
                    // bases must be strictly equal
                    // if they are, apply a^b*a^c = a^(b+c)
                    exponent = exponent + next_exponent;
                    new_factors.swap_remove(next_factor_idx);
                } else {
                    next_factor_idx += 1;
                }
            }

            // after all combining, update the current factor
            if exponent.as_integer().map(|n| n == &1).unwrap_or(false) {
                new_factors[current_factor_idx] = base;
            } else {
                new_factors[current_factor_idx] = SymExpr::Exp(
                    Box::new(base),
                    Box::new(exponent),
                );
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_float(expr, step_collector))
        .or_else(|| reduce_numerical_fraction(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
