//! Simplification rules for powers, including multiplying out integer powers of sums.

use crate::expr::{Primary, SymExpr};
use crate::primitive::{float, int};
use crate::simplify::{rules::do_power, step::Step};
use crate::step_collector::StepCollector;
use rug::ops::Pow;
use std::cmp::Ordering;

/// Integer powers of sums above this limit stay in factored form. Multiplying them out is
/// superlinear in time and memory, and an external wall-clock bound is the embedder's job.
const MAX_EXPANDED_EXPONENT: u32 = 256;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.as_integer()?.is_zero() {
            Some(SymExpr::Primary(Primary::Integer(int(1))))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.as_integer()? == &1 {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn base_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.as_integer()? == &1 {
            Some(SymExpr::Primary(Primary::Integer(int(1))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::BaseOne);
    Some(opt)
}

/// Computes powers of numbers.
///
/// `2^10 = 1024`
/// `2^-3 = 8^-1`
/// `0.5^2 = 0.25`
///
/// `Integer^-1` is the canonical representation of a fraction and is left alone.
pub fn numeric_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let exp = rhs.as_integer()?;

        if let Some(base) = lhs.as_integer() {
            if *exp == -1 {
                return None;
            }

            if exp.cmp0() == Ordering::Less {
                // a^-n = (a^n)^-1; a zero base would divide by zero, so leave that alone
                if base.is_zero() {
                    return None;
                }
                let n = int(-exp.clone()).to_u32()?;
                Some(SymExpr::Exp(
                    Box::new(SymExpr::Primary(Primary::Integer(int(base.pow(n))))),
                    Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
                ))
            } else {
                // exponents 0 and 1 are handled by the rules above
                let n = exp.to_u32()?;
                Some(SymExpr::Primary(Primary::Integer(int(base.pow(n)))))
            }
        } else if let SymExpr::Primary(Primary::Float(base)) = lhs {
            if base.is_zero() && exp.cmp0() == Ordering::Less {
                return None;
            }
            let n = exp.to_i32()?;
            Some(SymExpr::Primary(Primary::Float(float(base.pow(n)))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::NumericPower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, inner_exp) = lhs {
            Some(SymExpr::Exp(
                base.clone(),
                Box::new(*inner_exp.clone() * rhs.clone()),
            ))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Multiplies out an integer power of a sum.
///
/// `(a + b)^2 = a^2 + 2ab + b^2`
///
/// Like terms are combined after every distribution pass, so the intermediate products stay at
/// the size of the final polynomial.
pub fn expand_integer_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Add(terms) = lhs else {
            return None;
        };

        let exp = rhs.as_integer()?.to_u32()?;
        if !(2..=MAX_EXPANDED_EXPONENT).contains(&exp) {
            return None;
        }

        let mut product = SymExpr::Add(terms.clone());
        for _ in 1..exp {
            product = distribute_over(&product, terms);
            if let Some(combined) = super::add::combine_like_terms(&product, &mut ()) {
                product = combined;
            }
        }

        Some(product)
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Multiplies every term of the accumulated product with every term of the base.
fn distribute_over(product: &SymExpr, terms: &[SymExpr]) -> SymExpr {
    let product_terms = match product {
        SymExpr::Add(terms) => terms.clone(),
        other => vec![other.clone()],
    };

    let mut out = Vec::new();
    for left in &product_terms {
        for right in terms {
            out.push(left.clone() * right.clone());
        }
    }

    SymExpr::Add(out)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| base_one(expr, step_collector))
        .or_else(|| numeric_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| expand_integer_power(expr, step_collector))
}
