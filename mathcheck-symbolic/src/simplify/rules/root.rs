//! Simplification rules for square, cube, and higher roots.

use crate::expr::{Primary, SymExpr};
use crate::primitive::int;
use crate::simplify::{rules::do_call, step::Step};
use crate::step_collector::StepCollector;
use rug::Integer;
use std::collections::HashMap;

/// Returns the prime factorization of the given integer, or `None` if the integer is too large
/// to factor by trial division.
fn prime_factorization(mut n: Integer) -> Option<HashMap<Integer, usize>> {
    let mut factors = HashMap::new();
    if n < 0 {
        factors.insert(int(-1), 1);
        n = -n;
    }

    let mut remaining = n.to_u32()?;
    let mut candidate = 2u32;
    while u64::from(candidate) * u64::from(candidate) <= u64::from(remaining) {
        while remaining % candidate == 0 {
            *factors.entry(int(candidate)).or_insert(0) += 1;
            remaining /= candidate;
        }
        candidate += 1;
    }
    if remaining > 1 {
        *factors.entry(int(remaining)).or_insert(0) += 1;
    }

    Some(factors)
}

/// General simplification function for roots.
///
/// Counts how many times each factor appears under the root, moves factors that appear a
/// multiple of `root` times outside of it, and rebuilds the call with whatever remains inside.
fn do_root(expr: &SymExpr, root: usize) -> Option<SymExpr> {
    let factors = if let SymExpr::Mul(factors) = expr {
        factors.clone()
    } else {
        vec![expr.clone()]
    };

    // count the number of times each factor appears
    let mut counts: HashMap<SymExpr, usize> = HashMap::new();
    for factor in factors {
        match factor {
            // integer factors are counted through their prime factorization
            SymExpr::Primary(Primary::Integer(n)) => {
                match prime_factorization(n) {
                    Some(primes) => {
                        for (prime, count) in primes {
                            *counts.entry(SymExpr::Primary(Primary::Integer(prime))).or_insert(0) += count;
                        }
                    },
                    // too large to factor; keep it opaque
                    None => return None,
                }
            },

            // extract numerical exponents
            SymExpr::Exp(base, exp) => {
                match exp.as_integer().and_then(|n| n.to_usize()) {
                    Some(count) => *counts.entry(*base).or_insert(0) += count,
                    None => *counts.entry(SymExpr::Exp(base, exp)).or_insert(0) += 1,
                }
            },

            other => {
                *counts.entry(other).or_insert(0) += 1;
            },
        }
    }

    // create power nodes for each factor that appears a multiple of `root` times
    let outside_factors = counts
        .iter()
        .filter_map(|(factor, count)| {
            if count / root == 0 {
                None
            } else {
                Some(SymExpr::Exp(
                    Box::new(factor.clone()),
                    Box::new(SymExpr::Primary(Primary::Integer(Integer::from(count / root)))),
                ))
            }
        })
        .collect::<Vec<_>>();
    let inside_factors = counts
        .into_iter()
        .filter_map(|(factor, count)| {
            if count % root == 0 {
                None
            } else {
                Some(SymExpr::Exp(
                    Box::new(factor),
                    Box::new(SymExpr::Primary(Primary::Integer(Integer::from(count % root)))),
                ))
            }
        })
        .collect::<Vec<_>>();

    if outside_factors.is_empty() {
        // nothing was pulled out of the root; no simplification was performed
        None
    } else if inside_factors.is_empty() {
        // everything was pulled out of the root; the call is gone
        Some(SymExpr::Mul(outside_factors).downgrade())
    } else {
        // the call needs to be rebuilt with the new arguments
        let call = match root {
            2 => Primary::Call("sqrt".to_string(), vec![SymExpr::Mul(inside_factors).downgrade()]),
            3 => Primary::Call("cbrt".to_string(), vec![SymExpr::Mul(inside_factors).downgrade()]),
            n => Primary::Call(
                "root".to_string(),
                vec![
                    SymExpr::Mul(inside_factors).downgrade(),
                    SymExpr::Primary(Primary::Integer(Integer::from(n))),
                ],
            ),
        };
        Some(SymExpr::Mul(outside_factors) * SymExpr::Primary(call))
    }
}

/// `sqrt(x^2) = x`, `x >= 0`
fn sqrt(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "sqrt", |args| {
        do_root(args.first()?, 2)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Root);
    Some(opt)
}

/// `cbrt(x^3) = x`
fn cbrt(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "cbrt", |args| {
        do_root(args.first()?, 3)
    })?;

    step_collector.push(Step::Root);
    Some(opt)
}

/// `root(x^y, y) = x`
fn root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "root", |args| {
        let degree = args.get(1)?.as_integer()?.to_usize()?;
        if degree == 0 {
            return None;
        }
        do_root(args.first()?, degree)
    })?;

    step_collector.push(Step::Root);
    Some(opt)
}

/// Applies all root rules.
///
/// Root simplification may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it may be necessary for future rules to apply.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    sqrt(expr, step_collector)
        .or_else(|| cbrt(expr, step_collector))
        .or_else(|| root(expr, step_collector))
}
