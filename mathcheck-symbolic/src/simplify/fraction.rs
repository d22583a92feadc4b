//! Tools to help manipulate fractions.
//!
//! Fractions have a canonical representation in this crate: a [`SymExpr::Mul`] whose factors
//! include a [`Primary::Integer`] numerator and a denominator of the form
//! `Integer^-1` (see [`SymExpr::is_integer_recip`]). The helpers here extract and rebuild that
//! shape.

use crate::approx::approximate_rational;
use crate::expr::{Primary, SymExpr};
use crate::primitive::int;
use rug::Integer;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing two factors. The first factor is the
/// numerator, and the second factor is the denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator *
        SymExpr::Exp(
            Box::new(denominator),
            Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
        )
}

/// Extracts a numerical fraction from the factors of a [`SymExpr::Mul`], removing both the
/// numerator and denominator factors from the list.
///
/// Returns `None`, leaving the factors untouched, unless both an integer numerator and an
/// `Integer^-1` denominator are present.
pub(crate) fn extract_integer_fraction(factors: &mut Vec<SymExpr>) -> Option<(Integer, Integer)> {
    let numerator_idx = factors.iter().position(|factor| factor.is_integer())?;
    let denominator_idx = factors.iter().position(|factor| factor.is_integer_recip())?;

    // remove the higher index first so the lower one stays valid
    let (numerator, denominator) = if numerator_idx > denominator_idx {
        let numerator = factors.swap_remove(numerator_idx);
        let denominator = factors.swap_remove(denominator_idx);
        (numerator, denominator)
    } else {
        let denominator = factors.swap_remove(denominator_idx);
        let numerator = factors.swap_remove(numerator_idx);
        (numerator, denominator)
    };

    Some((numerator.into_integer()?, denominator.into_integer_recip()?))
}

/// Extracts the numeric portion of the factors of a [`SymExpr::Mul`]: a float, an integer
/// numerator, an `Integer^-1` denominator, or a numerator-denominator pair. The extracted
/// factors are removed from the list and returned as a single expression.
///
/// Returns `None`, leaving the factors untouched, if there is no numeric portion at all.
pub(crate) fn extract_fractional(factors: &mut Vec<SymExpr>) -> Option<SymExpr> {
    // a float factor is the whole numeric portion by itself
    if let Some(idx) = factors.iter().position(|factor| factor.is_float()) {
        return Some(factors.swap_remove(idx));
    }

    let numerator_idx = factors.iter().position(|factor| factor.is_integer());
    let denominator_idx = factors.iter().position(|factor| factor.is_integer_recip());

    match (numerator_idx, denominator_idx) {
        (Some(numerator_idx), Some(denominator_idx)) => {
            // remove the higher index first so the lower one stays valid
            if numerator_idx > denominator_idx {
                Some(factors.swap_remove(numerator_idx)
                    * factors.swap_remove(denominator_idx))
            } else {
                Some(factors.swap_remove(denominator_idx)
                    * factors.swap_remove(numerator_idx))
            }
        },
        (Some(numerator_idx), None) => Some(factors.swap_remove(numerator_idx)),
        (None, Some(denominator_idx)) => Some(factors.swap_remove(denominator_idx)),
        (None, None) => None,
    }
}

/// Reads an expression as an exact rational number, if it is one.
///
/// This accepts the canonical fraction shapes produced by conversion and simplification:
///
/// - `Integer` -> `int / 1`
/// - `Float` -> the rational recovered by [`approximate_rational`]
/// - `Integer^-1` -> `1 / int`
/// - `Mul` of the above -> `numerator / denominator`
///
/// Unlike the extraction helpers, this does not modify its argument.
pub(crate) fn as_rational(expr: &SymExpr) -> Option<(Integer, Integer)> {
    match expr {
        SymExpr::Primary(Primary::Integer(num)) => Some((num.clone(), int(1))),
        SymExpr::Primary(Primary::Float(num)) => {
            Some(approximate_rational(num).into_numer_denom())
        },
        SymExpr::Exp(..) if expr.is_integer_recip() => {
            Some((int(1), expr.clone().into_integer_recip()?))
        },
        SymExpr::Mul(factors) => {
            let mut numerator = None;
            let mut denominator = None;
            for factor in factors {
                if factor.is_integer() && numerator.is_none() {
                    numerator = factor.clone().into_integer();
                } else if factor.is_integer_recip() && denominator.is_none() {
                    denominator = factor.clone().into_integer_recip();
                } else {
                    // a non-numeric factor; this is not a plain rational
                    return None;
                }
            }

            if numerator.is_none() && denominator.is_none() {
                None
            } else {
                Some((numerator.unwrap_or_else(|| int(1)), denominator.unwrap_or_else(|| int(1))))
            }
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_and_extract() {
        let fraction = make_fraction(
            SymExpr::Primary(Primary::Integer(int(3))),
            SymExpr::Primary(Primary::Integer(int(4))),
        );

        let SymExpr::Mul(mut factors) = fraction else {
            panic!("fraction should be a product");
        };
        let (numerator, denominator) = extract_integer_fraction(&mut factors).unwrap();
        assert_eq!(numerator, 3);
        assert_eq!(denominator, 4);
        assert!(factors.is_empty());
    }

    #[test]
    fn rational_values() {
        let half = make_fraction(
            SymExpr::Primary(Primary::Integer(int(1))),
            SymExpr::Primary(Primary::Integer(int(2))),
        );
        assert_eq!(as_rational(&half), Some((int(1), int(2))));

        let five = SymExpr::Primary(Primary::Integer(int(5)));
        assert_eq!(as_rational(&five), Some((int(5), int(1))));

        let symbol = SymExpr::Primary(Primary::Symbol("x".to_string()));
        assert_eq!(as_rational(&symbol), None);
    }
}
