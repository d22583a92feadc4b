//! Rational recovery for floating-point values.

use rug::{Float, Integer, Rational};
use std::cmp::Ordering;
use super::primitive::float;

/// Computes the [`Rational`] from the continued fraction form of a float.
fn rational_from_continued_fraction(continued_fraction_form: &[Integer]) -> Rational {
    let mut rational = Rational::new();
    for (i, integer) in continued_fraction_form.iter().rev().enumerate() {
        if i == 0 {
            if integer.cmp0() == Ordering::Equal {
                continue;
            }
            rational += Rational::from(Rational::ONE / integer);
        } else {
            rational = (rational + integer).recip();
        }
    }

    if rational.cmp0() == Ordering::Equal {
        rational
    } else {
        rational.recip()
    }
}

/// Approximates the given float as a rational fraction.
///
/// This function applies the continued fraction algorithm to the given float until the error is
/// less than `1e-60`.
///
/// We don't use [`Float::to_rational`] because it can produce bad / useless results due to
/// floating point arithmetic errors: the decimal literal `0.3` is not representable in binary,
/// and its bit-exact rational is not the `3/10` the author wrote. The continued fraction
/// algorithm recovers the intended fraction instead.
///
/// See
/// [Wikipedia](https://en.wikipedia.org/wiki/Continued_fraction#Calculating_continued_fraction_representations)
/// for more information.
pub fn approximate_rational(n: &Float) -> Rational {
    let orig = n;

    let mut continued_fraction_form = Vec::new();
    let mut n = n.clone();
    loop {
        let (integer, fractional) = n.trunc_fract(float(0));
        continued_fraction_form.push(integer.to_integer().unwrap());

        // check how close we are to the original number
        let rational = rational_from_continued_fraction(&continued_fraction_form);
        let error = float(orig - rational).abs();

        if fractional.is_zero() || error < 1e-60 {
            break;
        }

        n = fractional.recip();
    }

    rational_from_continued_fraction(&continued_fraction_form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::float_from_str;

    #[test]
    fn recovers_decimal_fractions() {
        assert_eq!(approximate_rational(&float_from_str("0.5")), Rational::from((1, 2)));
        assert_eq!(approximate_rational(&float_from_str("0.3")), Rational::from((3, 10)));
        assert_eq!(approximate_rational(&float_from_str("2.25")), Rational::from((9, 4)));
    }

    #[test]
    fn recovers_integers() {
        assert_eq!(approximate_rational(&float(4)), Rational::from(4));
        assert_eq!(approximate_rational(&float(0)), Rational::new());
    }
}
