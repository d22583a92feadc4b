//! Functions to construct [`Integer`]s and [`Float`]s from various types.

use rug::{Assign, Float, Integer};

/// The number of digits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits, as validated by the tokenizer.
pub fn int_from_str(s: &str) -> Integer {
    Integer::from_str_radix(s, 10).unwrap()
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string of decimal digits, as validated by the tokenizer.
pub fn float_from_str(s: &str) -> Float {
    Float::with_val(PRECISION, Float::parse(s).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_primitives() {
        assert_eq!(int_from_str("144"), 144);
        assert_eq!(float_from_str("0.5"), 0.5);
        assert_eq!(float_from_str("3.25"), 3.25);
    }
}
