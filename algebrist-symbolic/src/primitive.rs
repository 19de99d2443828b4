//! Functions to construct exact [`Rational`] numbers from various types.

use rug::{Integer, Rational};

/// Creates a [`Rational`] with the given integer value.
pub fn rat<T>(n: T) -> Rational
where
    Integer: From<T>,
{
    Rational::from(Integer::from(n))
}

/// Creates a [`Rational`] from the digits of a number literal, such as `16`, `3.14` or `.5`.
///
/// The value is exact: `0.1` is the rational `1/10`, not the nearest binary float. The parser only
/// produces digit strings with at most one decimal point, so any other character is a bug in the
/// caller; [`None`] is returned for it.
pub fn rat_from_str(s: &str) -> Option<Rational> {
    let mut numerator = Integer::new();
    let mut denominator = Integer::from(1);
    let mut seen_point = false;

    for c in s.chars() {
        match c {
            '.' if !seen_point => seen_point = true,
            '0'..='9' => {
                numerator *= 10;
                numerator += c as u32 - '0' as u32;
                if seen_point {
                    denominator *= 10;
                }
            },
            _ => return None,
        }
    }

    Some(Rational::from((numerator, denominator)))
}
