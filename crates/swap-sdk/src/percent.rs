//! Percentages.

use crate::fraction::Fraction;
use crate::types::{BigInt, Rounding};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A fraction read as `numerator / denominator * 100` percent.
///
/// Adding or subtracting two percents keeps the percentage meaning;
/// multiplying or dividing by a plain [`Fraction`] yields a plain fraction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Fraction);

impl Percent {
    /// Create a percent from a ratio, e.g. `Percent::new(5, 100)` is 5%.
    /// Panics if the denominator is zero.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        Self(Fraction::new(numerator, denominator))
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        self.scaled()
            .to_significant(significant_digits, group_separator, rounding)
    }

    pub fn to_fixed(
        &self,
        decimal_places: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        self.scaled()
            .to_fixed(decimal_places, group_separator, rounding)
    }

    fn scaled(&self) -> Fraction {
        &self.0 * &Fraction::from_integer(100)
    }
}

impl From<Fraction> for Percent {
    fn from(fraction: Fraction) -> Self {
        Self(fraction)
    }
}

impl From<Percent> for Fraction {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.to_significant(5, None, Rounding::RoundHalfUp))
    }
}

impl Add<&Percent> for &Percent {
    type Output = Percent;

    fn add(self, other: &Percent) -> Percent {
        Percent(&self.0 + &other.0)
    }
}

impl Add for Percent {
    type Output = Percent;

    fn add(self, other: Percent) -> Percent {
        &self + &other
    }
}

impl Sub<&Percent> for &Percent {
    type Output = Percent;

    fn sub(self, other: &Percent) -> Percent {
        Percent(&self.0 - &other.0)
    }
}

impl Sub for Percent {
    type Output = Percent;

    fn sub(self, other: Percent) -> Percent {
        &self - &other
    }
}

impl Mul<&Fraction> for &Percent {
    type Output = Fraction;

    fn mul(self, other: &Fraction) -> Fraction {
        &self.0 * other
    }
}

impl Div<&Fraction> for &Percent {
    type Output = Fraction;

    fn div(self, other: &Fraction) -> Fraction {
        &self.0 / other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_stays_percent() {
        let sum = &Percent::new(1, 100) + &Percent::new(2, 100);
        assert_eq!(sum, Percent::new(3, 100));

        let sum = Percent::new(1, 25) + Percent::new(2, 100);
        assert_eq!(sum.as_fraction().numerator(), &BigInt::from(150));
        assert_eq!(sum.as_fraction().denominator(), &BigInt::from(2500));
    }

    #[test]
    fn test_subtract_stays_percent() {
        let diff = Percent::new(1, 100) - Percent::new(2, 100);
        assert_eq!(diff, Percent::new(-1, 100));
        assert!(diff.is_negative());
    }

    #[test]
    fn test_multiply_by_fraction_is_plain() {
        let product: Fraction = &Percent::new(50, 100) * &Fraction::new(4, 1);
        assert_eq!(product, Fraction::from_integer(2));

        let ratio: Fraction = &Percent::new(50, 100) / &Fraction::new(1, 2);
        assert_eq!(ratio, Fraction::one());
    }

    #[test]
    fn test_formatting_is_scaled_by_100() {
        let p = Percent::new(154, 10_000);
        assert_eq!(p.to_significant(3, None, Rounding::RoundHalfUp), "1.54");
        assert_eq!(p.to_fixed(2, None, Rounding::RoundHalfUp), "1.54");
        assert_eq!(p.to_fixed(0, None, Rounding::RoundHalfUp), "2");
        assert_eq!(p.to_string(), "1.54%");
    }
}
