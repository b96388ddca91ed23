//! Exact rational numbers.
//!
//! [`Fraction`] is the numeric base of every amount and price in the crate.
//! Arithmetic cross-multiplies and never reduces, so results are exact but
//! not normalised; equality and ordering therefore cross-multiply as well.

use crate::error::SdkError;
use crate::types::{BigInt, Rounding};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A ratio of two arbitrary-precision integers.
///
/// The denominator is never zero and is kept positive; the sign lives on the
/// numerator.
#[derive(Debug, Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Create a new fraction. Panics if the denominator is zero.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        match Self::try_new(numerator, denominator) {
            Ok(fraction) => fraction,
            Err(_) => panic!("fraction denominator cannot be zero"),
        }
    }

    /// Create a new fraction, rejecting a zero denominator.
    pub fn try_new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, SdkError> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(SdkError::DivisionByZero);
        }
        Ok(if denominator.is_negative() {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        })
    }

    /// Create a fraction from a whole number (value/1).
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Integer part, truncated toward zero.
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// What is left after [`quotient`](Self::quotient), over the same
    /// denominator. Takes the sign of the numerator.
    pub fn remainder(&self) -> Fraction {
        Self {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    /// Swap numerator and denominator. Panics if the fraction is zero.
    pub fn invert(&self) -> Fraction {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Render with `significant_digits` significant digits, counted from the
    /// first nonzero digit. Trailing zeros after the decimal point are dropped.
    ///
    /// Panics if `significant_digits` is zero.
    pub fn to_significant(
        &self,
        significant_digits: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        assert!(significant_digits > 0, "significant digits must be positive");
        if self.numerator.is_zero() {
            return "0".to_string();
        }

        let magnitude = self.numerator.abs();
        let exponent = leading_exponent(&magnitude, &self.denominator);

        // Number of fractional digits needed to hold `significant_digits`.
        let mut places = i64::from(significant_digits) - 1 - exponent;
        let mut digits = if places >= 0 {
            round_div(
                &(magnitude * pow10(places as u64)),
                &self.denominator,
                rounding,
            )
        } else {
            round_div(
                &magnitude,
                &(&self.denominator * pow10(places.unsigned_abs())),
                rounding,
            )
        };

        // Rounding carried into an extra digit (e.g. 9.99 -> 10.0).
        if digits == pow10(u64::from(significant_digits)) {
            digits = digits / BigInt::from(10u8);
            places -= 1;
        }

        let digit_str = digits.to_string();
        let (int_part, frac_part) = if places <= 0 {
            let zeros = "0".repeat(places.unsigned_abs() as usize);
            (format!("{digit_str}{zeros}"), String::new())
        } else {
            let places = places as usize;
            let padded = left_pad_zeros(&digit_str, places + 1);
            let (int_part, frac_part) = padded.split_at(padded.len() - places);
            (
                int_part.to_string(),
                frac_part.trim_end_matches('0').to_string(),
            )
        };

        assemble(
            self.numerator.is_negative(),
            &int_part,
            &frac_part,
            group_separator,
        )
    }

    /// Render with exactly `decimal_places` digits after the decimal point.
    pub fn to_fixed(
        &self,
        decimal_places: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        let places = decimal_places as usize;
        let scaled = self.numerator.abs() * pow10(u64::from(decimal_places));
        let digits = round_div(&scaled, &self.denominator, rounding);

        let padded = left_pad_zeros(&digits.to_string(), places + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - places);

        assemble(
            self.numerator.is_negative() && !digits.is_zero(),
            int_part,
            frac_part,
            group_separator,
        )
    }
}

/// 10^exp as a big integer.
pub(crate) fn pow10(exp: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

/// Exponent `e` with `10^e <= magnitude/denominator < 10^(e+1)`.
/// Both arguments must be positive.
fn leading_exponent(magnitude: &BigInt, denominator: &BigInt) -> i64 {
    let exponent = magnitude.to_string().len() as i64 - denominator.to_string().len() as i64;
    let at_least = if exponent >= 0 {
        *magnitude >= denominator * pow10(exponent as u64)
    } else {
        magnitude * pow10(exponent.unsigned_abs()) >= *denominator
    };
    if at_least {
        exponent
    } else {
        exponent - 1
    }
}

/// `numerator / denominator` for non-negative operands, rounded per `rounding`.
fn round_div(numerator: &BigInt, denominator: &BigInt, rounding: Rounding) -> BigInt {
    let (quotient, remainder) = numerator.div_rem(denominator);
    let round_up = match rounding {
        Rounding::RoundDown => false,
        Rounding::RoundHalfUp => &remainder + &remainder >= *denominator,
        Rounding::RoundUp => !remainder.is_zero(),
    };
    if round_up {
        quotient + BigInt::one()
    } else {
        quotient
    }
}

fn left_pad_zeros(digits: &str, width: usize) -> String {
    if digits.len() >= width {
        digits.to_string()
    } else {
        format!("{}{}", "0".repeat(width - digits.len()), digits)
    }
}

fn group_digits(int_part: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return int_part.to_string();
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

fn assemble(
    negative: bool,
    int_part: &str,
    frac_part: &str,
    group_separator: Option<char>,
) -> String {
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, group_separator));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare a/b vs c/d by comparing a*d vs c*b (denominators are positive)
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl Add<&Fraction> for &Fraction {
    type Output = Fraction;

    fn add(self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator + &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl Sub<&Fraction> for &Fraction {
    type Output = Fraction;

    fn sub(self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator - &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl Mul<&Fraction> for &Fraction {
    type Output = Fraction;

    fn mul(self, other: &Fraction) -> Fraction {
        Fraction {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl Div<&Fraction> for &Fraction {
    type Output = Fraction;

    /// Panics if `other` is zero.
    fn div(self, other: &Fraction) -> Fraction {
        Fraction::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -&self
    }
}

/// Forward the owned/borrowed operator combinations to the `&a op &b` impl.
macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, other: Fraction) -> Fraction {
                <&Fraction as $imp<&Fraction>>::$method(&self, &other)
            }
        }

        impl $imp<&Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, other: &Fraction) -> Fraction {
                <&Fraction as $imp<&Fraction>>::$method(&self, other)
            }
        }

        impl $imp<Fraction> for &Fraction {
            type Output = Fraction;

            fn $method(self, other: Fraction) -> Fraction {
                <&Fraction as $imp<&Fraction>>::$method(self, &other)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);
