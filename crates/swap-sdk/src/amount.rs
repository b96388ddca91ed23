//! Decimal-aware currency amounts.

use crate::constants::max_uint256;
use crate::currency::Currency;
use crate::error::SdkError;
use crate::fraction::{pow10, Fraction};
use crate::types::{BigInt, Rounding};
use std::cmp::Ordering;
use std::fmt;

/// A quantity of one currency, held in raw (smallest) units.
///
/// The raw amount is a fraction so that quotes through a [`Price`](crate::Price)
/// stay exact; amounts built from on-chain values have denominator 1.
/// Raw amounts are never negative and never exceed `uint256`.
#[derive(Debug, Clone)]
pub struct CurrencyAmount {
    currency: Currency,
    fraction: Fraction,
    decimal_scale: BigInt,
}

impl CurrencyAmount {
    /// Amount of `raw` smallest units, e.g. wei.
    pub fn from_raw_amount(
        currency: impl Into<Currency>,
        raw: impl Into<BigInt>,
    ) -> Result<Self, SdkError> {
        Self::checked(currency.into(), Fraction::from_integer(raw))
    }

    /// Amount of `numerator / denominator` smallest units.
    pub fn from_fractional_amount(
        currency: impl Into<Currency>,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, SdkError> {
        Self::checked(currency.into(), Fraction::try_new(numerator, denominator)?)
    }

    /// Parse a human-readable decimal such as `"1.5"` into raw units.
    ///
    /// Rejects signs, exponents, and more fractional digits than the
    /// currency has decimals.
    pub fn parse(currency: impl Into<Currency>, value: &str) -> Result<Self, SdkError> {
        let currency = currency.into();
        let decimals = usize::from(currency.decimals());

        let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !is_digits(int_part)
            || !is_digits(frac_part)
        {
            return Err(SdkError::InvalidAmount(format!("malformed decimal {value:?}")));
        }
        if frac_part.len() > decimals {
            return Err(SdkError::InvalidAmount(format!(
                "{value} has more than {decimals} decimals"
            )));
        }

        let digits = format!("{int_part}{frac_part:0<decimals$}");
        let raw = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| SdkError::InvalidAmount(format!("malformed decimal {value:?}")))?;
        Self::checked(currency, Fraction::from_integer(raw))
    }

    fn checked(currency: Currency, fraction: Fraction) -> Result<Self, SdkError> {
        if fraction.is_negative() {
            return Err(SdkError::InvalidAmount(format!("negative amount {fraction}")));
        }
        if fraction.quotient() > max_uint256() {
            return Err(SdkError::InvalidAmount(format!(
                "{fraction} exceeds uint256"
            )));
        }
        Ok(Self::unchecked(currency, fraction))
    }

    fn unchecked(currency: Currency, fraction: Fraction) -> Self {
        let decimal_scale = pow10(u64::from(currency.decimals()));
        Self {
            currency,
            fraction,
            decimal_scale,
        }
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Raw amount in smallest units, possibly fractional.
    pub fn raw(&self) -> &Fraction {
        &self.fraction
    }

    /// Whole smallest units, truncated.
    pub fn quotient(&self) -> BigInt {
        self.fraction.quotient()
    }

    pub fn is_zero(&self) -> bool {
        self.fraction.is_zero()
    }

    /// `10^decimals`.
    pub fn decimal_scale(&self) -> &BigInt {
        &self.decimal_scale
    }

    /// The amount in whole units, i.e. `raw / 10^decimals`.
    pub fn decimal_value(&self) -> Fraction {
        Fraction::new(
            self.fraction.numerator().clone(),
            self.fraction.denominator() * &self.decimal_scale,
        )
    }

    /// Full-precision decimal with trailing zeros removed. Digits beyond the
    /// currency's decimals (only possible for fractional raw amounts) are
    /// truncated.
    pub fn to_exact(&self) -> String {
        let fixed = self.decimal_value().to_fixed(
            u32::from(self.currency.decimals()),
            None,
            Rounding::RoundDown,
        );
        if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            fixed
        }
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        self.decimal_value()
            .to_significant(significant_digits, group_separator, rounding)
    }

    /// Panics if `decimal_places` exceeds the currency's decimals.
    pub fn to_fixed(
        &self,
        decimal_places: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        assert!(
            decimal_places <= u32::from(self.currency.decimals()),
            "decimal places exceed currency decimals"
        );
        self.decimal_value()
            .to_fixed(decimal_places, group_separator, rounding)
    }

    pub fn checked_add(&self, other: &CurrencyAmount) -> Result<Self, SdkError> {
        self.ensure_same_currency(other)?;
        Self::checked(self.currency.clone(), &self.fraction + &other.fraction)
    }

    /// Fails with [`SdkError::InvalidAmount`] if `other` is larger.
    pub fn checked_sub(&self, other: &CurrencyAmount) -> Result<Self, SdkError> {
        self.ensure_same_currency(other)?;
        Self::checked(self.currency.clone(), &self.fraction - &other.fraction)
    }

    pub fn multiply(&self, other: &Fraction) -> Result<Self, SdkError> {
        Self::checked(self.currency.clone(), &self.fraction * other)
    }

    pub fn divide(&self, other: &Fraction) -> Result<Self, SdkError> {
        if other.is_zero() {
            return Err(SdkError::DivisionByZero);
        }
        Self::checked(self.currency.clone(), &self.fraction / other)
    }

    /// The same amount expressed in the currency's wrapped token.
    pub fn wrapped(&self) -> CurrencyAmount {
        match self.currency {
            Currency::Token(_) => self.clone(),
            Currency::Native(ref native) => self.with_currency(native.wrapped.clone().into()),
        }
    }

    /// The same raw amount under another currency. Callers guarantee the
    /// currencies share decimals (a native currency and its wrapped token).
    pub(crate) fn with_currency(&self, currency: Currency) -> CurrencyAmount {
        Self::unchecked(currency, self.fraction.clone())
    }

    fn ensure_same_currency(&self, other: &CurrencyAmount) -> Result<(), SdkError> {
        if self.currency != other.currency {
            return Err(SdkError::currency_mismatch(&self.currency, &other.currency));
        }
        Ok(())
    }
}

impl PartialEq for CurrencyAmount {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.fraction == other.fraction
    }
}

impl Eq for CurrencyAmount {}

/// Amounts of different currencies are unordered.
impl PartialOrd for CurrencyAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.fraction.cmp(&other.fraction))
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{NativeCurrency, Token};
    use crate::types::Address;

    fn usdc() -> Token {
        Token::new(1, Address::repeat_byte(0x01), 6, Some("USDC"), None)
    }

    fn dai() -> Token {
        Token::new(1, Address::repeat_byte(0x02), 18, Some("DAI"), None)
    }

    #[test]
    fn test_to_exact_is_exact() {
        let amount = CurrencyAmount::from_raw_amount(usdc(), 1_500_000).unwrap();
        assert_eq!(amount.to_exact(), "1.5");

        let amount = CurrencyAmount::from_raw_amount(dai(), 1).unwrap();
        assert_eq!(amount.to_exact(), "0.000000000000000001");

        let amount = CurrencyAmount::from_raw_amount(usdc(), 2_000_000).unwrap();
        assert_eq!(amount.to_exact(), "2");
    }

    #[test]
    fn test_formatting() {
        let amount = CurrencyAmount::from_raw_amount(usdc(), 1_234_567_891u64).unwrap();
        assert_eq!(amount.to_fixed(2, Some(','), Rounding::RoundHalfUp), "1,234.57");
        assert_eq!(amount.to_significant(3, None, Rounding::RoundDown), "1230");
        assert_eq!(amount.to_string(), "1234.567891 USDC");
    }

    #[test]
    #[should_panic(expected = "decimal places exceed currency decimals")]
    fn test_to_fixed_rejects_extra_places() {
        let amount = CurrencyAmount::from_raw_amount(usdc(), 1).unwrap();
        amount.to_fixed(7, None, Rounding::RoundDown);
    }

    #[test]
    fn test_parse() {
        let amount = CurrencyAmount::parse(usdc(), "12.5").unwrap();
        assert_eq!(amount.quotient(), BigInt::from(12_500_000));

        let amount = CurrencyAmount::parse(usdc(), ".000001").unwrap();
        assert_eq!(amount.quotient(), BigInt::from(1));

        for bad in ["", ".", "1.2.3", "-1", "1e6", "abc", "0.0000001"] {
            assert!(
                matches!(CurrencyAmount::parse(usdc(), bad), Err(SdkError::InvalidAmount(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            CurrencyAmount::from_raw_amount(dai(), -1),
            Err(SdkError::InvalidAmount(_))
        ));
        assert!(CurrencyAmount::from_raw_amount(dai(), max_uint256()).is_ok());
        assert!(matches!(
            CurrencyAmount::from_raw_amount(dai(), max_uint256() + 1),
            Err(SdkError::InvalidAmount(_))
        ));
        assert_eq!(
            CurrencyAmount::from_fractional_amount(dai(), 1, 0).unwrap_err(),
            SdkError::DivisionByZero
        );
    }

    #[test]
    fn test_arithmetic_requires_same_currency() {
        let a = CurrencyAmount::from_raw_amount(dai(), 100).unwrap();
        let b = CurrencyAmount::from_raw_amount(dai(), 40).unwrap();
        let c = CurrencyAmount::from_raw_amount(usdc(), 40).unwrap();

        assert_eq!(a.checked_add(&b).unwrap().quotient(), BigInt::from(140));
        assert_eq!(a.checked_sub(&b).unwrap().quotient(), BigInt::from(60));
        assert!(matches!(b.checked_sub(&a), Err(SdkError::InvalidAmount(_))));
        assert!(matches!(
            a.checked_add(&c),
            Err(SdkError::CurrencyMismatch { .. })
        ));

        assert!(b < a);
        assert_eq!(a.partial_cmp(&c), None);
    }

    #[test]
    fn test_multiply_and_divide() {
        let a = CurrencyAmount::from_raw_amount(dai(), 100).unwrap();
        let half = a.multiply(&Fraction::new(1, 2)).unwrap();
        assert_eq!(half.quotient(), BigInt::from(50));

        let third = a.divide(&Fraction::from_integer(3)).unwrap();
        assert_eq!(third.quotient(), BigInt::from(33));
        assert_eq!(third.raw(), &Fraction::new(100, 3));

        assert_eq!(a.divide(&Fraction::zero()).unwrap_err(), SdkError::DivisionByZero);
    }

    #[test]
    fn test_wrapped() {
        let ether = NativeCurrency::ether(1).unwrap();
        let amount = CurrencyAmount::from_raw_amount(ether.clone(), 42).unwrap();
        let wrapped = amount.wrapped();

        assert_eq!(wrapped.currency(), &Currency::Token(ether.wrapped));
        assert_eq!(wrapped.raw(), amount.raw());
        assert_ne!(wrapped, amount);
    }
}
