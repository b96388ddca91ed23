//! Exchange rates between two currencies.

use crate::amount::CurrencyAmount;
use crate::currency::Currency;
use crate::error::SdkError;
use crate::fraction::{pow10, Fraction};
use crate::types::{BigInt, Rounding};
use std::fmt;

/// Rate of `quote` per unit of `base`.
///
/// Stored in raw units (smallest quote unit per smallest base unit);
/// [`adjusted`](Price::adjusted) gives the human-readable rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    base_currency: Currency,
    quote_currency: Currency,
    fraction: Fraction,
    scalar: Fraction,
}

impl Price {
    /// `numerator` raw quote units per `denominator` raw base units.
    /// Panics if `denominator` is zero.
    pub fn new(
        base_currency: Currency,
        quote_currency: Currency,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Self {
        let scalar = Fraction::new(
            pow10(u64::from(base_currency.decimals())),
            pow10(u64::from(quote_currency.decimals())),
        );
        Self {
            base_currency,
            quote_currency,
            fraction: Fraction::new(numerator, denominator),
            scalar,
        }
    }

    /// The price at which `base` exchanges for `quote`. Panics if `base` is zero.
    pub fn from_amounts(base: &CurrencyAmount, quote: &CurrencyAmount) -> Self {
        let raw = quote.raw() / base.raw();
        Self::new(
            base.currency().clone(),
            quote.currency().clone(),
            raw.denominator().clone(),
            raw.numerator().clone(),
        )
    }

    pub fn base_currency(&self) -> &Currency {
        &self.base_currency
    }

    pub fn quote_currency(&self) -> &Currency {
        &self.quote_currency
    }

    /// Raw quote units per raw base unit.
    pub fn raw(&self) -> &Fraction {
        &self.fraction
    }

    /// `10^base.decimals / 10^quote.decimals`.
    pub fn scalar(&self) -> &Fraction {
        &self.scalar
    }

    /// Whole quote units per whole base unit.
    pub fn adjusted(&self) -> Fraction {
        &self.fraction * &self.scalar
    }

    /// The reverse rate. Panics if the price is zero.
    pub fn invert(&self) -> Price {
        Price::new(
            self.quote_currency.clone(),
            self.base_currency.clone(),
            self.fraction.numerator().clone(),
            self.fraction.denominator().clone(),
        )
    }

    /// Chain two rates: `self` quotes B per A and `other` C per B, the
    /// product quotes C per A.
    pub fn multiply(&self, other: &Price) -> Result<Price, SdkError> {
        if self.quote_currency != other.base_currency {
            return Err(SdkError::currency_mismatch(
                &self.quote_currency,
                &other.base_currency,
            ));
        }
        let fraction = &self.fraction * &other.fraction;
        Ok(Price::new(
            self.base_currency.clone(),
            other.quote_currency.clone(),
            fraction.denominator().clone(),
            fraction.numerator().clone(),
        ))
    }

    /// Convert an amount of the base currency into the quote currency.
    /// The result keeps full precision.
    pub fn quote(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount, SdkError> {
        if amount.currency() != &self.base_currency {
            return Err(SdkError::currency_mismatch(
                &self.base_currency,
                amount.currency(),
            ));
        }
        let result = &self.fraction * amount.raw();
        CurrencyAmount::from_fractional_amount(
            self.quote_currency.clone(),
            result.numerator().clone(),
            result.denominator().clone(),
        )
    }

    pub fn to_significant(
        &self,
        significant_digits: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        self.adjusted()
            .to_significant(significant_digits, group_separator, rounding)
    }

    pub fn to_fixed(
        &self,
        decimal_places: u32,
        group_separator: Option<char>,
        rounding: Rounding,
    ) -> String {
        self.adjusted()
            .to_fixed(decimal_places, group_separator, rounding)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.to_significant(6, None, Rounding::RoundHalfUp),
            self.quote_currency,
            self.base_currency
        )
    }
}
