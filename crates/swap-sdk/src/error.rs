//! Errors returned by the pricing engine.
//!
//! Every variant is a construction-time rejection: nothing is clamped, retried
//! or partially filled. The only recovery is to retry with fresher inputs.

use crate::types::Address;

/// Errors that can occur while building amounts, pairs, routes and trades.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// Malformed, negative, over-precision or out-of-range amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Arithmetic or lookup attempted with the wrong currency.
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },

    /// Pairs do not form a valid path between the requested currencies.
    #[error("invalid route: {0}")]
    InvalidRoute(&'static str),

    /// A reserve is empty or the requested output meets or exceeds it.
    #[error("insufficient reserves")]
    InsufficientReserves,

    /// The input is too small to produce any output.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// The two tokens cannot form a pair.
    #[error("invalid pair: {0}")]
    InvalidPair(&'static str),

    /// The string is not a 20-byte hex address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Slippage tolerance must not be negative.
    #[error("slippage tolerance must be non-negative")]
    InvalidSlippageTolerance,

    /// Bad arguments to a best-trade search.
    #[error("invalid options: {0}")]
    InvalidOptions(&'static str),

    /// A fraction was built with a zero denominator.
    #[error("division by zero")]
    DivisionByZero,
}

impl SdkError {
    pub(crate) fn currency_mismatch(
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        SdkError::CurrencyMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub(crate) fn token_not_in_pair(token: Address, token0: Address, token1: Address) -> Self {
        SdkError::CurrencyMismatch {
            expected: format!("{token0} or {token1}"),
            actual: token.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SdkError::InsufficientReserves.to_string(),
            "insufficient reserves"
        );
        assert_eq!(
            SdkError::InvalidRoute("no pairs").to_string(),
            "invalid route: no pairs"
        );
        assert_eq!(
            SdkError::currency_mismatch("WETH", "DAI").to_string(),
            "currency mismatch: expected WETH, got DAI"
        );
    }
}
