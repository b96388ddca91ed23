//! Core type definitions for the SDK.
//!
//! Re-exports from alloy-primitives for Ethereum-compatible identifiers and
//! from num-bigint for the arbitrary-precision integers every amount is built on.

pub use alloy::primitives::{Address, B256};
pub use num_bigint::BigInt;

/// EIP-155 chain identifier.
pub type ChainId = u64;

/// Which side of a trade the caller fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    /// The input amount is given, the output amount is simulated.
    ExactInput,
    /// The output amount is given, the input amount is simulated.
    ExactOutput,
}

/// Rounding applied when a rational value is rendered as a decimal string.
///
/// Every formatting call takes the rounding explicitly so output never
/// depends on shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Truncate toward zero.
    RoundDown,
    /// Round half away from zero.
    #[default]
    RoundHalfUp,
    /// Round away from zero whenever anything is discarded.
    RoundUp,
}
