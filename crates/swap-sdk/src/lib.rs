//! Pricing and route evaluation for constant-product (Uniswap V2 style) pools.
//!
//! This library provides exact, deterministic swap math with:
//! - Arbitrary-precision fractions, percents and decimal formatting
//! - Decimal-aware currency amounts and prices
//! - Pair simulation with the 0.30% fee and CREATE2 pair addresses
//! - Multi-hop routes, trade simulation and best-trade search
//! - Slippage bounds and liquidity-token accounting
//!
//! Everything is a pure function of reserve snapshots: no I/O, no shared
//! state, and every value is immutable.

pub mod amount;
pub mod config;
pub mod constants;
pub mod currency;
pub mod error;
pub mod fraction;
pub mod pair;
pub mod percent;
pub mod price;
pub mod route;
pub mod trade;
pub mod types;
pub mod utils;

pub use amount::CurrencyAmount;
pub use config::DexConfig;
pub use currency::{Currency, NativeCurrency, Token};
pub use error::SdkError;
pub use fraction::Fraction;
pub use pair::{compute_pair_address, Pair};
pub use percent::Percent;
pub use price::Price;
pub use route::Route;
pub use trade::{input_output_comparator, trade_comparator, BestTradeOptions, Trade};
pub use types::{Address, BigInt, ChainId, Rounding, TradeType, B256};
pub use utils::sorted_insert;
