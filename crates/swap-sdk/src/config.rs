//! Engine configuration parameters.

use crate::constants::{BPS_DENOMINATOR, FACTORY_ADDRESS, INIT_CODE_HASH};
use crate::fraction::Fraction;
use crate::trade::BestTradeOptions;
use crate::types::{Address, B256};

/// Configuration for pair math and route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DexConfig {
    /// Fee charged on every swap input in basis points (1 bp = 0.01%).
    /// For example, 30 = 0.30% fee.
    pub fee_bps: u32,

    /// Factory that deploys pairs via CREATE2.
    pub factory_address: Address,

    /// Hash of the pair creation code used in the CREATE2 derivation.
    pub init_code_hash: B256,

    /// Maximum number of hops a searched trade may take.
    pub max_hops: usize,

    /// Number of trades kept by a best-trade search.
    pub max_num_results: usize,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            fee_bps: 30,        // 0.30% default fee
            factory_address: FACTORY_ADDRESS,
            init_code_hash: INIT_CODE_HASH,
            max_hops: 3,        // Max 3 hops (4 tokens in path)
            max_num_results: 3,
        }
    }
}

impl DexConfig {
    /// Create a new configuration with custom fee.
    pub fn with_fee_bps(mut self, fee_bps: u32) -> Self {
        self.fee_bps = fee_bps;
        self
    }

    /// Create a new configuration pointing at another factory deployment.
    pub fn with_factory(mut self, factory_address: Address, init_code_hash: B256) -> Self {
        self.factory_address = factory_address;
        self.init_code_hash = init_code_hash;
        self
    }

    /// Create a new configuration with custom max hops.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Create a new configuration with a custom result count.
    pub fn with_max_num_results(mut self, max_num_results: usize) -> Self {
        self.max_num_results = max_num_results;
        self
    }

    /// Basis points of the input that reach the pool after the fee.
    /// With the default fee this is 9970, i.e. the classic 997/1000.
    pub fn fee_complement_bps(&self) -> u32 {
        BPS_DENOMINATOR.saturating_sub(self.fee_bps)
    }

    /// Share of the input that remains after the fee, as an exact fraction.
    pub fn fee_multiplier(&self) -> Fraction {
        Fraction::new(self.fee_complement_bps(), BPS_DENOMINATOR)
    }

    /// Search limits for [`Trade::best_trade_exact_in`](crate::Trade::best_trade_exact_in)
    /// and [`Trade::best_trade_exact_out`](crate::Trade::best_trade_exact_out).
    pub fn best_trade_options(&self) -> BestTradeOptions {
        BestTradeOptions {
            max_num_results: self.max_num_results,
            max_hops: self.max_hops,
        }
    }
}
