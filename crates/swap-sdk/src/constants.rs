//! Protocol constants.

use crate::types::{Address, BigInt, ChainId, B256};
use alloy::primitives::{address, b256};
use num_bigint::Sign;

/// Uniswap V2 factory, the CREATE2 deployer of every pair.
pub const FACTORY_ADDRESS: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");

/// keccak256 of the pair contract creation code.
pub const INIT_CODE_HASH: B256 =
    b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f");

/// Liquidity permanently locked by the first mint of every pair.
pub const MINIMUM_LIQUIDITY: u64 = 1000;

/// Denominator of `fee_bps`.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Decimals of the pair liquidity token.
pub const LIQUIDITY_TOKEN_DECIMALS: u8 = 18;

/// Largest raw amount an ERC-20 can hold.
pub(crate) fn max_uint256() -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &[0xff; 32])
}

/// WETH9 deployments, keyed by chain.
const WETH9_ADDRESSES: [(ChainId, Address); 6] = [
    (1, address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")),
    (3, address!("c778417E063141139Fce010982780140Aa0cD5Ab")),
    (4, address!("c778417E063141139Fce010982780140Aa0cD5Ab")),
    (5, address!("B4FBF271143F4FBf7B91A5ded31805e42b2208d6")),
    (42, address!("d0A1E359811322d97991E03f863a0C30C2cF029C")),
    (11155111, address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14")),
];

/// Address of the wrapped native token on `chain_id`, if known.
pub fn weth9_address(chain_id: ChainId) -> Option<Address> {
    WETH9_ADDRESSES
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, addr)| *addr)
}
