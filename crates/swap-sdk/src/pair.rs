//! Constant-product pools.

use crate::amount::CurrencyAmount;
use crate::config::DexConfig;
use crate::constants::{BPS_DENOMINATOR, LIQUIDITY_TOKEN_DECIMALS, MINIMUM_LIQUIDITY};
use crate::currency::{Currency, Token};
use crate::error::SdkError;
use crate::fraction::Fraction;
use crate::price::Price;
use crate::types::{Address, BigInt, ChainId, B256};
use alloy::primitives::keccak256;
use num_traits::{Signed, Zero};
use std::fmt;
use tracing::trace;

/// Address of the pair contract for two tokens, as deployed by `factory`
/// through CREATE2. Token order does not matter.
pub fn compute_pair_address(
    factory: Address,
    init_code_hash: B256,
    token_a: &Token,
    token_b: &Token,
) -> Result<Address, SdkError> {
    // Sort tokens so the address is the same regardless of argument order
    let (first, second) = if token_a.sorts_before(token_b)? {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };

    // Salt is the hash of the packed addresses
    let mut data = [0u8; 40];
    data[..20].copy_from_slice(first.address.as_slice());
    data[20..].copy_from_slice(second.address.as_slice());
    let salt = keccak256(data);

    Ok(factory.create2(salt.0, init_code_hash.0))
}

/// A snapshot of a pool's reserves.
///
/// Reserves are ordered by token address: `token0` sorts before `token1`.
/// Swaps never mutate a pair; they return the post-swap pair alongside the
/// amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// ERC-20 minted to liquidity providers, living at the pair address.
    liquidity_token: Token,
    /// Reserves of `token0` and `token1`.
    token_amounts: [CurrencyAmount; 2],
    /// Swap fee in basis points.
    fee_bps: u32,
    /// Share of each input left after the fee.
    fee_multiplier: Fraction,
}

impl Pair {
    /// Create a pair with the default fee and factory.
    pub fn new(amount_a: CurrencyAmount, amount_b: CurrencyAmount) -> Result<Self, SdkError> {
        Self::with_config(amount_a, amount_b, &DexConfig::default())
    }

    /// Create a pair using the fee and factory from `config`.
    pub fn with_config(
        amount_a: CurrencyAmount,
        amount_b: CurrencyAmount,
        config: &DexConfig,
    ) -> Result<Self, SdkError> {
        if config.fee_bps >= BPS_DENOMINATOR {
            return Err(SdkError::InvalidPair("fee must be below 100%"));
        }
        let token_a = reserve_token(&amount_a)?;
        let token_b = reserve_token(&amount_b)?;

        let address = Self::address_of(token_a, token_b, config)?;
        let liquidity_token = Token::new(
            token_a.chain_id,
            address,
            LIQUIDITY_TOKEN_DECIMALS,
            Some("UNI-V2"),
            Some("Uniswap V2"),
        );

        let token_amounts = if token_a.sorts_before(token_b)? {
            [amount_a, amount_b]
        } else {
            [amount_b, amount_a]
        };

        Ok(Self {
            liquidity_token,
            token_amounts,
            fee_bps: config.fee_bps,
            fee_multiplier: config.fee_multiplier(),
        })
    }

    /// Pair address for two tokens under `config`'s factory.
    pub fn address_of(
        token_a: &Token,
        token_b: &Token,
        config: &DexConfig,
    ) -> Result<Address, SdkError> {
        compute_pair_address(
            config.factory_address,
            config.init_code_hash,
            token_a,
            token_b,
        )
    }

    pub fn address(&self) -> Address {
        self.liquidity_token.address
    }

    pub fn liquidity_token(&self) -> &Token {
        &self.liquidity_token
    }

    pub fn chain_id(&self) -> ChainId {
        self.token0().chain_id
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    pub fn token0(&self) -> &Token {
        self.token_amounts[0].currency().wrapped()
    }

    pub fn token1(&self) -> &Token {
        self.token_amounts[1].currency().wrapped()
    }

    pub fn reserve0(&self) -> &CurrencyAmount {
        &self.token_amounts[0]
    }

    pub fn reserve1(&self) -> &CurrencyAmount {
        &self.token_amounts[1]
    }

    /// Check if this pair contains the given token.
    pub fn involves_token(&self, token: &Token) -> bool {
        self.token0() == token || self.token1() == token
    }

    /// Get the other token in the pair.
    pub fn other_token(&self, token: &Token) -> Option<&Token> {
        if self.token0() == token {
            Some(self.token1())
        } else if self.token1() == token {
            Some(self.token0())
        } else {
            None
        }
    }

    pub fn reserve_of(&self, token: &Token) -> Result<&CurrencyAmount, SdkError> {
        if self.token0() == token {
            Ok(self.reserve0())
        } else if self.token1() == token {
            Ok(self.reserve1())
        } else {
            Err(self.not_in_pair(token))
        }
    }

    /// Spot price of token0 in token1, fee excluded.
    pub fn token0_price(&self) -> Result<Price, SdkError> {
        self.ensure_reserves()?;
        Ok(Price::from_amounts(self.reserve0(), self.reserve1()))
    }

    /// Spot price of token1 in token0, fee excluded.
    pub fn token1_price(&self) -> Result<Price, SdkError> {
        self.ensure_reserves()?;
        Ok(Price::from_amounts(self.reserve1(), self.reserve0()))
    }

    /// Spot price of `token` in the pair's other token.
    pub fn price_of(&self, token: &Token) -> Result<Price, SdkError> {
        if self.token0() == token {
            self.token0_price()
        } else if self.token1() == token {
            self.token1_price()
        } else {
            Err(self.not_in_pair(token))
        }
    }

    /// Output received for swapping `input_amount` into the pair, and the
    /// pair after the swap.
    ///
    /// `out = in * (1 - fee) * r_out / (r_in + in * (1 - fee))`, rounded down.
    pub fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount,
    ) -> Result<(CurrencyAmount, Pair), SdkError> {
        let token_in = self.pair_token(input_amount)?;
        self.ensure_reserves()?;

        let input_reserve = self.reserve_of(token_in)?;
        let output_reserve = self.opposite_reserve(token_in)?;

        let fee = &self.fee_multiplier;
        let input_with_fee = input_amount.quotient() * fee.numerator();
        let numerator = &input_with_fee * output_reserve.quotient();
        let denominator = input_reserve.quotient() * fee.denominator() + input_with_fee;

        let output_amount = CurrencyAmount::from_raw_amount(
            output_reserve.currency().clone(),
            numerator / denominator,
        )?;
        if output_amount.is_zero() {
            return Err(SdkError::InsufficientInputAmount);
        }

        trace!(
            pair = %self.address(),
            amount_in = %input_amount.quotient(),
            amount_out = %output_amount.quotient(),
            "simulated exact-in hop"
        );

        let next = self.with_reserves(
            input_reserve.checked_add(input_amount)?,
            output_reserve.checked_sub(&output_amount)?,
        );
        Ok((output_amount, next))
    }

    /// Input required to take `output_amount` out of the pair, and the pair
    /// after the swap.
    ///
    /// `in = r_in * out / ((r_out - out) * (1 - fee)) + 1`, so the pool never
    /// ends up below its constant product.
    pub fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount,
    ) -> Result<(CurrencyAmount, Pair), SdkError> {
        let token_out = self.pair_token(output_amount)?;
        let output_reserve = self.reserve_of(token_out)?;
        let input_reserve = self.opposite_reserve(token_out)?;

        if self.reserve0().is_zero()
            || self.reserve1().is_zero()
            || output_amount.quotient() >= output_reserve.quotient()
        {
            return Err(SdkError::InsufficientReserves);
        }

        let fee = &self.fee_multiplier;
        let numerator = input_reserve.quotient() * output_amount.quotient() * fee.denominator();
        let denominator =
            (output_reserve.quotient() - output_amount.quotient()) * fee.numerator();

        let input_amount = CurrencyAmount::from_raw_amount(
            input_reserve.currency().clone(),
            numerator / denominator + 1,
        )?;

        trace!(
            pair = %self.address(),
            amount_in = %input_amount.quotient(),
            amount_out = %output_amount.quotient(),
            "simulated exact-out hop"
        );

        let next = self.with_reserves(
            input_reserve.checked_add(&input_amount)?,
            output_reserve.checked_sub(output_amount)?,
        );
        Ok((input_amount, next))
    }

    /// Liquidity tokens minted for depositing `amount_a` and `amount_b`.
    ///
    /// The first deposit mints `sqrt(a * b)` less the permanently locked
    /// minimum; later deposits mint in proportion to the smaller side.
    pub fn get_liquidity_minted(
        &self,
        total_supply: &CurrencyAmount,
        amount_a: &CurrencyAmount,
        amount_b: &CurrencyAmount,
    ) -> Result<CurrencyAmount, SdkError> {
        self.ensure_liquidity_token(total_supply)?;
        let token_a = self.pair_token(amount_a)?;
        let token_b = self.pair_token(amount_b)?;
        let (amount0, amount1) = if token_a.sorts_before(token_b)? {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };

        let supply = total_supply.quotient();
        let liquidity = if supply.is_zero() {
            (amount0.quotient() * amount1.quotient()).sqrt() - BigInt::from(MINIMUM_LIQUIDITY)
        } else {
            self.ensure_reserves()?;
            let by0 = amount0.quotient() * &supply / self.reserve0().quotient();
            let by1 = amount1.quotient() * &supply / self.reserve1().quotient();
            by0.min(by1)
        };

        if !liquidity.is_positive() {
            return Err(SdkError::InsufficientInputAmount);
        }
        CurrencyAmount::from_raw_amount(self.liquidity_token.clone(), liquidity)
    }

    /// Share of `token` reserves redeemable for `liquidity`.
    ///
    /// With the protocol fee on, the supply is first diluted by the fee
    /// liquidity accrued since `k_last` (the reserve product at the last
    /// mint or burn).
    pub fn get_liquidity_value(
        &self,
        token: &Token,
        total_supply: &CurrencyAmount,
        liquidity: &CurrencyAmount,
        fee_on: bool,
        k_last: Option<&BigInt>,
    ) -> Result<CurrencyAmount, SdkError> {
        self.ensure_liquidity_token(total_supply)?;
        self.ensure_liquidity_token(liquidity)?;
        let reserve = self.reserve_of(token)?;
        if liquidity.quotient() > total_supply.quotient() {
            return Err(SdkError::InvalidAmount(
                "liquidity exceeds total supply".to_string(),
            ));
        }

        let mut supply = total_supply.quotient();
        if fee_on {
            let k_last = k_last.ok_or_else(|| {
                SdkError::InvalidAmount("k_last is required when the fee is on".to_string())
            })?;
            if !k_last.is_zero() {
                let root_k = (self.reserve0().quotient() * self.reserve1().quotient()).sqrt();
                let root_k_last = k_last.sqrt();
                if root_k > root_k_last {
                    let numerator = &supply * (&root_k - &root_k_last);
                    let denominator = root_k * 5 + root_k_last;
                    supply += numerator / denominator;
                }
            }
        }

        if supply.is_zero() {
            return Err(SdkError::InvalidAmount("total supply is zero".to_string()));
        }
        CurrencyAmount::from_raw_amount(
            reserve.currency().clone(),
            liquidity.quotient() * reserve.quotient() / supply,
        )
    }

    fn ensure_reserves(&self) -> Result<(), SdkError> {
        if self.reserve0().is_zero() || self.reserve1().is_zero() {
            return Err(SdkError::InsufficientReserves);
        }
        Ok(())
    }

    fn ensure_liquidity_token(&self, amount: &CurrencyAmount) -> Result<(), SdkError> {
        match amount.currency() {
            Currency::Token(token) if *token == self.liquidity_token => Ok(()),
            other => Err(SdkError::currency_mismatch(&self.liquidity_token, other)),
        }
    }

    /// The pair token `amount` is denominated in.
    fn pair_token<'a>(&self, amount: &'a CurrencyAmount) -> Result<&'a Token, SdkError> {
        match amount.currency() {
            Currency::Token(token) if self.involves_token(token) => Ok(token),
            Currency::Token(token) => Err(self.not_in_pair(token)),
            native => Err(SdkError::currency_mismatch(
                format!("{} or {}", self.token0(), self.token1()),
                native,
            )),
        }
    }

    fn opposite_reserve(&self, token: &Token) -> Result<&CurrencyAmount, SdkError> {
        let other = self.other_token(token).ok_or_else(|| self.not_in_pair(token))?;
        self.reserve_of(other)
    }

    fn not_in_pair(&self, token: &Token) -> SdkError {
        SdkError::token_not_in_pair(token.address, self.token0().address, self.token1().address)
    }

    /// Same pool with new reserves. Both amounts are in this pair's tokens.
    fn with_reserves(&self, amount_a: CurrencyAmount, amount_b: CurrencyAmount) -> Pair {
        let token_amounts = if amount_a.currency().wrapped() == self.token0() {
            [amount_a, amount_b]
        } else {
            [amount_b, amount_a]
        };
        Pair {
            liquidity_token: self.liquidity_token.clone(),
            token_amounts,
            fee_bps: self.fee_bps,
            fee_multiplier: self.fee_multiplier.clone(),
        }
    }
}

/// Tokens backing a pair reserve. Native currencies trade through their
/// wrapped token and cannot be a reserve themselves.
fn reserve_token(amount: &CurrencyAmount) -> Result<&Token, SdkError> {
    amount
        .currency()
        .as_token()
        .ok_or(SdkError::InvalidPair("reserves must be tokens"))
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0(), self.token1())
    }
}
