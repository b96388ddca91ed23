//! Trade simulation and best-trade search.

use crate::amount::CurrencyAmount;
use crate::config::DexConfig;
use crate::currency::Currency;
use crate::error::SdkError;
use crate::fraction::Fraction;
use crate::pair::Pair;
use crate::percent::Percent;
use crate::price::Price;
use crate::route::Route;
use crate::types::TradeType;
use crate::utils::sorted_insert;
use num_traits::Zero;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Limits for [`Trade::best_trade_exact_in`] and [`Trade::best_trade_exact_out`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTradeOptions {
    /// How many trades to return.
    pub max_num_results: usize,
    /// Maximum number of pairs in a returned route.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        DexConfig::default().best_trade_options()
    }
}

/// A simulated swap along a route.
///
/// One side is the amount the caller fixed; the other is what the pairs
/// would produce (exact input) or require (exact output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
    execution_price: Price,
    next_mid_price: Price,
    price_impact: Percent,
}

impl Trade {
    /// Simulate `amount` through `route`.
    ///
    /// For [`TradeType::ExactInput`] `amount` is spent in `route.input()`;
    /// for [`TradeType::ExactOutput`] it is received in `route.output()`.
    pub fn new(
        route: Route,
        amount: CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<Self, SdkError> {
        let mut next_pairs = Vec::with_capacity(route.len());

        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                if amount.currency() != route.input() {
                    return Err(SdkError::currency_mismatch(route.input(), amount.currency()));
                }
                let mut current = amount.wrapped();
                for pair in route.pairs() {
                    let (output, next_pair) = pair.get_output_amount(&current)?;
                    current = output;
                    next_pairs.push(next_pair);
                }
                let output_amount = current.with_currency(route.output().clone());
                (amount, output_amount)
            }
            TradeType::ExactOutput => {
                if amount.currency() != route.output() {
                    return Err(SdkError::currency_mismatch(route.output(), amount.currency()));
                }
                let mut current = amount.wrapped();
                for pair in route.pairs().iter().rev() {
                    let (input, next_pair) = pair.get_input_amount(&current)?;
                    current = input;
                    next_pairs.push(next_pair);
                }
                next_pairs.reverse();
                let input_amount = current.with_currency(route.input().clone());
                (input_amount, amount)
            }
        };

        let execution_price = Price::new(
            input_amount.currency().clone(),
            output_amount.currency().clone(),
            input_amount.quotient(),
            output_amount.quotient(),
        );
        let next_mid_price = Route::new(
            next_pairs,
            route.input().clone(),
            Some(route.output().clone()),
        )?
        .mid_price()?;
        let price_impact =
            compute_price_impact(&route.mid_price()?, &input_amount, &output_amount)?;

        debug!(
            ?trade_type,
            hops = route.len(),
            amount_in = %input_amount,
            amount_out = %output_amount,
            %price_impact,
            "simulated trade"
        );

        Ok(Self {
            route,
            trade_type,
            input_amount,
            output_amount,
            execution_price,
            next_mid_price,
            price_impact,
        })
    }

    /// Simulate spending exactly `amount_in`.
    pub fn exact_in(route: Route, amount_in: CurrencyAmount) -> Result<Self, SdkError> {
        Self::new(route, amount_in, TradeType::ExactInput)
    }

    /// Simulate receiving exactly `amount_out`.
    pub fn exact_out(route: Route, amount_out: CurrencyAmount) -> Result<Self, SdkError> {
        Self::new(route, amount_out, TradeType::ExactOutput)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    /// Output received per unit of input.
    pub fn execution_price(&self) -> &Price {
        &self.execution_price
    }

    /// Mid price of the route once this trade has executed.
    pub fn next_mid_price(&self) -> &Price {
        &self.next_mid_price
    }

    /// Shortfall of the output against a fee-free trade at the mid price.
    pub fn price_impact(&self) -> &Percent {
        &self.price_impact
    }

    /// Least output acceptable with `slippage_tolerance`. Exact-output trades
    /// return their fixed output.
    pub fn minimum_amount_out(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<CurrencyAmount, SdkError> {
        check_slippage(slippage_tolerance)?;
        match self.trade_type {
            TradeType::ExactOutput => Ok(self.output_amount.clone()),
            TradeType::ExactInput => {
                let bound = &slippage_factor(slippage_tolerance).invert()
                    * &Fraction::from_integer(self.output_amount.quotient());
                CurrencyAmount::from_raw_amount(
                    self.output_amount.currency().clone(),
                    bound.quotient(),
                )
            }
        }
    }

    /// Most input acceptable with `slippage_tolerance`. Exact-input trades
    /// return their fixed input.
    pub fn maximum_amount_in(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<CurrencyAmount, SdkError> {
        check_slippage(slippage_tolerance)?;
        match self.trade_type {
            TradeType::ExactInput => Ok(self.input_amount.clone()),
            TradeType::ExactOutput => {
                let bound = &slippage_factor(slippage_tolerance)
                    * &Fraction::from_integer(self.input_amount.quotient());
                CurrencyAmount::from_raw_amount(
                    self.input_amount.currency().clone(),
                    bound.quotient(),
                )
            }
        }
    }

    /// Execution price if the trade settles at both slippage bounds.
    pub fn worst_execution_price(&self, slippage_tolerance: &Percent) -> Result<Price, SdkError> {
        let maximum_in = self.maximum_amount_in(slippage_tolerance)?;
        let minimum_out = self.minimum_amount_out(slippage_tolerance)?;
        if maximum_in.quotient().is_zero() {
            return Err(SdkError::InsufficientInputAmount);
        }
        Ok(Price::new(
            maximum_in.currency().clone(),
            minimum_out.currency().clone(),
            maximum_in.quotient(),
            minimum_out.quotient(),
        ))
    }

    /// Up to `options.max_num_results` exact-input trades from `amount_in`
    /// to `currency_out` over `pairs`, best first.
    ///
    /// Each pair is used at most once per route. Empty pairs and hops too
    /// small to produce output are skipped.
    pub fn best_trade_exact_in(
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>, SdkError> {
        check_search(pairs, options)?;
        let candidates: Vec<&Pair> = pairs.iter().collect();
        let mut best_trades = Vec::with_capacity(options.max_num_results);

        let search = ExactInSearch {
            original_amount_in: amount_in,
            currency_out,
            max_num_results: options.max_num_results,
        };
        search.run(&candidates, amount_in.wrapped(), options.max_hops, &[], &mut best_trades)?;

        debug!(
            candidates = pairs.len(),
            found = best_trades.len(),
            amount_in = %amount_in,
            currency_out = %currency_out,
            "best exact-in search finished"
        );
        Ok(best_trades)
    }

    /// Up to `options.max_num_results` exact-output trades from `currency_in`
    /// to `amount_out` over `pairs`, best first.
    ///
    /// Each pair is used at most once per route. Empty pairs and hops that
    /// would drain a reserve are skipped.
    pub fn best_trade_exact_out(
        pairs: &[Pair],
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>, SdkError> {
        check_search(pairs, options)?;
        let candidates: Vec<&Pair> = pairs.iter().collect();
        let mut best_trades = Vec::with_capacity(options.max_num_results);

        let search = ExactOutSearch {
            currency_in,
            original_amount_out: amount_out,
            max_num_results: options.max_num_results,
        };
        search.run(&candidates, amount_out.wrapped(), options.max_hops, &[], &mut best_trades)?;

        debug!(
            candidates = pairs.len(),
            found = best_trades.len(),
            currency_in = %currency_in,
            amount_out = %amount_out,
            "best exact-out search finished"
        );
        Ok(best_trades)
    }
}

/// Orders trades between the same currencies: more output first, then
/// less input.
pub fn input_output_comparator(a: &Trade, b: &Trade) -> Ordering {
    b.output_amount
        .raw()
        .cmp(a.output_amount.raw())
        .then_with(|| a.input_amount.raw().cmp(b.input_amount.raw()))
}

/// [`input_output_comparator`], then lower price impact, then fewer hops.
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    input_output_comparator(a, b)
        .then_with(|| a.price_impact.cmp(&b.price_impact))
        .then_with(|| a.route.path().len().cmp(&b.route.path().len()))
}

/// `(mid_quote - output) / mid_quote` where `mid_quote` is the output a
/// fee-free trade at the route mid price would have produced.
fn compute_price_impact(
    mid_price: &Price,
    input_amount: &CurrencyAmount,
    output_amount: &CurrencyAmount,
) -> Result<Percent, SdkError> {
    let exact_quote = mid_price.quote(input_amount)?;
    if exact_quote.is_zero() {
        return Err(SdkError::InsufficientInputAmount);
    }
    let shortfall = exact_quote.raw() - output_amount.raw();
    Ok(Percent::from(&shortfall / exact_quote.raw()))
}

fn check_slippage(slippage_tolerance: &Percent) -> Result<(), SdkError> {
    if slippage_tolerance.is_negative() {
        return Err(SdkError::InvalidSlippageTolerance);
    }
    Ok(())
}

/// `1 + slippage_tolerance`.
fn slippage_factor(slippage_tolerance: &Percent) -> Fraction {
    &Fraction::one() + slippage_tolerance.as_fraction()
}

fn check_search(pairs: &[Pair], options: BestTradeOptions) -> Result<(), SdkError> {
    if pairs.is_empty() {
        return Err(SdkError::InvalidOptions("no pairs to search"));
    }
    if options.max_hops == 0 {
        return Err(SdkError::InvalidOptions("max hops must be positive"));
    }
    if options.max_num_results == 0 {
        return Err(SdkError::InvalidOptions("max results must be positive"));
    }
    Ok(())
}

/// All candidates except the one at `index`, order preserved.
fn excluding<'a>(candidates: &[&'a Pair], index: usize) -> Vec<&'a Pair> {
    candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, pair)| *pair)
        .collect()
}

struct ExactInSearch<'a> {
    original_amount_in: &'a CurrencyAmount,
    currency_out: &'a Currency,
    max_num_results: usize,
}

impl ExactInSearch<'_> {
    /// Extend `current_pairs` (ending at `amount_in`'s token) by one hop.
    fn run(
        &self,
        candidates: &[&Pair],
        amount_in: CurrencyAmount,
        max_hops: usize,
        current_pairs: &[Pair],
        best_trades: &mut Vec<Trade>,
    ) -> Result<(), SdkError> {
        let token_in = amount_in.currency().wrapped();
        let token_out = self.currency_out.wrapped();

        for (index, pair) in candidates.iter().enumerate() {
            if !pair.involves_token(token_in) {
                continue;
            }
            if pair.reserve0().is_zero() || pair.reserve1().is_zero() {
                trace!(pair = %pair.address(), "skipping empty pair");
                continue;
            }

            let amount_out = match pair.get_output_amount(&amount_in) {
                Ok((amount_out, _)) => amount_out,
                Err(SdkError::InsufficientInputAmount) => {
                    trace!(pair = %pair.address(), "skipping hop with no output");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut pairs = current_pairs.to_vec();
            pairs.push((*pair).clone());

            if amount_out.currency().wrapped() == token_out {
                let route = Route::new(
                    pairs,
                    self.original_amount_in.currency().clone(),
                    Some(self.currency_out.clone()),
                )?;
                let trade = Trade::exact_in(route, self.original_amount_in.clone())?;
                sorted_insert(best_trades, trade, self.max_num_results, trade_comparator);
            } else if max_hops > 1 && candidates.len() > 1 {
                self.run(
                    &excluding(candidates, index),
                    amount_out,
                    max_hops - 1,
                    &pairs,
                    best_trades,
                )?;
            }
        }
        Ok(())
    }
}

struct ExactOutSearch<'a> {
    currency_in: &'a Currency,
    original_amount_out: &'a CurrencyAmount,
    max_num_results: usize,
}

impl ExactOutSearch<'_> {
    /// Extend `current_pairs` (starting at `amount_out`'s token) backwards
    /// by one hop.
    fn run(
        &self,
        candidates: &[&Pair],
        amount_out: CurrencyAmount,
        max_hops: usize,
        current_pairs: &[Pair],
        best_trades: &mut Vec<Trade>,
    ) -> Result<(), SdkError> {
        let token_out = amount_out.currency().wrapped();
        let token_in = self.currency_in.wrapped();

        for (index, pair) in candidates.iter().enumerate() {
            if !pair.involves_token(token_out) {
                continue;
            }
            if pair.reserve0().is_zero() || pair.reserve1().is_zero() {
                trace!(pair = %pair.address(), "skipping empty pair");
                continue;
            }

            let amount_in = match pair.get_input_amount(&amount_out) {
                Ok((amount_in, _)) => amount_in,
                Err(SdkError::InsufficientReserves) => {
                    trace!(pair = %pair.address(), "skipping hop without enough reserves");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut pairs = Vec::with_capacity(current_pairs.len() + 1);
            pairs.push((*pair).clone());
            pairs.extend_from_slice(current_pairs);

            if amount_in.currency().wrapped() == token_in {
                let route = Route::new(
                    pairs,
                    self.currency_in.clone(),
                    Some(self.original_amount_out.currency().clone()),
                )?;
                let trade = Trade::exact_out(route, self.original_amount_out.clone())?;
                sorted_insert(best_trades, trade, self.max_num_results, trade_comparator);
            } else if max_hops > 1 && candidates.len() > 1 {
                self.run(
                    &excluding(candidates, index),
                    amount_in,
                    max_hops - 1,
                    &pairs,
                    best_trades,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Token;
    use crate::types::{Address, BigInt, Rounding};

    fn token(byte: u8) -> Token {
        Token::new(1, Address::repeat_byte(byte), 18, None, None)
    }

    fn amount(token: &Token, raw: u64) -> CurrencyAmount {
        CurrencyAmount::from_raw_amount(token.clone(), raw).unwrap()
    }

    fn pair(a: &Token, ra: u64, b: &Token, rb: u64) -> Pair {
        Pair::new(amount(a, ra), amount(b, rb)).unwrap()
    }

    #[test]
    fn test_exact_in_single_hop() {
        let (t0, t1) = (token(0x01), token(0x02));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        let trade = Trade::exact_in(route, amount(&t0, 100)).unwrap();

        assert_eq!(trade.trade_type(), TradeType::ExactInput);
        assert_eq!(trade.input_amount(), &amount(&t0, 100));
        assert_eq!(trade.output_amount(), &amount(&t1, 90));
        assert_eq!(trade.execution_price().raw(), &Fraction::new(90, 100));
        // next mid price: 910 / 1100
        assert_eq!(trade.next_mid_price().raw(), &Fraction::new(910, 1100));
        // (100 - 90) / 100
        assert_eq!(trade.price_impact(), &Percent::new(10, 100));
    }

    #[test]
    fn test_exact_out_single_hop() {
        let (t0, t1) = (token(0x01), token(0x02));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        let trade = Trade::exact_out(route, amount(&t1, 90)).unwrap();

        assert_eq!(trade.input_amount(), &amount(&t0, 100));
        assert_eq!(trade.output_amount(), &amount(&t1, 90));
    }

    #[test]
    fn test_rejects_wrong_currency() {
        let (t0, t1) = (token(0x01), token(0x02));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();

        assert!(matches!(
            Trade::exact_in(route.clone(), amount(&t1, 100)),
            Err(SdkError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            Trade::exact_out(route, amount(&t0, 100)),
            Err(SdkError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_hop_errors_abort() {
        let (t0, t1) = (token(0x01), token(0x02));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();

        assert_eq!(
            Trade::exact_in(route.clone(), amount(&t0, 1)).unwrap_err(),
            SdkError::InsufficientInputAmount
        );
        assert_eq!(
            Trade::exact_out(route, amount(&t1, 1000)).unwrap_err(),
            SdkError::InsufficientReserves
        );
    }

    #[test]
    fn test_slippage_rejects_negative() {
        let (t0, t1) = (token(0x01), token(0x02));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        let trade = Trade::exact_in(route, amount(&t0, 100)).unwrap();
        let negative = Percent::new(-1, 100);

        assert_eq!(
            trade.minimum_amount_out(&negative).unwrap_err(),
            SdkError::InvalidSlippageTolerance
        );
        assert_eq!(
            trade.maximum_amount_in(&negative).unwrap_err(),
            SdkError::InvalidSlippageTolerance
        );
    }

    #[test]
    fn test_worst_execution_price() {
        let (t0, t1) = (token(0x01), token(0x02));
        let route = Route::new(vec![pair(&t0, 1000, &t1, 1000)], t0.clone().into(), None).unwrap();
        let trade = Trade::exact_in(route, amount(&t0, 100)).unwrap();

        // 90 / 1.1 = 81.8
        let worst = trade.worst_execution_price(&Percent::new(10, 100)).unwrap();
        assert_eq!(worst.raw(), &Fraction::new(81, 100));
        assert_eq!(worst.to_significant(2, None, Rounding::RoundDown), "0.81");
    }

    #[test]
    fn test_comparators() {
        let (t0, t1, t2) = (token(0x01), token(0x02), token(0x03));
        let direct = Trade::exact_in(
            Route::new(vec![pair(&t0, 1000, &t2, 1000)], t0.clone().into(), None).unwrap(),
            amount(&t0, 100),
        )
        .unwrap();
        let hopped = Trade::exact_in(
            Route::new(
                vec![pair(&t0, 1000, &t1, 1000), pair(&t1, 1000, &t2, 1000)],
                t0.clone().into(),
                None,
            )
            .unwrap(),
            amount(&t0, 100),
        )
        .unwrap();

        assert_eq!(input_output_comparator(&direct, &hopped), Ordering::Less);
        assert_eq!(input_output_comparator(&hopped, &direct), Ordering::Greater);
        assert_eq!(trade_comparator(&direct, &direct), Ordering::Equal);
        assert_eq!(hopped.output_amount().quotient(), BigInt::from(82));
    }

    #[test]
    fn test_default_options_follow_config() {
        let config = DexConfig::default();
        let options = BestTradeOptions::default();

        assert_eq!(options.max_hops, config.max_hops);
        assert_eq!(options.max_num_results, config.max_num_results);
    }

    #[test]
    fn test_search_rejects_bad_options() {
        let (t0, t2) = (token(0x01), token(0x03));
        let pairs = vec![pair(&t0, 1000, &t2, 1100)];
        let amount_in = amount(&t0, 100);
        let currency_out: Currency = t2.into();

        assert!(matches!(
            Trade::best_trade_exact_in(&[], &amount_in, &currency_out, BestTradeOptions::default()),
            Err(SdkError::InvalidOptions(_))
        ));
        let no_hops = BestTradeOptions {
            max_hops: 0,
            ..Default::default()
        };
        assert!(matches!(
            Trade::best_trade_exact_in(&pairs, &amount_in, &currency_out, no_hops),
            Err(SdkError::InvalidOptions(_))
        ));
        let no_results = BestTradeOptions {
            max_num_results: 0,
            ..Default::default()
        };
        assert!(matches!(
            Trade::best_trade_exact_out(&pairs, &t0.into(), &amount(&token(0x03), 10), no_results),
            Err(SdkError::InvalidOptions(_))
        ));
    }
}
