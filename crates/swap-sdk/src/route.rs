//! Validated multi-hop paths through pairs.

use crate::currency::{Currency, Token};
use crate::error::SdkError;
use crate::pair::Pair;
use crate::price::Price;
use crate::types::ChainId;
use std::fmt;

/// An ordered list of pairs joining `input` to `output`.
///
/// `path` holds the tokens visited, so it is always one longer than
/// `pairs`. Native endpoints are traversed as their wrapped tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pairs: Vec<Pair>,
    path: Vec<Token>,
    input: Currency,
    output: Currency,
}

impl Route {
    /// Build a route from `input` through `pairs`. When `output` is `None`
    /// it is the last token on the path.
    pub fn new(
        pairs: Vec<Pair>,
        input: Currency,
        output: Option<Currency>,
    ) -> Result<Self, SdkError> {
        let first = pairs
            .first()
            .ok_or(SdkError::InvalidRoute("route must contain at least one pair"))?;
        let chain_id = first.chain_id();
        if pairs.iter().any(|pair| pair.chain_id() != chain_id) {
            return Err(SdkError::InvalidRoute("pairs are on different chains"));
        }
        if !first.involves_token(input.wrapped()) {
            return Err(SdkError::InvalidRoute("input is not in the first pair"));
        }
        if let (Some(output), Some(last)) = (&output, pairs.last()) {
            if !last.involves_token(output.wrapped()) {
                return Err(SdkError::InvalidRoute("output is not in the last pair"));
            }
        }

        let mut path = Vec::with_capacity(pairs.len() + 1);
        path.push(input.wrapped().clone());
        for pair in &pairs {
            let current = &path[path.len() - 1];
            let next = pair
                .other_token(current)
                .ok_or(SdkError::InvalidRoute("pairs do not form a connected path"))?
                .clone();
            path.push(next);
        }

        let end = &path[path.len() - 1];
        let output = match output {
            Some(output) if output.wrapped() == end => output,
            Some(_) => return Err(SdkError::InvalidRoute("path does not end at the output")),
            None => Currency::Token(end.clone()),
        };

        Ok(Self {
            pairs,
            path,
            input,
            output,
        })
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn input(&self) -> &Currency {
        &self.input
    }

    pub fn output(&self) -> &Currency {
        &self.output
    }

    pub fn chain_id(&self) -> ChainId {
        self.pairs[0].chain_id()
    }

    /// Get the number of hops in this route.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false: a route has at least one pair.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Spot price of `input` in `output` across every hop, fee excluded.
    pub fn mid_price(&self) -> Result<Price, SdkError> {
        let mut hops = self.pairs.iter().zip(&self.path).map(|(pair, token)| {
            if token == pair.token0() {
                pair.token0_price()
            } else {
                pair.token1_price()
            }
        });

        let mut price = match hops.next() {
            Some(first) => first?,
            None => return Err(SdkError::InvalidRoute("route must contain at least one pair")),
        };
        for hop in hops {
            price = price.multiply(&hop?)?;
        }

        Ok(Price::new(
            self.input.clone(),
            self.output.clone(),
            price.raw().denominator().clone(),
            price.raw().numerator().clone(),
        ))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hops: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        write!(f, "{}", hops.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::CurrencyAmount;
    use crate::currency::NativeCurrency;
    use crate::fraction::Fraction;
    use crate::types::Address;

    fn token(byte: u8) -> Token {
        Token::new(
            1,
            Address::repeat_byte(byte),
            18,
            Some(&format!("t{byte}")),
            None,
        )
    }

    fn pair(a: &Token, ra: u64, b: &Token, rb: u64) -> Pair {
        Pair::new(
            CurrencyAmount::from_raw_amount(a.clone(), ra).unwrap(),
            CurrencyAmount::from_raw_amount(b.clone(), rb).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_path_follows_pairs() {
        let (t0, t1, t2) = (token(0x01), token(0x02), token(0x03));
        let route = Route::new(
            vec![pair(&t0, 100, &t1, 200), pair(&t2, 100, &t1, 200)],
            t0.clone().into(),
            None,
        )
        .unwrap();

        assert_eq!(route.path(), &[t0.clone(), t1, t2.clone()]);
        assert_eq!(route.input(), &Currency::Token(t0));
        assert_eq!(route.output(), &Currency::Token(t2));
        assert_eq!(route.len(), 2);
        assert_eq!(route.chain_id(), 1);
        assert_eq!(route.to_string(), "t1 -> t2 -> t3");
    }

    #[test]
    fn test_invalid_routes() {
        let (t0, t1, t2, t3) = (token(0x01), token(0x02), token(0x03), token(0x04));

        assert!(matches!(
            Route::new(vec![], t0.clone().into(), None),
            Err(SdkError::InvalidRoute(_))
        ));
        // input not in first pair
        assert!(matches!(
            Route::new(vec![pair(&t1, 1, &t2, 1)], t0.clone().into(), None),
            Err(SdkError::InvalidRoute(_))
        ));
        // output not in last pair
        assert!(matches!(
            Route::new(vec![pair(&t0, 1, &t1, 1)], t0.clone().into(), Some(t3.clone().into())),
            Err(SdkError::InvalidRoute(_))
        ));
        // broken adjacency
        assert!(matches!(
            Route::new(
                vec![pair(&t0, 1, &t1, 1), pair(&t2, 1, &t3, 1)],
                t0.clone().into(),
                None
            ),
            Err(SdkError::InvalidRoute(_))
        ));
        // output in the last pair but not at the end of the path
        assert!(matches!(
            Route::new(vec![pair(&t0, 1, &t1, 1)], t0.clone().into(), Some(t0.clone().into())),
            Err(SdkError::InvalidRoute(_))
        ));
        // mixed chains
        let far = Token::new(5, Address::repeat_byte(0x05), 18, None, None);
        let far2 = Token::new(5, Address::repeat_byte(0x06), 18, None, None);
        assert!(matches!(
            Route::new(
                vec![pair(&t0, 1, &t1, 1), pair(&far, 1, &far2, 1)],
                t0.into(),
                None
            ),
            Err(SdkError::InvalidRoute(_))
        ));
    }

    #[test]
    fn test_native_endpoints() {
        let ether = NativeCurrency::ether(1).unwrap();
        let t0 = token(0x01);
        let route = Route::new(
            vec![pair(&ether.wrapped, 100, &t0, 200)],
            ether.clone().into(),
            None,
        )
        .unwrap();

        assert_eq!(route.path()[0], ether.wrapped);
        assert_eq!(route.input(), &Currency::Native(ether.clone()));
        assert_eq!(route.output(), &Currency::Token(t0.clone()));

        let reversed = Route::new(
            vec![pair(&ether.wrapped, 100, &t0, 200)],
            t0.into(),
            Some(ether.clone().into()),
        )
        .unwrap();
        assert_eq!(reversed.output(), &Currency::Native(ether));
    }

    #[test]
    fn test_mid_price() {
        let (t0, t1, t2) = (token(0x01), token(0x02), token(0x03));
        let route = Route::new(
            vec![pair(&t0, 100, &t1, 200), pair(&t1, 400, &t2, 100)],
            t0.clone().into(),
            None,
        )
        .unwrap();

        let price = route.mid_price().unwrap();
        // 2 t1 per t0, then 0.25 t2 per t1
        assert_eq!(price.raw(), &Fraction::new(1, 2));
        assert_eq!(price.base_currency(), &Currency::Token(t0.clone()));
        assert_eq!(price.quote_currency(), &Currency::Token(t2));

        let reversed = Route::new(vec![pair(&t0, 100, &t1, 200)], t1.into(), None).unwrap();
        assert_eq!(reversed.mid_price().unwrap().raw(), &Fraction::new(1, 2));

        let empty = Route::new(vec![pair(&t0, 0, &token(0x09), 0)], t0.into(), None).unwrap();
        assert_eq!(empty.mid_price().unwrap_err(), SdkError::InsufficientReserves);
    }
}
