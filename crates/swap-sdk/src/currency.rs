//! Asset identity: ERC-20 tokens, the chain's native currency, and the
//! [`Currency`] sum type pricing code works with.

use crate::constants::weth9_address;
use crate::error::SdkError;
use crate::types::{Address, ChainId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An ERC-20 token.
///
/// Identity is `(chain_id, address)`; decimals, symbol and name are metadata
/// and never take part in equality or hashing.
#[derive(Debug, Clone)]
pub struct Token {
    /// Chain the token is deployed on.
    pub chain_id: ChainId,
    /// Contract address.
    pub address: Address,
    /// Number of decimal places of the smallest unit.
    pub decimals: u8,
    /// Ticker, e.g. "DAI".
    pub symbol: Option<String>,
    /// Human-readable name.
    pub name: Option<String>,
}

impl Token {
    /// Create a new token.
    pub fn new(
        chain_id: ChainId,
        address: Address,
        decimals: u8,
        symbol: Option<&str>,
        name: Option<&str>,
    ) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.map(str::to_owned),
            name: name.map(str::to_owned),
        }
    }

    /// Create a token from a hex address string. Case is ignored.
    pub fn parse(
        chain_id: ChainId,
        address: &str,
        decimals: u8,
        symbol: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self, SdkError> {
        let address = address
            .parse::<Address>()
            .map_err(|_| SdkError::InvalidAddress(address.to_string()))?;
        Ok(Self::new(chain_id, address, decimals, symbol, name))
    }

    /// The canonical wrapped native token of `chain_id`, if one is known.
    pub fn weth9(chain_id: ChainId) -> Option<Self> {
        weth9_address(chain_id)
            .map(|address| Self::new(chain_id, address, 18, Some("WETH"), Some("Wrapped Ether")))
    }

    /// Whether this token is `token0` of a pair formed with `other`.
    ///
    /// Both tokens must be on the same chain and must differ.
    pub fn sorts_before(&self, other: &Token) -> Result<bool, SdkError> {
        if self.chain_id != other.chain_id {
            return Err(SdkError::InvalidPair("tokens are on different chains"));
        }
        if self.address == other.address {
            return Err(SdkError::InvalidPair("tokens are identical"));
        }
        Ok(self.address < other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{symbol}"),
            None => write!(f, "{}", self.address),
        }
    }
}

/// A chain's native currency (e.g. ether), which cannot sit in a pair
/// directly and is priced through its wrapped token.
#[derive(Debug, Clone)]
pub struct NativeCurrency {
    pub chain_id: ChainId,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
    /// ERC-20 stand-in used wherever a token is required.
    pub wrapped: Token,
}

impl NativeCurrency {
    pub fn new(
        chain_id: ChainId,
        decimals: u8,
        symbol: Option<&str>,
        name: Option<&str>,
        wrapped: Token,
    ) -> Self {
        Self {
            chain_id,
            decimals,
            symbol: symbol.map(str::to_owned),
            name: name.map(str::to_owned),
            wrapped,
        }
    }

    /// Ether on `chain_id`, wrapped as WETH9. `None` if the chain has no
    /// known WETH9 deployment.
    pub fn ether(chain_id: ChainId) -> Option<Self> {
        Token::weth9(chain_id).map(|weth| Self::new(chain_id, 18, Some("ETH"), Some("Ether"), weth))
    }
}

impl PartialEq for NativeCurrency {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
    }
}

impl Eq for NativeCurrency {}

impl Hash for NativeCurrency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
    }
}

/// Either the native currency or a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Currency {
    Native(NativeCurrency),
    Token(Token),
}

impl Currency {
    pub fn chain_id(&self) -> ChainId {
        match self {
            Currency::Native(native) => native.chain_id,
            Currency::Token(token) => token.chain_id,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native(native) => native.decimals,
            Currency::Token(token) => token.decimals,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Currency::Native(native) => native.symbol.as_deref(),
            Currency::Token(token) => token.symbol.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Currency::Native(native) => native.name.as_deref(),
            Currency::Token(token) => token.name.as_deref(),
        }
    }

    /// The token this currency trades as inside pairs.
    pub fn wrapped(&self) -> &Token {
        match self {
            Currency::Native(native) => &native.wrapped,
            Currency::Token(token) => token,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native(_))
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Currency::Token(token) => Some(token),
            Currency::Native(_) => None,
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

impl From<NativeCurrency> for Currency {
    fn from(native: NativeCurrency) -> Self {
        Currency::Native(native)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Token(token) => fmt::Display::fmt(token, f),
            Currency::Native(native) => match &native.symbol {
                Some(symbol) => write!(f, "{symbol}"),
                None => write!(f, "native({})", native.chain_id),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn token(byte: u8) -> Token {
        Token::new(1, Address::repeat_byte(byte), 18, None, None)
    }

    #[test]
    fn test_token_equality_ignores_metadata() {
        let plain = token(0x01);
        let named = Token::new(1, Address::repeat_byte(0x01), 6, Some("T"), Some("Token"));
        assert_eq!(plain, named);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&named));

        let other_chain = Token::new(5, Address::repeat_byte(0x01), 18, None, None);
        assert_ne!(token(0x01), other_chain);
    }

    #[test]
    fn test_parse_ignores_case() {
        let lower = Token::parse(1, "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", 18, None, None)
            .unwrap();
        assert_eq!(Some(lower), Token::weth9(1));

        let err = Token::parse(1, "0x1234", 18, None, None).unwrap_err();
        assert_eq!(err, SdkError::InvalidAddress("0x1234".to_string()));
    }

    #[test]
    fn test_sorts_before() {
        assert!(token(0x01).sorts_before(&token(0x02)).unwrap());
        assert!(!token(0x02).sorts_before(&token(0x01)).unwrap());

        assert!(matches!(
            token(0x01).sorts_before(&token(0x01)),
            Err(SdkError::InvalidPair(_))
        ));
        let other_chain = Token::new(5, Address::repeat_byte(0x02), 18, None, None);
        assert!(matches!(
            token(0x01).sorts_before(&other_chain),
            Err(SdkError::InvalidPair(_))
        ));
    }

    #[test]
    fn test_native_currency() {
        let ether = Currency::from(NativeCurrency::ether(1).unwrap());
        let weth = Token::weth9(1).unwrap();

        assert!(ether.is_native());
        assert_eq!(ether.wrapped(), &weth);
        assert_eq!(ether.decimals(), 18);
        assert_ne!(ether, Currency::from(weth));
        assert_eq!(ether, Currency::from(NativeCurrency::ether(1).unwrap()));
        assert_ne!(ether, Currency::from(NativeCurrency::ether(5).unwrap()));
        assert!(NativeCurrency::ether(999).is_none());
        assert_eq!(ether.to_string(), "ETH");
    }
}
