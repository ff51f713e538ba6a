use alloy::primitives::Address;
use serde::Serialize;

/// ERC-20 metadata read from a token contract.
///
/// Built only by the [`TokenFetcher`](crate::gateway::TokenFetcher), and only
/// once both `symbol()` and `decimals()` succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(serialize_with = "super::serialize_checksummed")]
    address: Address,
    symbol: String,
    decimals: u8,
}

impl Token {
    pub fn new(address: Address, symbol: String, decimals: u8) -> Self {
        Self {
            address,
            symbol,
            decimals,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}
