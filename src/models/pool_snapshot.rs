use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Token;

/// Decoded `getReserves()` return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    pub reserve0: U256,
    pub reserve1: U256,
    /// Low 32 bits of the third return word.
    pub block_timestamp_last: u32,
}

/// Point-in-time view of a V2 pair.
///
/// Reserves are kept as base-10 strings since they routinely exceed 64 bits.
///
/// `block_number` is read with its own call, so it is not guaranteed to be
/// the exact block the reserves were read at. Treat it as "reserves are no
/// older than roughly this block".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    #[serde(serialize_with = "super::serialize_checksummed")]
    pub address: Address,
    pub reserve0: String,
    pub reserve1: String,
    pub token0: Token,
    pub token1: Token,
    pub block_timestamp_last: u32,
    pub downloaded_at: DateTime<Utc>,
    pub network: String,
    pub block_number: u64,
    pub symbol: String,
    #[serde(rename = "type")]
    pub pool_type: String,
}

impl PoolSnapshot {
    /// Assemble a snapshot from fully fetched parts, stamping it with the
    /// current time.
    pub fn assemble(
        address: Address,
        reserves: Reserves,
        token0: Token,
        token1: Token,
        block_number: u64,
        network: &str,
        pool_type: &str,
    ) -> Self {
        let symbol = format!("{}/{}", token0.symbol(), token1.symbol());

        Self {
            address,
            reserve0: reserves.reserve0.to_string(),
            reserve1: reserves.reserve1.to_string(),
            token0,
            token1,
            block_timestamp_last: reserves.block_timestamp_last,
            downloaded_at: Utc::now(),
            network: network.to_string(),
            block_number,
            symbol,
            pool_type: pool_type.to_string(),
        }
    }
}
