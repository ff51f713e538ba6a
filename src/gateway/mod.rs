//! Pool data gateways.
//!
//! A gateway turns a pool address into a [`PoolSnapshot`] by issuing
//! read-only calls through a [`ChainClient`](crate::client::ChainClient):
//!
//! - [`context`] - per-call deadline and cancellation
//! - [`token_fetcher`] - ERC-20 symbol and decimals
//! - [`uniswap_v2`] - the two-phase V2 pair fetch

pub mod context;
pub mod token_fetcher;
pub mod uniswap_v2;

pub use context::CallContext;
pub use token_fetcher::TokenFetcher;
pub use uniswap_v2::UniswapV2Gateway;

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::{
    client::ChainClient,
    codec,
    errors::{FetchCall, GatewayError},
    models::PoolSnapshot,
};

#[async_trait]
pub trait PoolGateway: Send + Sync {
    /// Fetch a consistent snapshot of the pool at `pool_address`.
    ///
    /// Either every field was fetched and decoded, or an error is returned.
    async fn get_pool_data(
        &self,
        ctx: &CallContext,
        pool_address: &str,
    ) -> Result<PoolSnapshot, GatewayError>;
}

/// Parse a user supplied address, with or without `0x`, in any case.
pub fn parse_address(input: &str) -> Result<Address, GatewayError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::InvalidInput(
            "pool address is required".to_string(),
        ));
    }

    trimmed
        .parse::<Address>()
        .map_err(|e| GatewayError::InvalidInput(format!("malformed address {trimmed:?}: {e}")))
}

/// Call a zero-argument view method and hand back its raw return payload,
/// tagging any failure with `call`.
pub(crate) async fn call_view(
    client: &dyn ChainClient,
    target: Address,
    signature: &str,
    call: FetchCall,
) -> Result<Bytes, GatewayError> {
    let calldata = Bytes::copy_from_slice(&codec::selector_of(signature));

    client
        .call_contract(target, calldata)
        .await
        .map_err(|e| GatewayError::from(e).during(call))
}
