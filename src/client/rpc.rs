use alloy::{
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionInput, TransactionRequest},
};
use async_trait::async_trait;
use log::trace;
use url::Url;

use super::ChainClient;
use crate::errors::{GatewayError, NetworkError};

/// [`ChainClient`] backed by an alloy HTTP provider.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: DynProvider,
}

impl RpcChainClient {
    /// Connect to a JSON-RPC endpoint over HTTP.
    ///
    /// No request is sent here; an unreachable node surfaces as a
    /// [`NetworkError`] on the first call.
    pub fn connect_http(rpc_url: &str) -> Result<Self, GatewayError> {
        let url = Url::parse(rpc_url)
            .map_err(|e| GatewayError::InvalidInput(format!("invalid RPC URL {rpc_url}: {e}")))?;

        let client = ProviderBuilder::new().connect_http(url);

        Ok(Self {
            provider: DynProvider::new(client),
        })
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn block_number(&self) -> Result<u64, NetworkError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| NetworkError::new(format!("eth_blockNumber failed: {e}")))
    }

    async fn call_contract(&self, to: Address, calldata: Bytes) -> Result<Bytes, NetworkError> {
        trace!("eth_call to {to} with {calldata}");

        let request = TransactionRequest::default()
            .to(to)
            .input(TransactionInput::new(calldata));

        self.provider
            .call(request)
            .await
            .map_err(|e| NetworkError::new(format!("eth_call to {to} failed: {e}")))
    }
}
