use std::sync::Arc;

use alloy::{primitives::Address, sol_types::SolCall};
use log::debug;

use super::call_view;
use crate::{
    abis::IERC20,
    client::ChainClient,
    codec,
    errors::{FetchCall, GatewayError},
    models::Token,
};

/// Reads ERC-20 metadata (symbol and decimals) for a single token.
#[derive(Clone)]
pub struct TokenFetcher {
    client: Arc<dyn ChainClient>,
}

impl TokenFetcher {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self { client }
    }

    /// Fetch symbol and decimals concurrently and wait for both.
    ///
    /// If either call fails the other result is discarded. When both fail,
    /// the `symbol()` error is reported.
    pub async fn fetch(&self, token: Address) -> Result<Token, GatewayError> {
        let (symbol, decimals) =
            futures::future::join(self.fetch_symbol(token), self.fetch_decimals(token)).await;

        let symbol = symbol?;
        let decimals = decimals?;

        debug!("Fetched token {token}: symbol={symbol}, decimals={decimals}");

        Ok(Token::new(token, symbol, decimals))
    }

    async fn fetch_symbol(&self, token: Address) -> Result<String, GatewayError> {
        let payload = call_view(
            self.client.as_ref(),
            token,
            IERC20::symbolCall::SIGNATURE,
            FetchCall::Symbol,
        )
        .await?;

        codec::decode_dynamic_string(&payload)
            .map_err(|e| GatewayError::from(e).during(FetchCall::Symbol))
    }

    async fn fetch_decimals(&self, token: Address) -> Result<u8, GatewayError> {
        let payload = call_view(
            self.client.as_ref(),
            token,
            IERC20::decimalsCall::SIGNATURE,
            FetchCall::Decimals,
        )
        .await?;

        codec::decode_u8(&payload).map_err(|e| GatewayError::from(e).during(FetchCall::Decimals))
    }
}
