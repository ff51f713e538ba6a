use std::sync::Arc;

use alloy::{primitives::Address, sol_types::SolCall};
use async_trait::async_trait;
use futures::future::join3;
use log::debug;

use super::{call_view, parse_address, CallContext, PoolGateway, TokenFetcher};
use crate::{
    abis::IUniswapV2Pair,
    client::ChainClient,
    codec,
    errors::{FetchCall, GatewayError},
    models::{PoolSnapshot, Reserves, Token},
};

/// Pool type tag stamped on every snapshot from this gateway.
pub const POOL_TYPE: &str = "v2";

/// Facts read directly from the pair contract.
struct PairFacts {
    reserves: Reserves,
    token0: Address,
    token1: Address,
}

/// Facts that depend on the token addresses from [`PairFacts`].
struct TokenFacts {
    token0: Token,
    token1: Token,
    block_number: u64,
}

/// Snapshot fetcher for Uniswap V2 style pairs.
///
/// A fetch runs in two phases, each a fixed group of concurrent calls joined
/// before moving on:
///
/// 1. `getReserves()`, `token0()` and `token1()` on the pair;
/// 2. metadata for both tokens and the current block number.
///
/// Each call owns its slot in the join, so the outcome does not depend on
/// completion order. When several calls in a phase fail, the one listed
/// first above is reported. A failed phase ends the fetch; nothing is
/// retried and no partial snapshot is produced.
///
/// The gateway holds no per-call state and can serve overlapping fetches.
#[derive(Clone)]
pub struct UniswapV2Gateway {
    client: Arc<dyn ChainClient>,
    token_fetcher: TokenFetcher,
    network: String,
}

impl UniswapV2Gateway {
    pub fn new(client: Arc<dyn ChainClient>, network: impl Into<String>) -> Self {
        Self {
            token_fetcher: TokenFetcher::new(client.clone()),
            client,
            network: network.into(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    async fn fetch(&self, pool: Address) -> Result<PoolSnapshot, GatewayError> {
        debug!("Pool {pool}: phase 1 running");
        let pair = self.fetch_pair_facts(pool).await.inspect_err(|e| {
            debug!("Pool {pool}: phase 1 failed: {e}");
        })?;

        debug!(
            "Pool {pool}: phase 1 done (token0={}, token1={}), phase 2 running",
            pair.token0, pair.token1
        );
        let tokens = self.fetch_token_facts(&pair).await.inspect_err(|e| {
            debug!("Pool {pool}: phase 2 failed: {e}");
        })?;

        let snapshot = PoolSnapshot::assemble(
            pool,
            pair.reserves,
            tokens.token0,
            tokens.token1,
            tokens.block_number,
            &self.network,
            POOL_TYPE,
        );

        debug!(
            "Pool {pool}: assembled {} at block {}",
            snapshot.symbol, snapshot.block_number
        );

        Ok(snapshot)
    }

    async fn fetch_pair_facts(&self, pool: Address) -> Result<PairFacts, GatewayError> {
        let (reserves, token0, token1) = join3(
            self.get_reserves(pool),
            self.get_token_address(pool, IUniswapV2Pair::token0Call::SIGNATURE, FetchCall::Token0),
            self.get_token_address(pool, IUniswapV2Pair::token1Call::SIGNATURE, FetchCall::Token1),
        )
        .await;

        Ok(PairFacts {
            reserves: reserves?,
            token0: token0?,
            token1: token1?,
        })
    }

    async fn fetch_token_facts(&self, pair: &PairFacts) -> Result<TokenFacts, GatewayError> {
        let (token0, token1, block_number) = join3(
            self.token_fetcher.fetch(pair.token0),
            self.token_fetcher.fetch(pair.token1),
            self.client.block_number(),
        )
        .await;

        Ok(TokenFacts {
            token0: token0.map_err(|e| e.during(FetchCall::Token0Metadata))?,
            token1: token1.map_err(|e| e.during(FetchCall::Token1Metadata))?,
            block_number: block_number
                .map_err(|e| GatewayError::from(e).during(FetchCall::BlockNumber))?,
        })
    }

    async fn get_reserves(&self, pool: Address) -> Result<Reserves, GatewayError> {
        let payload = call_view(
            self.client.as_ref(),
            pool,
            IUniswapV2Pair::getReservesCall::SIGNATURE,
            FetchCall::Reserves,
        )
        .await?;

        codec::decode_reserves(&payload)
            .map_err(|e| GatewayError::from(e).during(FetchCall::Reserves))
    }

    async fn get_token_address(
        &self,
        pool: Address,
        signature: &str,
        call: FetchCall,
    ) -> Result<Address, GatewayError> {
        let payload = call_view(self.client.as_ref(), pool, signature, call).await?;

        codec::decode_address(&payload).map_err(|e| GatewayError::from(e).during(call))
    }
}

#[async_trait]
impl PoolGateway for UniswapV2Gateway {
    async fn get_pool_data(
        &self,
        ctx: &CallContext,
        pool_address: &str,
    ) -> Result<PoolSnapshot, GatewayError> {
        let pool = parse_address(pool_address)?;

        if ctx.cancellation().is_cancelled() {
            return Err(GatewayError::Cancelled);
        }
        if ctx.is_expired() {
            return Err(GatewayError::Timeout);
        }

        tokio::select! {
            biased;
            _ = ctx.cancellation().cancelled() => {
                debug!("Pool {pool}: cancelled by caller");
                Err(GatewayError::Cancelled)
            },
            result = tokio::time::timeout_at(ctx.deadline(), self.fetch(pool)) => {
                result.unwrap_or_else(|_| {
                    debug!("Pool {pool}: deadline exceeded");
                    Err(GatewayError::Timeout)
                })
            },
        }
    }
}
