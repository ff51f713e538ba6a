//! Access to a blockchain node.
//!
//! [`ChainClient`] is the only capability the gateway needs from a node. It is
//! shared behind an `Arc` and called concurrently by overlapping fetches.
//! Dropping an in-flight future abandons that call, which is how deadlines
//! cancel outstanding work.

mod rpc;

#[cfg(test)]
pub(crate) mod mock;

pub use rpc::RpcChainClient;

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::errors::NetworkError;

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Height of the latest block known to the node.
    async fn block_number(&self) -> Result<u64, NetworkError>;

    /// Execute a read-only call against `to` with raw `calldata` and return
    /// the raw return payload.
    async fn call_contract(&self, to: Address, calldata: Bytes) -> Result<Bytes, NetworkError>;
}
