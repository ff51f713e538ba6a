//! On-chain pool data gateway.
//!
//! Given a Uniswap V2 style pair address, reads reserves, token addresses,
//! token metadata and the current block height from a node with read-only
//! calls, and assembles them into a [`PoolSnapshot`].
//!
//! - [`codec`] - ABI selector hashing and return payload decoding
//! - [`client`] - the [`ChainClient`] capability and its alloy implementation
//! - [`gateway`] - the two-phase concurrent fetch
//! - [`service`] - input validation and request deadlines
//! - [`config`] - settings loading

pub mod abis;
pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod service;

pub use self::config::Settings;
pub use client::{ChainClient, RpcChainClient};
pub use errors::{DecodeError, ErrorKind, FetchCall, GatewayError, NetworkError};
pub use gateway::{CallContext, PoolGateway, TokenFetcher, UniswapV2Gateway};
pub use models::{PoolSnapshot, Token};
pub use service::PoolService;
