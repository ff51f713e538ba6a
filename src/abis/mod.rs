//! Read-only contract interfaces the gateway talks to.
//!
//! Only the method signatures are consumed at runtime; payloads are decoded
//! by [`crate::codec`].

pub mod erc20;
pub mod v2;

pub use erc20::IERC20;
pub use v2::IUniswapV2Pair;
