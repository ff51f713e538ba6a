mod pool_snapshot;
mod token;

pub use pool_snapshot::{PoolSnapshot, Reserves};
pub use token::Token;

use alloy::primitives::Address;
use serde::Serializer;

/// Serialize an address in its EIP-55 checksummed form.
pub(crate) fn serialize_checksummed<S: Serializer>(
    address: &Address,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}
