//! ABI codec for the zero-argument view methods the gateway calls.
//!
//! Return payloads are sequences of 32-byte big-endian words. Every decoder
//! checks the payload length first and fails with
//! [`DecodeError::ShortPayload`] rather than padding missing bytes.

use alloy::primitives::{keccak256, Address, U256};

use crate::{errors::DecodeError, models::Reserves};

/// Size of one ABI word.
pub const WORD_SIZE: usize = 32;

// ============================================
// Selectors
// ============================================

/// Method selector: the first 4 bytes of `keccak256(signature)`.
///
/// ```
/// assert_eq!(poolgate::codec::selector_of("decimals()"), [0x31, 0x3c, 0xe5, 0x67]);
/// ```
pub fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

// ============================================
// Decoding
// ============================================

/// Borrow the word at `index`, failing if the payload does not reach it.
pub fn word(payload: &[u8], index: usize) -> Result<&[u8; WORD_SIZE], DecodeError> {
    let start = index * WORD_SIZE;
    let end = start + WORD_SIZE;

    payload
        .get(start..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(DecodeError::ShortPayload {
            expected: end,
            actual: payload.len(),
        })
}

/// Address held in the low 20 bytes of the first word.
///
/// The 12 padding bytes are not checked; nodes occasionally return dirty
/// padding and the address bytes are still meaningful.
pub fn decode_address(payload: &[u8]) -> Result<Address, DecodeError> {
    let word = word(payload, 0)?;
    Ok(Address::from_slice(&word[12..]))
}

/// First word as an unsigned 256-bit integer.
pub fn decode_uint(payload: &[u8]) -> Result<U256, DecodeError> {
    let word = word(payload, 0)?;
    Ok(U256::from_be_slice(word))
}

/// First word narrowed to `u8`. Anything above 255 is rejected.
pub fn decode_u8(payload: &[u8]) -> Result<u8, DecodeError> {
    let word = word(payload, 0)?;

    if word[..WORD_SIZE - 1].iter().any(|byte| *byte != 0) {
        return Err(DecodeError::OutOfRange {
            value: U256::from_be_slice(word).to_string(),
            target: "u8",
        });
    }

    Ok(word[WORD_SIZE - 1])
}

/// `getReserves()` payload: reserve0, reserve1 and a word whose low 32 bits
/// are the last block timestamp.
pub fn decode_reserves(payload: &[u8]) -> Result<Reserves, DecodeError> {
    let reserve0 = U256::from_be_slice(word(payload, 0)?);
    let reserve1 = U256::from_be_slice(word(payload, 1)?);
    let timestamp_word = word(payload, 2)?;

    let mut low = [0u8; 4];
    low.copy_from_slice(&timestamp_word[WORD_SIZE - 4..]);

    Ok(Reserves {
        reserve0,
        reserve1,
        block_timestamp_last: u32::from_be_bytes(low),
    })
}

/// A single dynamic `string` return value.
///
/// Layout: offset word (ignored), length word, then the UTF-8 bytes. The
/// trailing zero padding up to the next word boundary is not required.
pub fn decode_dynamic_string(payload: &[u8]) -> Result<String, DecodeError> {
    let length = U256::from_be_slice(word(payload, 1)?);
    let data = &payload[2 * WORD_SIZE..];

    let declared = usize::try_from(length)
        .ok()
        .filter(|len| *len <= data.len())
        .ok_or_else(|| DecodeError::LengthOverflow {
            declared: length.to_string(),
            available: data.len(),
        })?;

    String::from_utf8(data[..declared].to_vec()).map_err(|_| DecodeError::InvalidUtf8)
}

// ============================================
// Encoding
// ============================================

/// Right-align an address in a zero-padded word.
pub fn encode_address_word(address: Address) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Big-endian word for `value`.
pub fn encode_uint_word(value: U256) -> [u8; WORD_SIZE] {
    value.to_be_bytes()
}

/// Canonical single-`string` return payload, padded to a word boundary.
pub fn encode_dynamic_string(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let padded = bytes.len().div_ceil(WORD_SIZE) * WORD_SIZE;

    let mut payload = Vec::with_capacity(2 * WORD_SIZE + padded);
    payload.extend_from_slice(&encode_uint_word(U256::from(WORD_SIZE)));
    payload.extend_from_slice(&encode_uint_word(U256::from(bytes.len())));
    payload.extend_from_slice(bytes);
    payload.resize(2 * WORD_SIZE + padded, 0);
    payload
}
