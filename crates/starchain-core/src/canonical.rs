//! Canonical CBOR encoding for block hashing.
//!
//! A block hash is computed over a CBOR map of every block field, with these
//! rules (RFC 8949 Core Deterministic Encoding):
//! - Map keys are text, sorted by their encoded bytes
//! - Integers use the smallest valid encoding
//! - Definite lengths only
//! - `hash` is always present and always encoded as null
//!
//! Clearing `hash` and fixing key order makes the digest independent of the
//! order in which fields were assigned during sealing.

use ciborium::value::Value;

use crate::block::Block;
use crate::error::CoreError;
use crate::types::BlockHash;

/// Domain separation prefix for block hashes.
pub const BLOCK_HASH_DOMAIN: &[u8] = b"starchain/block/v1";

/// CBOR map key names.
mod keys {
    pub const BODY: &str = "body";
    pub const HASH: &str = "hash";
    pub const HEIGHT: &str = "height";
    pub const PREVIOUS_BLOCK_HASH: &str = "previous_block_hash";
    pub const TIME: &str = "time";
}

/// Encode a block to canonical CBOR bytes, ignoring its stored hash.
pub fn canonical_block_bytes(block: &Block) -> Result<Vec<u8>, CoreError> {
    let previous = match &block.previous_block_hash {
        Some(hash) => Value::Bytes(hash.0.to_vec()),
        None => Value::Null,
    };

    let entries = vec![
        (Value::Text(keys::BODY.into()), Value::Bytes(block.body.to_vec())),
        (Value::Text(keys::HASH.into()), Value::Null),
        (Value::Text(keys::HEIGHT.into()), Value::Integer(block.height.into())),
        (Value::Text(keys::PREVIOUS_BLOCK_HASH.into()), previous),
        (Value::Text(keys::TIME.into()), Value::Integer(block.time.into())),
    ];

    encode_map_canonical(entries)
}

/// Compute the block hash: Blake3(BLOCK_HASH_DOMAIN || canonical_block_bytes).
pub fn block_hash(block: &Block) -> Result<BlockHash, CoreError> {
    let bytes = canonical_block_bytes(block)?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(BLOCK_HASH_DOMAIN);
    hasher.update(&bytes);
    Ok(BlockHash(*hasher.finalize().as_bytes()))
}

/// Sort map entries by encoded key bytes, then encode the map.
fn encode_map_canonical(entries: Vec<(Value, Value)>) -> Result<Vec<u8>, CoreError> {
    let mut keyed = entries
        .into_iter()
        .map(|(key, value)| Ok((encode_value(&key)?, key, value)))
        .collect::<Result<Vec<_>, CoreError>>()?;

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let sorted = keyed.into_iter().map(|(_, key, value)| (key, value)).collect();
    encode_value(&Value::Map(sorted))
}

fn encode_value(value: &Value) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf)
        .map_err(|e| CoreError::EncodingError(e.to_string()))?;
    Ok(buf)
}
