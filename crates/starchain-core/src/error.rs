//! Error types for Starchain Core.

use thiserror::Error;

use crate::types::BlockHash;

/// Errors raised while building or sealing a block.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("block at height {0} is already sealed")]
    AlreadySealed(u64),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),
}

/// The stored body bytes do not decode to a known structured value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("body is not a valid block body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a block fails its self-check.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("block is not sealed")]
    Unsealed,

    #[error("hash mismatch: stored {stored}, computed {computed}")]
    HashMismatch {
        stored: BlockHash,
        computed: BlockHash,
    },

    #[error("cannot recompute hash: {0}")]
    Unhashable(#[from] CoreError),
}
