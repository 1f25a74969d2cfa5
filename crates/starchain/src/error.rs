//! Error types for the chain and the claim workflow.

use starchain_core::DecodeError;
use thiserror::Error;

/// Errors raised by [`Blockchain`](crate::Blockchain) operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The genesis block has not been seeded yet.
    #[error("chain is not initialized")]
    NotInitialized,

    /// Sealing or appending a block failed. Fatal to that admission only.
    #[error("admission failed: {0}")]
    Admission(String),

    /// A block body did not decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Errors raised while submitting a star claim.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The challenge is too old to be honoured.
    #[error("challenge expired: issued {elapsed_secs}s ago")]
    ExpiredChallenge { elapsed_secs: i64 },

    /// The signature does not verify for the claimed address.
    #[error("invalid signature for address {0}")]
    InvalidSignature(String),

    /// The challenge message does not carry a readable timestamp.
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    #[error("chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
