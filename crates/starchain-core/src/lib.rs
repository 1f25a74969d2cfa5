//! # Starchain Core
//!
//! Pure primitives for the star registry chain: blocks, block hashes, and
//! canonicalization.
//!
//! This crate contains no I/O, no locking, no clocks. It is pure computation
//! over hash-linked data structures. Sequencing and admission live in the
//! `starchain` crate.
//!
//! ## Key Types
//!
//! - [`Block`] - One sealed, hash-linked unit of chain data
//! - [`BlockHash`] - Content digest sealing a block (Blake3)
//! - [`BlockBody`] - Decoded block body: a star claim or the genesis sentinel
//! - [`Star`] / [`StarClaim`] - Star data and its owner
//! - [`Keypair`] / [`PublicKey`] / [`Signature`] - Ed25519 identities
//!
//! ## Canonicalization
//!
//! Block hashes are computed over deterministic CBOR with the `hash` field
//! cleared. See [`canonical`] module.

pub mod block;
pub mod body;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod types;

pub use block::Block;
pub use body::{BlockBody, Star, StarClaim, GENESIS_DATA};
pub use canonical::{canonical_block_bytes, BLOCK_HASH_DOMAIN};
pub use crypto::{Keypair, PublicKey, Signature};
pub use error::{BlockError, CoreError, DecodeError};
pub use types::BlockHash;
