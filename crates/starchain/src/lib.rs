//! # Starchain
//!
//! A single-node, in-memory, tamper-evident chain of star registrations.
//!
//! ## Overview
//!
//! - **Blocks** are sealed exactly once: linked to the previous block's hash,
//!   timestamped, numbered, and hashed over a canonical encoding.
//! - **The Blockchain** admits blocks one at a time under a write lock and
//!   answers lookups and integrity checks.
//! - **The StarRegistry** hands out time-boxed challenges and admits a star
//!   only when the challenge is fresh and its signature verifies.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use starchain::{Blockchain, ChainConfig, Ed25519Verifier, RegistryConfig, StarRegistry};
//! use starchain::core::{Keypair, Star};
//!
//! async fn example() {
//!     let chain = Arc::new(Blockchain::with_genesis(ChainConfig::default()).unwrap());
//!     let registry = StarRegistry::new(chain, Ed25519Verifier, RegistryConfig::default());
//!
//!     let keypair = Keypair::generate();
//!     let address = keypair.address();
//!
//!     let message = registry.request_challenge(&address);
//!     let signature = keypair.sign(message.as_bytes()).to_hex();
//!
//!     let block = registry
//!         .submit_claim(&address, &message, &signature, Star::new("1", "2", "test"))
//!         .await
//!         .unwrap();
//!     assert_eq!(block.height, 1);
//!
//!     assert!(registry.validate_chain().unwrap().is_empty());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `starchain::core` - Core primitives (Block, BlockHash, Star, Keypair)

pub mod chain;
pub mod clock;
pub mod error;
pub mod registry;
pub mod verifier;

pub use starchain_core as core;

pub use chain::{Blockchain, ChainConfig};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ChainError, RegistryError, Result};
pub use registry::{RegistryConfig, StarRegistry};
pub use verifier::{Ed25519Verifier, SignatureVerifier};

pub use starchain_core::{Block, BlockBody, BlockHash, Star, StarClaim};
