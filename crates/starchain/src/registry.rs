//! The StarRegistry: challenge-response admission of star claims.
//!
//! A claim takes two steps:
//!
//! 1. [`request_challenge`](StarRegistry::request_challenge) hands the caller
//!    a message `"{address}:{unix_seconds}:starRegistry"` to sign.
//! 2. [`submit_claim`](StarRegistry::submit_claim) checks the message is still
//!    fresh, verifies the signature, and admits a block owned by the address.
//!
//! No challenge state is stored: freshness is read back out of the message.

use std::sync::Arc;
use std::time::Duration;

use starchain_core::{Block, BlockBody, BlockHash, Star, StarClaim};
use tracing::{info, warn};

use crate::chain::Blockchain;
use crate::clock::Clock;
use crate::error::{ChainError, RegistryError};
use crate::verifier::SignatureVerifier;

/// Configuration for the claim workflow.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How long a challenge stays valid, measured to the millisecond from
    /// the whole second embedded in the message.
    pub challenge_window: Duration,
    /// Trailing field of every challenge message.
    pub challenge_suffix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            challenge_window: Duration::from_secs(300),
            challenge_suffix: "starRegistry".to_string(),
        }
    }
}

/// Issues challenges and admits signed star claims onto a chain.
pub struct StarRegistry<V: SignatureVerifier> {
    chain: Arc<Blockchain>,
    verifier: V,
    /// Shared with the chain, so challenge and block times agree.
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl<V: SignatureVerifier> StarRegistry<V> {
    pub fn new(chain: Arc<Blockchain>, verifier: V, config: RegistryConfig) -> Self {
        let clock = chain.clock();
        Self {
            chain,
            verifier,
            clock,
            config,
        }
    }

    pub fn chain(&self) -> &Arc<Blockchain> {
        &self.chain
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Claims
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the message `address` must sign to claim a star.
    pub fn request_challenge(&self, address: &str) -> String {
        format!(
            "{}:{}:{}",
            address,
            self.clock.now_secs(),
            self.config.challenge_suffix
        )
    }

    /// Admit a star claim if its challenge is fresh and its signature valid.
    ///
    /// Claims are not deduplicated: resubmitting the same message admits a
    /// second block.
    pub async fn submit_claim(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block, RegistryError> {
        let issued_at = challenge_timestamp(message)?;
        let elapsed_millis = issued_at
            .checked_mul(1000)
            .and_then(|issued| self.clock.now_millis().checked_sub(issued))
            .ok_or_else(|| {
                RegistryError::MalformedChallenge(format!("timestamp {} out of range", issued_at))
            })?;
        let window_millis =
            i64::try_from(self.config.challenge_window.as_millis()).unwrap_or(i64::MAX);

        if elapsed_millis >= window_millis {
            let elapsed_secs = elapsed_millis.div_euclid(1000);
            warn!(address, elapsed_secs, "rejected claim: challenge expired");
            return Err(RegistryError::ExpiredChallenge { elapsed_secs });
        }

        if !self.verifier.verify(message, address, signature).await {
            warn!(address, "rejected claim: invalid signature");
            return Err(RegistryError::InvalidSignature(address.to_string()));
        }

        let block = Block::new(&BlockBody::Claim(StarClaim {
            owner: address.to_string(),
            star,
        }))
        .map_err(|e| ChainError::Admission(e.to_string()))?;

        let sealed = self.chain.admit(block)?;
        info!(address, height = sealed.height, "registered star");
        Ok(sealed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chain queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn height(&self) -> Result<u64, ChainError> {
        self.chain.height()
    }

    pub fn block_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>, ChainError> {
        self.chain.block_by_hash(hash)
    }

    pub fn block_by_height(&self, height: u64) -> Result<Option<Block>, ChainError> {
        self.chain.block_by_height(height)
    }

    pub fn validate_chain(&self) -> Result<Vec<String>, ChainError> {
        self.chain.validate()
    }

    pub fn stars_by_owner(&self, address: &str) -> Result<Vec<Star>, ChainError> {
        self.chain.stars_by_owner(address)
    }
}

/// Read the issue time (whole Unix seconds) out of a challenge message.
fn challenge_timestamp(message: &str) -> Result<i64, RegistryError> {
    let field = message
        .split(':')
        .nth(1)
        .ok_or_else(|| RegistryError::MalformedChallenge("missing timestamp field".into()))?;

    field
        .parse::<i64>()
        .map_err(|e| RegistryError::MalformedChallenge(format!("timestamp {:?}: {}", field, e)))
}
