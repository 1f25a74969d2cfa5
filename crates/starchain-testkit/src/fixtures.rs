//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;
use std::time::Duration;

use starchain::{
    Blockchain, ChainConfig, Ed25519Verifier, ManualClock, RegistryConfig, RegistryError,
    StarRegistry,
};
use starchain_core::{Block, Keypair, Star};

/// Pinned start time for fixtures (2025-01-14T16:00:00Z).
pub const FIXTURE_EPOCH_MILLIS: i64 = 1_736_870_400_000;

/// Someone claiming stars: a keypair whose public key is the address.
#[derive(Debug, Clone)]
pub struct Claimant {
    pub keypair: Keypair,
}

impl Claimant {
    /// Create a claimant with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// Sign a challenge message, hex-encoded.
    pub fn sign(&self, message: &str) -> String {
        self.keypair.sign(message.as_bytes()).to_hex()
    }
}

impl Default for Claimant {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry over a genesis-seeded chain, on a clock that only moves when told.
pub struct TestFixture {
    pub clock: Arc<ManualClock>,
    pub registry: StarRegistry<Ed25519Verifier>,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let clock = Arc::new(ManualClock::new(FIXTURE_EPOCH_MILLIS));
        let chain = Blockchain::with_clock(ChainConfig::default(), clock.clone());
        chain
            .initialize()
            .expect("genesis seeding on an empty chain cannot fail");

        Self {
            clock,
            registry: StarRegistry::new(Arc::new(chain), Ed25519Verifier, config),
        }
    }

    pub fn chain(&self) -> &Arc<Blockchain> {
        self.registry.chain()
    }

    /// Move the pinned clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Run the whole workflow: request a challenge, sign it, submit it.
    pub async fn claim(&self, claimant: &Claimant, star: Star) -> Result<Block, RegistryError> {
        let address = claimant.address();
        let message = self.registry.request_challenge(&address);
        let signature = claimant.sign(&message);
        self.registry
            .submit_claim(&address, &message, &signature, star)
            .await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The star used throughout the end-to-end scenarios.
pub fn sample_star() -> Star {
    Star::new("1", "2", "test")
}

/// Create multiple claimants with distinct deterministic keys.
pub fn multi_claimants(count: usize) -> Vec<Claimant> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0xc1;
            Claimant::with_seed(seed)
        })
        .collect()
}
