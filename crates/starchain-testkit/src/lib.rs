//! # Starchain Testkit
//!
//! Testing utilities for the star registry chain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A registry on a pinned clock, and claimants with
//!   deterministic keypairs that can sign challenges
//! - **Generators**: Proptest strategies for stars, addresses and tampering
//!
//! ## Test Fixtures
//!
//! ```rust
//! use starchain_testkit::fixtures::{sample_star, Claimant, TestFixture};
//!
//! # async fn run() {
//! let fixture = TestFixture::new();
//! let alice = Claimant::with_seed([0x01; 32]);
//!
//! let block = fixture.claim(&alice, sample_star()).await.unwrap();
//! assert_eq!(block.height, 1);
//! # }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starchain_testkit::generators::star;
//!
//! proptest! {
//!     #[test]
//!     fn stars_survive_a_block(star in star()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{multi_claimants, sample_star, Claimant, TestFixture, FIXTURE_EPOCH_MILLIS};
pub use generators::{address, star, tamper, Tamper};
