//! Signature verification for star claims.
//!
//! The claim workflow only needs a yes/no answer to "did `address` sign
//! `message`?". Verification may suspend (e.g. a remote wallet service), so
//! the trait is async.

use async_trait::async_trait;
use starchain_core::{PublicKey, Signature};
use tracing::debug;

/// Answers whether `signature` over `message` was produced by `address`.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    async fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

/// Ed25519 verification with hex addresses and hex signatures.
///
/// The address is the hex-encoded public key; the signature is the
/// hex-encoded 64-byte signature over the UTF-8 message bytes. Anything that
/// fails to parse is reported as not verified.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

#[async_trait]
impl SignatureVerifier for Ed25519Verifier {
    async fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        let public_key = match PublicKey::from_address(address) {
            Ok(key) => key,
            Err(e) => {
                debug!(address, error = %e, "unparseable address");
                return false;
            }
        };
        let signature = match Signature::from_hex(signature) {
            Ok(sig) => sig,
            Err(e) => {
                debug!(error = %e, "unparseable signature");
                return false;
            }
        };

        public_key.verify(message.as_bytes(), &signature).is_ok()
    }
}
