//! Block: one sealed, hash-linked unit of chain data.
//!
//! A block is built unsealed, holding only its encoded body. The chain
//! manager seals it exactly once, assigning the backward link, time and
//! height, and computing the hash last over the fully populated block.

use bytes::Bytes;
use serde::Serialize;

use crate::body::{BlockBody, StarClaim};
use crate::canonical::block_hash;
use crate::error::{BlockError, CoreError, DecodeError};
use crate::types::BlockHash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Content digest over every other field. `None` until sealed.
    pub hash: Option<BlockHash>,

    /// Position in the chain; 0 is the genesis block.
    pub height: u64,

    /// JSON-encoded body bytes, opaque to the chain.
    pub body: Bytes,

    /// Sealing time (Unix milliseconds).
    pub time: i64,

    /// Hash of the preceding block (`None` for genesis).
    pub previous_block_hash: Option<BlockHash>,
}

impl Block {
    /// Build an unsealed block holding the JSON encoding of `body`.
    pub fn new<T: Serialize>(body: &T) -> Result<Self, CoreError> {
        let encoded =
            serde_json::to_vec(body).map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(Self::from_body_bytes(encoded))
    }

    /// Build an unsealed block around already-encoded body bytes.
    pub fn from_body_bytes(body: impl Into<Bytes>) -> Self {
        Self {
            hash: None,
            height: 0,
            body: body.into(),
            time: 0,
            previous_block_hash: None,
        }
    }

    /// Build an unsealed block from a hex-encoded body.
    pub fn from_body_hex(body: &str) -> Result<Self, DecodeError> {
        Ok(Self::from_body_bytes(hex::decode(body)?))
    }

    /// Seal the block onto a chain position.
    ///
    /// The link, time and height are assigned first; the hash is computed
    /// last, over the fully populated block. Sealing twice is refused.
    pub fn seal(
        mut self,
        previous_block_hash: Option<BlockHash>,
        height: u64,
        time: i64,
    ) -> Result<Self, CoreError> {
        if self.hash.is_some() {
            return Err(CoreError::AlreadySealed(self.height));
        }

        self.previous_block_hash = previous_block_hash;
        self.time = time;
        self.height = height;
        self.hash = Some(block_hash(&self)?);
        Ok(self)
    }

    pub fn is_sealed(&self) -> bool {
        self.hash.is_some()
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.previous_block_hash.is_none()
    }

    /// Recompute the digest with `hash` cleared.
    pub fn compute_hash(&self) -> Result<BlockHash, CoreError> {
        block_hash(self)
    }

    /// Self-check: the stored hash must equal the recomputed one.
    pub fn check(&self) -> Result<(), BlockError> {
        let stored = self.hash.ok_or(BlockError::Unsealed)?;
        let computed = self.compute_hash()?;
        if stored != computed {
            return Err(BlockError::HashMismatch { stored, computed });
        }
        Ok(())
    }

    /// Whether the block passes its self-check. Any failure counts as invalid.
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Decode the body bytes.
    pub fn decode_body(&self) -> Result<BlockBody, DecodeError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the body as a star claim.
    ///
    /// Sentinel bodies (the genesis block) yield `Ok(None)`: they are not an
    /// error, and not a star.
    pub fn star_claim(&self) -> Result<Option<StarClaim>, DecodeError> {
        Ok(self.decode_body()?.into_claim())
    }

    /// The body in hex, as handed to external callers.
    pub fn body_hex(&self) -> String {
        hex::encode(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Star;

    fn claim_block() -> Block {
        Block::new(&BlockBody::Claim(StarClaim {
            owner: "addr1".into(),
            star: Star::new("1", "2", "test"),
        }))
        .unwrap()
    }

    #[test]
    fn test_new_block_is_unsealed() {
        let block = claim_block();
        assert_eq!(block.hash, None);
        assert_eq!(block.height, 0);
        assert_eq!(block.time, 0);
        assert_eq!(block.previous_block_hash, None);
        assert!(!block.validate());
        assert!(matches!(block.check(), Err(BlockError::Unsealed)));
    }

    #[test]
    fn test_seal_then_validate() {
        let block = claim_block()
            .seal(Some(BlockHash::from_bytes([0x01; 32])), 1, 1_736_870_400_000)
            .unwrap();

        assert!(block.is_sealed());
        assert!(!block.is_genesis());
        assert!(block.validate());
        assert_eq!(block.hash, Some(block.compute_hash().unwrap()));
    }

    #[test]
    fn test_seal_twice_refused() {
        let sealed = claim_block().seal(None, 0, 1).unwrap();
        assert!(matches!(
            sealed.seal(None, 1, 2),
            Err(CoreError::AlreadySealed(0))
        ));
    }

    #[test]
    fn test_tampered_fields_fail_validation() {
        let sealed = claim_block()
            .seal(Some(BlockHash::from_bytes([0x01; 32])), 1, 1000)
            .unwrap();

        let mut block = sealed.clone();
        block.time = 2000;
        assert!(!block.validate());

        let mut block = sealed.clone();
        block.height = 7;
        assert!(!block.validate());

        let mut block = sealed.clone();
        block.previous_block_hash = Some(BlockHash::from_bytes([0x02; 32]));
        assert!(!block.validate());

        let mut block = sealed;
        block.body = Bytes::from_static(br#"{"data":"forged"}"#);
        assert!(matches!(block.check(), Err(BlockError::HashMismatch { .. })));
    }

    #[test]
    fn test_decode_claim() {
        let claim = claim_block().star_claim().unwrap().unwrap();
        assert_eq!(claim.owner, "addr1");
        assert_eq!(claim.star, Star::new("1", "2", "test"));
    }

    #[test]
    fn test_genesis_sentinel_is_not_a_star() {
        let block = Block::new(&BlockBody::genesis()).unwrap();
        assert!(block.star_claim().unwrap().is_none());
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        let block = Block::from_body_bytes(&b"\xff\xfe not json"[..]);
        assert!(matches!(block.decode_body(), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_body_hex_roundtrip() {
        let block = claim_block();
        let rebuilt = Block::from_body_hex(&block.body_hex()).unwrap();
        assert_eq!(rebuilt.body, block.body);

        assert!(matches!(
            Block::from_body_hex("zz"),
            Err(DecodeError::Hex(_))
        ));
    }
}
