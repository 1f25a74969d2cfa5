//! Proptest generators for property-based testing.

use proptest::prelude::*;

use starchain_core::{Block, BlockHash, Star};

/// Generate a plausible address (hex Ed25519 public key).
pub fn address() -> impl Strategy<Value = String> {
    "[0-9a-f]{64}".prop_map(String::from)
}

/// Generate star data, optional fields included half the time.
pub fn star() -> impl Strategy<Value = Star> {
    (
        "[0-9]{1,3}° [0-9]{1,2}' [0-9.]{1,4}",
        "[0-9]{1,2}h [0-9]{1,2}m [0-9.]{1,4}s",
        proptest::option::of("[0-9]\\.[0-9]"),
        proptest::option::of("[A-Z][a-z]{2,12}"),
        ".{0,64}",
    )
        .prop_map(|(dec, ra, mag, cen, story)| Star {
            dec,
            ra,
            mag,
            cen,
            story,
        })
}

/// A single mutation of a sealed block, never touching its hash.
#[derive(Debug, Clone)]
pub enum Tamper {
    /// Append bytes to the body.
    Body(Vec<u8>),
    /// Shift the height.
    Height(u64),
    /// Shift the timestamp.
    Time(i64),
    /// Repoint the backward link.
    PreviousHash([u8; 32]),
}

impl Tamper {
    /// Apply the mutation. Every variant changes the block.
    pub fn apply(&self, block: &mut Block) {
        match self {
            Tamper::Body(extra) => {
                let mut body = block.body.to_vec();
                body.extend_from_slice(extra);
                block.body = body.into();
            }
            Tamper::Height(delta) => block.height = block.height.wrapping_add(*delta),
            Tamper::Time(delta) => block.time = block.time.wrapping_add(*delta),
            Tamper::PreviousHash(bytes) => {
                block.previous_block_hash = Some(BlockHash::from_bytes(*bytes))
            }
        }
    }
}

/// Generate a tampering.
pub fn tamper() -> impl Strategy<Value = Tamper> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 1..16).prop_map(Tamper::Body),
        (1u64..1000).prop_map(Tamper::Height),
        (1i64..1_000_000).prop_map(Tamper::Time),
        any::<[u8; 32]>().prop_map(Tamper::PreviousHash),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use starchain_core::{BlockBody, StarClaim};

    proptest! {
        #[test]
        fn test_star_survives_a_block(owner in address(), star in star()) {
            let block = Block::new(&BlockBody::Claim(StarClaim { owner: owner.clone(), star: star.clone() }))
                .unwrap();

            let claim = block.star_claim().unwrap().unwrap();
            prop_assert_eq!(claim.owner, owner);
            prop_assert_eq!(claim.star, star);
        }

        #[test]
        fn test_tamper_breaks_seal(star in star(), tamper in tamper()) {
            let mut block = Block::new(&BlockBody::Claim(StarClaim { owner: "addr1".into(), star }))
                .unwrap()
                .seal(Some(BlockHash::from_bytes([0x01; 32])), 1, 1_736_870_400_000)
                .unwrap();
            prop_assert!(block.validate());

            tamper.apply(&mut block);
            prop_assert!(!block.validate());
        }
    }
}
