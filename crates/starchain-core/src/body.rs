//! Block bodies: what a block's opaque bytes decode to.
//!
//! Bodies are encoded as JSON. The genesis block carries a sentinel
//! `{"data": "Genesis Block"}`; every other block carries a star claim
//! `{"owner": ..., "star": {...}}`.

use serde::{Deserialize, Serialize};

/// Sentinel data carried by the genesis block.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Star data registered by a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Declination.
    pub dec: String,

    /// Right ascension.
    pub ra: String,

    /// Magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag: Option<String>,

    /// Constellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cen: Option<String>,

    /// Free-form story attached to the star.
    pub story: String,
}

impl Star {
    /// Create a star with the required coordinates and story.
    pub fn new(dec: impl Into<String>, ra: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            dec: dec.into(),
            ra: ra.into(),
            mag: None,
            cen: None,
            story: story.into(),
        }
    }

    pub fn with_mag(mut self, mag: impl Into<String>) -> Self {
        self.mag = Some(mag.into());
        self
    }

    pub fn with_cen(mut self, cen: impl Into<String>) -> Self {
        self.cen = Some(cen.into());
        self
    }
}

/// A star attributed to the address that claimed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarClaim {
    pub owner: String,
    pub star: Star,
}

/// A decoded block body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockBody {
    /// A registered star.
    Claim(StarClaim),

    /// Sentinel data; only the genesis block carries one.
    Sentinel { data: String },
}

impl BlockBody {
    /// The default genesis body.
    pub fn genesis() -> Self {
        Self::Sentinel {
            data: GENESIS_DATA.to_string(),
        }
    }

    /// The star claim, if this body carries one.
    pub fn into_claim(self) -> Option<StarClaim> {
        match self {
            Self::Claim(claim) => Some(claim),
            Self::Sentinel { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_body_json_shape() {
        let json = serde_json::to_string(&BlockBody::genesis()).unwrap();
        assert_eq!(json, r#"{"data":"Genesis Block"}"#);
    }

    #[test]
    fn test_claim_body_json_shape() {
        let body = BlockBody::Claim(StarClaim {
            owner: "addr1".into(),
            star: Star::new("1", "2", "test"),
        });
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"owner":"addr1","star":{"dec":"1","ra":"2","story":"test"}}"#
        );
    }

    #[test]
    fn test_optional_star_fields() {
        let star = Star::new("68° 52' 56.9", "16h 29m 1.0s", "found it")
            .with_mag("4.3")
            .with_cen("Ursa Minor");
        let json = serde_json::to_string(&star).unwrap();
        let back: Star = serde_json::from_str(&json).unwrap();
        assert_eq!(back, star);
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let result = serde_json::from_str::<BlockBody>(r#"{"owner":"addr1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sentinel_has_no_claim() {
        assert!(BlockBody::genesis().into_claim().is_none());
    }
}
