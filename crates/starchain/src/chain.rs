//! The Blockchain: owner of the ordered, append-only block sequence.
//!
//! Every mutation goes through [`Blockchain::admit`] (or genesis seeding),
//! which seals and appends under a single write guard. Readers take read
//! guards and see the chain either before or after an admission, never a
//! partially sealed block.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use starchain_core::{Block, BlockBody, BlockHash, Star, GENESIS_DATA};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{ChainError, Result};

/// Configuration for the Blockchain.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Sentinel data stored in the genesis block body.
    pub genesis_data: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            genesis_data: GENESIS_DATA.to_string(),
        }
    }
}

/// A single-node, in-memory, tamper-evident chain of blocks.
#[derive(Debug)]
pub struct Blockchain {
    /// Blocks in height order. Height is always `len - 1`.
    blocks: RwLock<Vec<Block>>,
    /// Time source for sealing.
    clock: Arc<dyn Clock>,
    config: ChainConfig,
}

impl Blockchain {
    /// Create an empty chain on the system clock.
    ///
    /// Call [`initialize`](Self::initialize) before anything else.
    pub fn new(config: ChainConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an empty chain on the given clock.
    pub fn with_clock(config: ChainConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            blocks: RwLock::new(Vec::new()),
            clock,
            config,
        }
    }

    /// Create a chain on the system clock and seed its genesis block.
    pub fn with_genesis(config: ChainConfig) -> Result<Self> {
        let chain = Self::new(config);
        chain.initialize()?;
        Ok(chain)
    }

    /// Adopt blocks that were sealed elsewhere.
    ///
    /// The blocks are taken as-is and never re-sealed; run
    /// [`validate`](Self::validate) to find out whether they hold together.
    pub fn from_blocks(config: ChainConfig, clock: Arc<dyn Clock>, blocks: Vec<Block>) -> Self {
        Self {
            blocks: RwLock::new(blocks),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// The clock used to timestamp blocks.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admission
    // ─────────────────────────────────────────────────────────────────────────

    /// Seed the genesis block if the chain is empty. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        let mut blocks = self.write();
        if !blocks.is_empty() {
            return Ok(());
        }

        let genesis = Block::new(&BlockBody::Sentinel {
            data: self.config.genesis_data.clone(),
        })
        .map_err(|e| ChainError::Admission(e.to_string()))?;

        let sealed = self.append(&mut blocks, genesis)?;
        info!(hash = %display_hash(&sealed), "seeded genesis block");
        Ok(())
    }

    /// Seal a block onto the tip and append it.
    ///
    /// Reading the tip, assigning link/time/height, hashing and appending all
    /// happen under one write guard.
    pub fn admit(&self, block: Block) -> Result<Block> {
        let mut blocks = self.write();
        if blocks.is_empty() {
            return Err(ChainError::NotInitialized);
        }

        let sealed = self.append(&mut blocks, block)?;
        debug!(
            height = sealed.height,
            hash = %display_hash(&sealed),
            "admitted block"
        );
        Ok(sealed)
    }

    fn append(&self, blocks: &mut Vec<Block>, block: Block) -> Result<Block> {
        let previous_block_hash = blocks.last().and_then(|tip| tip.hash);
        let height = blocks.len() as u64;

        let sealed = block
            .seal(previous_block_hash, height, self.clock.now_millis())
            .map_err(|e| ChainError::Admission(e.to_string()))?;

        blocks.push(sealed.clone());
        Ok(sealed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Index of the last block.
    pub fn height(&self) -> Result<u64> {
        Ok(self.read()?.len() as u64 - 1)
    }

    /// Number of blocks, genesis included. Zero before initialization.
    pub fn len(&self) -> usize {
        self.read_unchecked().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recently admitted block.
    pub fn tip(&self) -> Result<Block> {
        let blocks = self.read()?;
        blocks.last().cloned().ok_or(ChainError::NotInitialized)
    }

    /// First block whose hash equals `hash`.
    pub fn block_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>> {
        let blocks = self.read()?;
        Ok(blocks.iter().find(|b| b.hash.as_ref() == Some(hash)).cloned())
    }

    /// First block whose height equals `height`.
    pub fn block_by_height(&self, height: u64) -> Result<Option<Block>> {
        let blocks = self.read()?;
        Ok(blocks.iter().find(|b| b.height == height).cloned())
    }

    /// A copy of every block in height order.
    pub fn snapshot(&self) -> Result<Vec<Block>> {
        Ok(self.read()?.clone())
    }

    /// Stars owned by `address`, in height order.
    ///
    /// Blocks are decoded one after another over a single snapshot. The
    /// genesis sentinel is skipped. A block whose body fails to decode is
    /// logged and skipped; the rest of the scan still completes.
    pub fn stars_by_owner(&self, address: &str) -> Result<Vec<Star>> {
        let blocks = self.read()?;
        let mut stars = Vec::new();

        for block in blocks.iter().filter(|b| !b.is_genesis()) {
            match block.star_claim() {
                Ok(Some(claim)) if claim.owner == address => stars.push(claim.star),
                Ok(_) => {}
                Err(e) => {
                    warn!(height = block.height, error = %e, "skipping undecodable block body");
                }
            }
        }

        Ok(stars)
    }

    /// Check every block and every link.
    ///
    /// Returns one message per failing block; an empty list means the chain
    /// is intact. Integrity failures are reported, never raised: the scan
    /// always covers the whole chain.
    pub fn validate(&self) -> Result<Vec<String>> {
        let blocks = self.read()?;
        let mut errors = Vec::new();

        for (index, block) in blocks.iter().enumerate() {
            let mut problems = Vec::new();

            if let Err(e) = block.check() {
                problems.push(e.to_string());
            }

            if block.height != index as u64 {
                problems.push(format!(
                    "height {} is out of sequence, expected {}",
                    block.height, index
                ));
            }

            match index.checked_sub(1).map(|p| &blocks[p]) {
                None if block.previous_block_hash.is_some() => {
                    problems.push("genesis block links to a previous block".to_string());
                }
                Some(previous) if block.previous_block_hash != previous.hash => {
                    problems.push(format!(
                        "previous hash does not match block {}",
                        index - 1
                    ));
                }
                _ => {}
            }

            if !problems.is_empty() {
                let label = if index == 0 {
                    "The genesis block".to_string()
                } else {
                    format!("Block {}", index)
                };
                let message = format!("{} is invalid: {}", label, problems.join("; "));
                warn!("{}", message);
                errors.push(message);
            }
        }

        Ok(errors)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Locking
    // ─────────────────────────────────────────────────────────────────────────

    // Blocks are fully sealed before `push`, so a guard recovered from a
    // poisoned lock still sees a consistent sequence.

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Block>>> {
        let blocks = self.read_unchecked();
        if blocks.is_empty() {
            return Err(ChainError::NotInitialized);
        }
        Ok(blocks)
    }

    fn read_unchecked(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        self.blocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Block>> {
        self.blocks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn display_hash(block: &Block) -> String {
    block.hash.map(|h| h.to_hex()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use starchain_core::StarClaim;

    fn claim_block(owner: &str, story: &str) -> Block {
        Block::new(&BlockBody::Claim(StarClaim {
            owner: owner.into(),
            star: Star::new("1", "2", story),
        }))
        .unwrap()
    }

    fn test_chain() -> Blockchain {
        let chain = Blockchain::with_clock(
            ChainConfig::default(),
            Arc::new(ManualClock::new(1_736_870_400_000)),
        );
        chain.initialize().unwrap();
        chain
    }

    #[test]
    fn test_genesis() {
        let chain = test_chain();
        assert_eq!(chain.height().unwrap(), 0);
        assert_eq!(chain.len(), 1);

        let genesis = chain.block_by_height(0).unwrap().unwrap();
        assert_eq!(genesis.height, 0);
        assert_eq!(genesis.previous_block_hash, None);
        assert!(genesis.is_genesis());
        assert!(genesis.validate());
        assert_eq!(
            genesis.decode_body().unwrap(),
            BlockBody::Sentinel {
                data: GENESIS_DATA.to_string()
            }
        );
    }

    #[test]
    fn test_with_genesis_uses_configured_data() {
        let config = ChainConfig {
            genesis_data: "First light".to_string(),
        };
        let chain = Blockchain::with_genesis(config).unwrap();

        assert_eq!(chain.config().genesis_data, "First light");
        assert_eq!(
            chain.tip().unwrap().decode_body().unwrap(),
            BlockBody::Sentinel {
                data: "First light".to_string()
            }
        );
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let chain = test_chain();
        let genesis = chain.tip().unwrap();

        chain.initialize().unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.tip().unwrap(), genesis);
    }

    #[test]
    fn test_uninitialized_chain_fails_fast() {
        let chain = Blockchain::new(ChainConfig::default());

        assert!(chain.is_empty());
        assert!(matches!(chain.height(), Err(ChainError::NotInitialized)));
        assert!(matches!(chain.validate(), Err(ChainError::NotInitialized)));
        assert!(matches!(
            chain.block_by_height(0),
            Err(ChainError::NotInitialized)
        ));
        assert!(matches!(
            chain.admit(claim_block("addr1", "early")),
            Err(ChainError::NotInitialized)
        ));
    }

    #[test]
    fn test_admit_links_to_tip() {
        let chain = test_chain();
        let genesis = chain.tip().unwrap();

        let first = chain.admit(claim_block("addr1", "one")).unwrap();
        let second = chain.admit(claim_block("addr1", "two")).unwrap();

        assert_eq!(chain.height().unwrap(), 2);
        assert_eq!(first.height, 1);
        assert_eq!(first.previous_block_hash, genesis.hash);
        assert_eq!(second.height, 2);
        assert_eq!(second.previous_block_hash, first.hash);
        assert_eq!(first.time, 1_736_870_400_000);
    }

    #[test]
    fn test_admit_refuses_sealed_block() {
        let chain = test_chain();
        let sealed = chain.admit(claim_block("addr1", "one")).unwrap();

        assert!(matches!(chain.admit(sealed), Err(ChainError::Admission(_))));
        assert_eq!(chain.height().unwrap(), 1);
    }

    #[test]
    fn test_lookup_by_hash_and_height() {
        let chain = test_chain();
        let block = chain.admit(claim_block("addr1", "one")).unwrap();
        let hash = block.hash.unwrap();

        assert_eq!(chain.block_by_hash(&hash).unwrap(), Some(block.clone()));
        assert_eq!(chain.block_by_height(1).unwrap(), Some(block));
        assert_eq!(chain.block_by_height(9).unwrap(), None);
        assert_eq!(
            chain
                .block_by_hash(&BlockHash::from_bytes([0x99; 32]))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_stars_by_owner_in_order() {
        let chain = test_chain();
        chain.admit(claim_block("addr1", "first")).unwrap();
        chain.admit(claim_block("addr2", "other")).unwrap();
        chain.admit(claim_block("addr1", "second")).unwrap();

        let stories: Vec<_> = chain
            .stars_by_owner("addr1")
            .unwrap()
            .into_iter()
            .map(|s| s.story)
            .collect();
        assert_eq!(stories, vec!["first", "second"]);
        assert!(chain.stars_by_owner("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_stars_by_owner_skips_undecodable() {
        let chain = test_chain();
        chain.admit(claim_block("addr1", "first")).unwrap();
        chain
            .admit(Block::from_body_bytes(&b"not json"[..]))
            .unwrap();
        chain.admit(claim_block("addr1", "third")).unwrap();

        assert_eq!(chain.stars_by_owner("addr1").unwrap().len(), 2);
    }

    #[test]
    fn test_validate_untouched_chain() {
        let chain = test_chain();
        for i in 0..5 {
            chain.admit(claim_block("addr1", &i.to_string())).unwrap();
        }
        assert!(chain.validate().unwrap().is_empty());
    }

    #[test]
    fn test_validate_reports_tampered_block() {
        let chain = test_chain();
        chain.admit(claim_block("addr1", "one")).unwrap();
        chain.admit(claim_block("addr1", "two")).unwrap();

        let mut blocks = chain.snapshot().unwrap();
        blocks[1].time += 1;
        let tampered = Blockchain::from_blocks(ChainConfig::default(), chain.clock(), blocks);

        let errors = tampered.validate().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Block 1 is invalid"));
    }

    #[test]
    fn test_validate_reports_genesis_and_broken_link() {
        let chain = test_chain();
        chain.admit(claim_block("addr1", "one")).unwrap();

        let mut blocks = chain.snapshot().unwrap();
        blocks[0].hash = Some(BlockHash::from_bytes([0x00; 32]));
        let tampered = Blockchain::from_blocks(ChainConfig::default(), chain.clock(), blocks);

        let errors = tampered.validate().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("The genesis block is invalid"));
        assert!(errors[1].contains("previous hash does not match block 0"));
    }
}
