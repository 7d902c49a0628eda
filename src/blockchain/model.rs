use log::{debug, info};
use serde_json::Value;

use super::config::ChainConfig;
use super::difficulty::{Direction, Retarget, retarget};
use super::error::{ConfigError, ValidationError};
use super::stats::ChainStats;
use super::validation::{find_violations, validate_chain};
use super::Block;

/// Simple in-memory blockchain with Proof-of-Work and periodic retargeting.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    difficulty: u32,
    config: ChainConfig,
}

impl Default for Blockchain {
    fn default() -> Self {
        let config = ChainConfig::default();
        Self::with_genesis(Block::genesis(), config)
    }
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new(config: ChainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_genesis(Block::genesis(), config))
    }

    fn with_genesis(genesis: Block, config: ChainConfig) -> Self {
        debug!("genesis block hash={}", genesis.hash);
        Self {
            chain: vec![genesis],
            difficulty: config.initial_difficulty,
            config,
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Mine and append a new block carrying `payload`, then retarget.
    ///
    /// Blocks until a satisfying nonce is found. Returns the mining time in
    /// milliseconds.
    pub fn add_block(&mut self, payload: Value) -> u64 {
        let prev = self.last_block();
        let mut block = Block::new(prev.index + 1, payload, prev.hash.clone(), self.difficulty);

        let elapsed = block.mine();
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        debug!(
            "mined block #{} diff={} nonce={} time={}ms hash={}",
            block.index, block.difficulty, block.nonce, ms, block.hash
        );

        self.chain.push(block);
        self.adjust_difficulty_if_needed();
        ms
    }

    /// Retarget if the latest block closed a window. Affects future blocks only.
    pub fn adjust_difficulty_if_needed(&mut self) -> Option<Retarget> {
        let outcome = retarget(self.difficulty, &self.chain, &self.config)?;
        let verb = match outcome.direction {
            Direction::Up => "UP to",
            Direction::Down => "DOWN to",
            Direction::Stay => "stays",
        };
        info!(
            "difficulty {} {} (actual {}ms, expected {}ms)",
            verb, outcome.to, outcome.actual_ms, outcome.expected_ms
        );
        self.difficulty = outcome.to;
        Some(outcome)
    }

    /// Validate every block after genesis: hashes, linkage and PoW.
    pub fn is_valid_chain(&self) -> bool {
        self.validate().is_ok()
    }

    /// Like `is_valid_chain`, but reports the first failing block and rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_chain(&self.chain)
    }

    /// Every validation failure in chain order, including a malformed genesis.
    pub fn violations(&self) -> Vec<ValidationError> {
        find_violations(&self.chain)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Never true: the genesis block is always present.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Timing statistics over the current retarget window.
    pub fn stats(&self) -> ChainStats {
        let window = usize::try_from(self.config.adjust_every).unwrap_or(usize::MAX);
        ChainStats::collect(&self.chain, self.difficulty, window)
    }

    /// Pretty JSON snapshot of all blocks.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.chain)
    }
}
