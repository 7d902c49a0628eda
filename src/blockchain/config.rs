use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::hash::DIGEST_HEX_LEN;
use super::{
    DEFAULT_ADJUST_EVERY, DEFAULT_DIFFICULTY, DIFF_MAX, DIFF_MIN, TARGET_BLOCK_TIME_MS,
};

/// Tunables fixed for the lifetime of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChainConfig {
    /// Desired milliseconds between blocks.
    pub target_block_time_ms: u64,
    /// Retarget after every this many mined blocks.
    pub adjust_every: u64,
    pub initial_difficulty: u32,
    pub min_difficulty: u32,
    pub max_difficulty: u32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            target_block_time_ms: TARGET_BLOCK_TIME_MS,
            adjust_every: DEFAULT_ADJUST_EVERY,
            initial_difficulty: DEFAULT_DIFFICULTY,
            min_difficulty: DIFF_MIN,
            max_difficulty: DIFF_MAX,
        }
    }
}

impl ChainConfig {
    pub fn with_target_block_time_ms(mut self, ms: u64) -> Self {
        self.target_block_time_ms = ms;
        self
    }

    pub fn with_adjust_every(mut self, blocks: u64) -> Self {
        self.adjust_every = blocks;
        self
    }

    pub fn with_initial_difficulty(mut self, difficulty: u32) -> Self {
        self.initial_difficulty = difficulty;
        self
    }

    pub fn with_difficulty_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_difficulty = min;
        self.max_difficulty = max;
        self
    }

    /// Reject configurations the retarget loop or the miner cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_difficulty > self.max_difficulty {
            return Err(ConfigError::InvertedDifficultyBounds {
                min: self.min_difficulty,
                max: self.max_difficulty,
            });
        }
        if self.max_difficulty > DIGEST_HEX_LEN {
            return Err(ConfigError::UnreachableDifficulty {
                max: self.max_difficulty,
                limit: DIGEST_HEX_LEN,
            });
        }
        if !(self.min_difficulty..=self.max_difficulty).contains(&self.initial_difficulty) {
            return Err(ConfigError::InitialDifficultyOutOfRange {
                initial: self.initial_difficulty,
                min: self.min_difficulty,
                max: self.max_difficulty,
            });
        }
        if self.adjust_every == 0 {
            return Err(ConfigError::EmptyRetargetWindow);
        }
        Ok(())
    }
}
