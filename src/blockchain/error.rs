//! Error types for chain configuration and validation.

use thiserror::Error;

/// Rejected chain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min difficulty {min} is greater than max difficulty {max}")]
    InvertedDifficultyBounds { min: u32, max: u32 },

    #[error("max difficulty {max} exceeds the {limit} hex characters of a digest")]
    UnreachableDifficulty { max: u32, limit: u32 },

    #[error("initial difficulty {initial} is outside [{min}, {max}]")]
    InitialDifficultyOutOfRange { initial: u32, min: u32, max: u32 },

    #[error("retarget window must span at least one block")]
    EmptyRetargetWindow,
}

/// First reason a chain failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("chain has no genesis block")]
    EmptyChain,

    #[error("genesis block is malformed or its hash does not match its fields")]
    InvalidGenesis,

    #[error("block #{index}: stored hash does not match its fields")]
    HashMismatch { index: u64 },

    #[error("block #{index}: prev hash does not match the previous block")]
    LinkageMismatch { index: u64 },

    #[error("block #{index}: hash does not meet difficulty {difficulty}")]
    ProofOfWorkUnsatisfied { index: u64, difficulty: u32 },
}
