pub mod block;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod hash;
pub mod model;
pub mod stats;
pub mod validation;

pub use block::Block;
pub use config::ChainConfig;
pub use difficulty::{Direction, Retarget};
pub use error::{ConfigError, ValidationError};
pub use model::Blockchain;
pub use stats::ChainStats;

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: u32 = 3;

/// Target milliseconds per block for auto-adjust.
pub const TARGET_BLOCK_TIME_MS: u64 = 1500;

/// Mined blocks between difficulty adjustments.
pub const DEFAULT_ADJUST_EVERY: u64 = 3;

/// Difficulty bounds.
pub const DIFF_MIN: u32 = 1;
pub const DIFF_MAX: u32 = 8;
