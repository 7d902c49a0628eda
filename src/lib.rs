//! Single-node proof-of-work chain: hash-search mining against a
//! leading-zero target, periodic difficulty retargeting and whole-chain
//! validation.

pub mod blockchain;

pub use blockchain::{
    Block, Blockchain, ChainConfig, ChainStats, ConfigError, Direction, Retarget, ValidationError,
};
