use std::time::{Duration, Instant};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::hash::{block_hash, meets_difficulty};

/// A single block in the chain carrying an opaque JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix milliseconds (UTC)
    pub payload: Value,
    pub prev_hash: String,
    pub nonce: u64,      // Proof-of-Work nonce
    pub difficulty: u32, // required leading hex zeros
    pub hash: String,    // Cached hash of the block
}

impl Block {
    /// Create the genesis block (first block in the chain).
    ///
    /// The genesis hash is computed once and never searched for, so it may
    /// or may not satisfy its own difficulty.
    pub fn genesis() -> Self {
        Self::new_with_timestamp(
            0,
            Utc::now().timestamp_millis(),
            json!({ "msg": "genesis" }),
            String::from("0"),
            1,
        )
    }

    /// Create a new block stamped with the current time (not mined yet).
    /// Call `mine()` to perform PoW.
    pub fn new(index: u64, payload: Value, prev_hash: String, difficulty: u32) -> Self {
        Self::new_with_timestamp(
            index,
            Utc::now().timestamp_millis(),
            payload,
            prev_hash,
            difficulty,
        )
    }

    /// Create a block with a caller-chosen timestamp. Nonce starts at 0.
    pub fn new_with_timestamp(
        index: u64,
        timestamp: i64,
        payload: Value,
        prev_hash: String,
        difficulty: u32,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            payload,
            prev_hash,
            nonce: 0,
            difficulty,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Recompute the digest from the current field values
    /// (excluding the `hash` field itself).
    pub fn compute_hash(&self) -> String {
        block_hash(
            self.index,
            self.timestamp,
            &self.payload,
            &self.prev_hash,
            self.nonce,
            self.difficulty,
        )
    }

    /// Perform Proof-of-Work: bump the nonce until the hash starts with
    /// `difficulty` zeros. Returns the wall-clock time spent searching.
    ///
    /// The search is unbounded. Calling it again resumes from the current
    /// nonce; on an already-mined block it returns immediately.
    pub fn mine(&mut self) -> Duration {
        let start = Instant::now();
        while !meets_difficulty(&self.hash, self.difficulty) {
            self.nonce = self.nonce.wrapping_add(1);
            self.hash = self.compute_hash();
        }
        start.elapsed()
    }

    /// True if the cached `hash` matches the block's content.
    pub fn has_consistent_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Validate that the cached `hash` matches its content and satisfies the
    /// block's own difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self) -> bool {
        self.has_consistent_hash() && meets_difficulty(&self.hash, self.difficulty)
    }
}
