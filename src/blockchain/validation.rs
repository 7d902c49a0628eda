//! Whole-chain validation.
//!
//! For every block after genesis:
//! 1. the stored hash equals a fresh hash of its fields
//! 2. `prev_hash` equals the previous block's stored hash
//! 3. the hash meets the block's own recorded difficulty
//!
//! Genesis is the anchor: it is never mined and never checked by the
//! verdict. `find_violations` still flags a malformed genesis.

use super::Block;
use super::error::ValidationError;
use super::hash::meets_difficulty;

type Rule = fn(&Block, &Block) -> Option<ValidationError>;

const RULES: [Rule; 3] = [hash_matches_fields, links_to_prev, meets_own_difficulty];

/// Validate the chain, stopping at the first failure.
pub fn validate_chain(blocks: &[Block]) -> Result<(), ValidationError> {
    if blocks.is_empty() {
        return Err(ValidationError::EmptyChain);
    }
    for pair in blocks.windows(2) {
        if let Some(err) = block_violations(&pair[0], &pair[1]).next() {
            return Err(err);
        }
    }
    Ok(())
}

/// Collect every failure in chain order, including a malformed genesis.
/// One block may report several.
pub fn find_violations(blocks: &[Block]) -> Vec<ValidationError> {
    let Some(genesis) = blocks.first() else {
        return vec![ValidationError::EmptyChain];
    };

    let mut violations = Vec::new();
    if genesis.index != 0 || genesis.prev_hash != "0" || !genesis.has_consistent_hash() {
        violations.push(ValidationError::InvalidGenesis);
    }
    violations.extend(
        blocks
            .windows(2)
            .flat_map(|pair| block_violations(&pair[0], &pair[1])),
    );
    violations
}

/// Lazily apply each rule to `current`, in rule order.
fn block_violations<'a>(
    prev: &'a Block,
    current: &'a Block,
) -> impl Iterator<Item = ValidationError> + 'a {
    RULES.into_iter().filter_map(move |rule| rule(prev, current))
}

fn hash_matches_fields(_prev: &Block, current: &Block) -> Option<ValidationError> {
    (!current.has_consistent_hash()).then_some(ValidationError::HashMismatch {
        index: current.index,
    })
}

fn links_to_prev(prev: &Block, current: &Block) -> Option<ValidationError> {
    (current.prev_hash != prev.hash).then_some(ValidationError::LinkageMismatch {
        index: current.index,
    })
}

fn meets_own_difficulty(_prev: &Block, current: &Block) -> Option<ValidationError> {
    (!meets_difficulty(&current.hash, current.difficulty)).then_some(
        ValidationError::ProofOfWorkUnsatisfied {
            index: current.index,
            difficulty: current.difficulty,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Genesis plus `n` blocks mined at difficulty 1.
    fn mined_chain(n: u64) -> Vec<Block> {
        let mut blocks = vec![Block::genesis()];
        for i in 1..=n {
            let prev = blocks[blocks.len() - 1].hash.clone();
            let mut b = Block::new(i, json!({ "n": i }), prev, 1);
            b.mine();
            blocks.push(b);
        }
        blocks
    }

    #[test]
    fn mined_chain_is_valid() {
        let blocks = mined_chain(3);
        assert_eq!(validate_chain(&blocks), Ok(()));
        assert!(find_violations(&blocks).is_empty());
    }

    #[test]
    fn genesis_only_is_valid() {
        assert_eq!(validate_chain(&mined_chain(0)), Ok(()));
    }

    #[test]
    fn empty_chain_is_invalid() {
        assert_eq!(validate_chain(&[]), Err(ValidationError::EmptyChain));
        assert_eq!(find_violations(&[]), vec![ValidationError::EmptyChain]);
    }

    #[test]
    fn detects_tampered_payload() {
        let mut blocks = mined_chain(3);
        blocks[2].payload = json!({ "n": 999 });
        assert_eq!(
            validate_chain(&blocks),
            Err(ValidationError::HashMismatch { index: 2 })
        );
    }

    #[test]
    fn tampered_genesis_passes_verdict_but_is_reported() {
        let mut blocks = mined_chain(1);
        blocks[0].payload = json!({ "msg": "rewritten" });
        assert_eq!(validate_chain(&blocks), Ok(()));
        assert_eq!(find_violations(&blocks), vec![ValidationError::InvalidGenesis]);
    }

    #[test]
    fn detects_broken_link_even_when_rehashed() {
        let mut blocks = mined_chain(3);
        blocks[2].prev_hash = "f".repeat(64);
        blocks[2].hash = blocks[2].compute_hash();
        blocks[2].mine();
        assert_eq!(
            validate_chain(&blocks),
            Err(ValidationError::LinkageMismatch { index: 2 })
        );
    }

    #[test]
    fn detects_unsatisfied_work() {
        let mut blocks = mined_chain(1);
        // Correctly linked and hashed, but never mined.
        let lazy = Block::new(2, json!({ "n": 2 }), blocks[1].hash.clone(), 64);
        blocks.push(lazy);
        assert_eq!(
            validate_chain(&blocks),
            Err(ValidationError::ProofOfWorkUnsatisfied {
                index: 2,
                difficulty: 64
            })
        );
    }

    #[test]
    fn stops_at_first_failing_rule() {
        let mut blocks = mined_chain(2);
        // Breaks both the hash and the link of block 1.
        blocks[1].prev_hash = "0".into();
        assert_eq!(
            validate_chain(&blocks),
            Err(ValidationError::HashMismatch { index: 1 })
        );
        let all = find_violations(&blocks);
        assert_eq!(all[0], ValidationError::HashMismatch { index: 1 });
        assert_eq!(all[1], ValidationError::LinkageMismatch { index: 1 });
    }

    #[test]
    fn reports_all_failures_in_order() {
        let mut blocks = mined_chain(3);
        blocks[1].nonce += 1;
        blocks[3].index = 42;
        let violations = find_violations(&blocks);
        assert_eq!(violations.first(), Some(&ValidationError::HashMismatch { index: 1 }));
        assert!(violations.contains(&ValidationError::HashMismatch { index: 42 }));
    }
}
