//! Block difficulty retargeting.
//!
//! Every `adjust_every` mined blocks the time spanned by the window is
//! compared with `target_block_time_ms * adjust_every`:
//! - faster than 75% of expected: difficulty goes up one step
//! - slower than 125% of expected: difficulty goes down one step
//! - otherwise it stays
//!
//! The result is always clamped to `[min_difficulty, max_difficulty]`.

use serde::Serialize;

use super::Block;
use super::config::ChainConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stay,
}

/// Outcome of a closed retarget window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Retarget {
    pub direction: Direction,
    pub from: u32,
    pub to: u32,
    pub actual_ms: i64,
    pub expected_ms: u64,
}

/// Decide the next difficulty after the last block in `blocks` was appended.
///
/// Returns `None` unless the number of mined blocks (genesis excluded) is a
/// positive multiple of `adjust_every`. The window runs from
/// `blocks[last - adjust_every]` to `blocks[last]`, so the first window
/// starts at genesis.
pub fn retarget(current: u32, blocks: &[Block], config: &ChainConfig) -> Option<Retarget> {
    let mined = blocks.len().checked_sub(1)? as u64;
    if mined == 0 || mined.checked_rem(config.adjust_every)? != 0 {
        return None;
    }

    let last = blocks.len() - 1;
    let first = last.checked_sub(config.adjust_every as usize)?;

    let actual_ms = blocks[last].timestamp.saturating_sub(blocks[first].timestamp);
    let expected_ms = config
        .target_block_time_ms
        .saturating_mul(config.adjust_every);

    // actual < 0.75 * expected  <=>  4 * actual < 3 * expected (likewise for 1.25)
    let actual4 = i128::from(actual_ms) * 4;
    let expected = i128::from(expected_ms);

    let (direction, to) = if actual4 < expected * 3 {
        (
            Direction::Up,
            current.saturating_add(1).min(config.max_difficulty),
        )
    } else if actual4 > expected * 5 {
        (
            Direction::Down,
            current.saturating_sub(1).max(config.min_difficulty),
        )
    } else {
        (Direction::Stay, current)
    };

    Some(Retarget {
        direction,
        from: current,
        to,
        actual_ms,
        expected_ms,
    })
}
