use serde::Serialize;

use super::Block;

/// Block production timing over the most recent intervals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainStats {
    pub height: usize,
    pub difficulty: u32,
    pub last_interval_ms: Option<i64>,
    pub avg_interval_ms: Option<f64>,
}

impl ChainStats {
    /// Summarise `blocks`, averaging over up to `window` trailing intervals.
    pub fn collect(blocks: &[Block], difficulty: u32, window: usize) -> Self {
        let height = blocks.len();

        let last_interval_ms = match blocks {
            [.., older, newer] => Some(newer.timestamp.saturating_sub(older.timestamp).max(0)),
            _ => None,
        };

        let intervals = height.saturating_sub(1).min(window);
        let avg_interval_ms = if intervals > 0 {
            let start = height - 1 - intervals;
            let total: i64 = blocks[start..]
                .windows(2)
                .map(|pair| pair[1].timestamp.saturating_sub(pair[0].timestamp).max(0))
                .fold(0i64, i64::saturating_add);
            Some(total as f64 / intervals as f64)
        } else {
            None
        };

        Self {
            height,
            difficulty,
            last_interval_ms,
            avg_interval_ms,
        }
    }
}
