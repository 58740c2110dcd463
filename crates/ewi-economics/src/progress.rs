// crates/ewi-economics/src/progress.rs
//
// Position within the current reward epoch and a wall-clock estimate of the
// time left until the next reward step, at the target block interval.

use serde::Serialize;

use crate::emission::EmissionScheduler;

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// Whole days, hours and minutes, truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl BlockDuration {
    /// Expected duration of `blocks` blocks at `block_time_secs` per block.
    pub fn from_blocks(blocks: u64, block_time_secs: u64) -> Self {
        let secs = blocks.saturating_mul(block_time_secs);
        Self {
            days: secs / SECS_PER_DAY,
            hours: secs % SECS_PER_DAY / SECS_PER_HOUR,
            minutes: secs % SECS_PER_HOUR / SECS_PER_MINUTE,
        }
    }
}

impl std::fmt::Display for BlockDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "~{} days {}h{}m", self.days, self.hours, self.minutes)
    }
}

/// Where a height sits relative to the next reward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpochProgress {
    pub epoch: u64,
    /// Blocks until the next epoch starts (the fixed-rate period counts as epoch 0).
    pub blocks_remaining: u64,
    /// Height at which the next epoch starts.
    pub next_epoch_height: u64,
    pub time_remaining: BlockDuration,
}

impl EmissionScheduler {
    /// Progress through the epoch containing `height`.
    pub fn epoch_progress(&self, height: u64) -> EpochProgress {
        let p = self.params();
        let blocks_remaining = if height < p.fixed_rate_period {
            p.fixed_rate_period - height
        } else {
            p.epoch_length - (height - p.fixed_rate_period) % p.epoch_length
        };
        EpochProgress {
            epoch: self.epoch_at(height),
            blocks_remaining,
            next_epoch_height: height.saturating_add(blocks_remaining),
            time_remaining: BlockDuration::from_blocks(blocks_remaining, p.block_time_secs),
        }
    }
}
