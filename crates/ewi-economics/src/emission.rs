// crates/ewi-economics/src/emission.rs
//
// Block reward emission schedule with re-emission.
//
// Base curve:
// - Fixed reward for the first `fixed_rate_period` blocks
// - Then the reward drops by `one_epoch_reduction` at every epoch boundary
// - From the emission horizon on, the scheduled rate stays at a terminal floor
//
// Re-emission overlay (EIP-27):
// - From the activation height until the horizon, up to `basic_charge_amount`
//   of each block reward goes to the re-emission pool instead of the miner
//   (the miner always keeps at least the terminal floor)
// - After the horizon the pool pays the terminal floor to each block's miner
//   until it is drained
//
// The genesis block (height 0) emits nothing; cumulative figures cover
// heights 1..=h. All amounts are exact nanoERG integers.

use ewi_core::error::EwiError;
use ewi_core::units::Nano;
use serde::Serialize;

use crate::params::EmissionParameters;

/// Full state of the reward curve at one height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmissionState {
    pub height: u64,
    /// 0 during the fixed-rate period, then 1, 2, ...
    pub epoch: u64,
    /// Scheduled block reward before the re-emission split.
    pub rate: Nano,
    /// Part of `rate` diverted into the re-emission pool at this height.
    pub reemission_rate: Nano,
    /// What the miner of this block receives.
    pub miner_reward: Nano,
    /// Total ever diverted into the pool up to and including this height.
    pub reemission_supply: Nano,
    /// Amount still held by the pool after this height.
    pub reemission_balance: Nano,
    /// Coins in circulation after this height.
    pub circulating_supply: Nano,
}

/// Maps block heights to emission figures for one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmissionScheduler {
    params: EmissionParameters,
    horizon: u64,
}

impl Default for EmissionScheduler {
    fn default() -> Self {
        let params = EmissionParameters::default();
        Self {
            horizon: params.emission_horizon(),
            params,
        }
    }
}

impl EmissionScheduler {
    /// # Errors
    /// Returns `EwiError::InvalidParameters` if `params` fails validation.
    pub fn new(params: EmissionParameters) -> Result<Self, EwiError> {
        params.validate()?;
        Ok(Self {
            horizon: params.emission_horizon(),
            params,
        })
    }

    pub fn params(&self) -> &EmissionParameters {
        &self.params
    }

    /// First height with no base emission.
    pub fn emission_horizon(&self) -> u64 {
        self.horizon
    }

    /// Epoch number at `height`: 0 in the fixed-rate period, counting from 1 after.
    pub fn epoch_at(&self, height: u64) -> u64 {
        let p = &self.params;
        if height < p.fixed_rate_period {
            return 0;
        }
        1 + (height - p.fixed_rate_period) / p.epoch_length
    }

    /// Reward of the base curve, reaching zero at the horizon.
    pub fn base_rate_at(&self, height: u64) -> Nano {
        let p = &self.params;
        if height < p.fixed_rate_period {
            return p.fixed_rate;
        }
        let reduction = p
            .one_epoch_reduction
            .saturating_mul(self.epoch_at(height));
        p.fixed_rate.saturating_sub(reduction)
    }

    /// Scheduled block reward: the base curve, clamped to the terminal floor
    /// from the horizon on.
    pub fn rate_at(&self, height: u64) -> Nano {
        if height >= self.horizon {
            return self.params.reemission_reward;
        }
        self.base_rate_at(height)
    }

    /// Amount of the block reward diverted to the re-emission pool.
    pub fn reemission_rate_at(&self, height: u64) -> Nano {
        let p = &self.params;
        if height == 0 || height < p.reemission_activation_height || height >= self.horizon {
            return 0;
        }
        let base = self.base_rate_at(height);
        if base >= p.basic_charge_amount.saturating_add(p.reemission_reward) {
            p.basic_charge_amount
        } else if base > p.reemission_reward {
            base - p.reemission_reward
        } else {
            0
        }
    }

    /// Sum of base rewards over heights 1..=height.
    pub fn emitted_by(&self, height: u64) -> Nano {
        self.sum_blocks(1, height, |h| self.base_rate_at(h))
    }

    /// Sum of re-emission diversions over heights 1..=height.
    pub fn reemission_supply_at(&self, height: u64) -> Nano {
        self.sum_blocks(1, height, |h| self.reemission_rate_at(h))
    }

    /// Everything the pool will ever receive.
    pub fn total_reemission(&self) -> Nano {
        self.reemission_supply_at(self.horizon - 1)
    }

    /// Everything the base curve will ever emit.
    pub fn total_supply(&self) -> Nano {
        self.emitted_by(self.horizon - 1)
    }

    /// Amount the pool has paid out to miners over heights 1..=height.
    pub fn reemission_paid_by(&self, height: u64) -> Nano {
        if height < self.horizon {
            return 0;
        }
        let blocks = height - self.horizon + 1;
        blocks
            .saturating_mul(self.params.reemission_reward)
            .min(self.total_reemission())
    }

    /// Amount held by the pool after `height`.
    pub fn reemission_balance_at(&self, height: u64) -> Nano {
        self.reemission_supply_at(height) - self.reemission_paid_by(height)
    }

    /// Coins in circulation after `height`: emitted, minus held by the pool.
    pub fn circulating_supply_at(&self, height: u64) -> Nano {
        self.emitted_by(height) - self.reemission_balance_at(height)
    }

    /// Reward received by the miner of the block at `height`.
    pub fn miner_reward_at(&self, height: u64) -> Nano {
        if height < self.horizon {
            return self.rate_at(height) - self.reemission_rate_at(height);
        }
        let available = self.reemission_balance_at(height - 1);
        self.params.reemission_reward.min(available)
    }

    /// Last height paid from the re-emission pool, if it ever receives anything.
    pub fn reemission_exhausted_at(&self) -> Option<u64> {
        let total = self.total_reemission();
        if total == 0 {
            return None;
        }
        let blocks = total.div_ceil(self.params.reemission_reward);
        Some(self.horizon.saturating_add(blocks - 1))
    }

    /// Full emission state at `height`.
    pub fn emission_at(&self, height: u64) -> EmissionState {
        let emitted = self.emitted_by(height);
        let reemission_supply = self.reemission_supply_at(height);
        let reemission_balance = reemission_supply - self.reemission_paid_by(height);
        let state = EmissionState {
            height,
            epoch: self.epoch_at(height),
            rate: self.rate_at(height),
            reemission_rate: self.reemission_rate_at(height),
            miner_reward: self.miner_reward_at(height),
            reemission_supply,
            reemission_balance,
            circulating_supply: emitted - reemission_balance,
        };
        tracing::trace!(height, epoch = state.epoch, rate = state.rate, "emission state");
        state
    }

    /// Sum `reward(h)` over `from..=to`, one multiplication per constant segment.
    fn sum_blocks(&self, from: u64, to: u64, reward: impl Fn(u64) -> Nano) -> Nano {
        let mut total: Nano = 0;
        let mut start = from;
        while start <= to {
            let end = self.segment_end(start).min(to);
            let blocks = end - start + 1;
            total = total.saturating_add(reward(start).saturating_mul(blocks));
            if end == to {
                break;
            }
            start = end + 1;
        }
        total
    }

    /// Last height of the run of blocks starting at `height` over which both
    /// the base reward and the diversion stay constant.
    fn segment_end(&self, height: u64) -> u64 {
        let p = &self.params;
        let mut end = if height < p.fixed_rate_period {
            p.fixed_rate_period - 1
        } else if height < self.horizon {
            p.fixed_rate_period + self.epoch_at(height) * p.epoch_length - 1
        } else {
            u64::MAX
        };
        if height < p.reemission_activation_height {
            end = end.min(p.reemission_activation_height - 1);
        }
        end
    }
}
