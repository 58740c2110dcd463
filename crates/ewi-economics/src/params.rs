// crates/ewi-economics/src/params.rs
//
// Protocol parameters for the bank model and the emission schedule.
//
// Both parameter sets are plain immutable values handed to the model at
// construction time. The `Default` impls carry the deployed mainnet values:
//   - SigmaUSD bank: 400% / 800% reserve ratio bounds, 2% protocol fee
//   - Ergo emission: 75 ERG/block for 525,600 blocks, then -3 ERG every
//     64,800-block epoch; EIP-27 re-emission from height 777,217
//
// Any consumer relying on historical parity must use the defaults unchanged.

use ewi_core::error::EwiError;
use ewi_core::units::{Nano, NANO_PER_ERG};
use serde::{Deserialize, Serialize};

/// Minimum reserve ratio in percent. Below this, SC minting and RC redemption stop.
pub const MIN_RESERVE_RATIO_PCT: f64 = 400.0;

/// Maximum reserve ratio in percent. Above this, RC minting stops.
pub const MAX_RESERVE_RATIO_PCT: f64 = 800.0;

/// Protocol fee charged on every mint and redemption (2%).
pub const PROTOCOL_FEE: f64 = 0.02;

/// RC price used while no reserve-coin exists or equity is exhausted (0.001 ERG).
pub const RC_DEFAULT_PRICE_NANO: f64 = 1_000_000.0;

/// Block reward during the fixed-rate period.
pub const FIXED_RATE: Nano = 75 * NANO_PER_ERG;

/// Number of blocks paid at the fixed rate.
pub const FIXED_RATE_PERIOD: u64 = 525_600;

/// Blocks per reduction epoch.
pub const EPOCH_LENGTH: u64 = 64_800;

/// Reward reduction applied at each epoch boundary.
pub const ONE_EPOCH_REDUCTION: Nano = 3 * NANO_PER_ERG;

/// First height at which part of the reward is diverted to re-emission.
pub const REEMISSION_ACTIVATION_HEIGHT: u64 = 777_217;

/// Per-block amount diverted to re-emission while the reward allows it.
pub const BASIC_CHARGE_AMOUNT: Nano = 12 * NANO_PER_ERG;

/// Terminal reward paid from the re-emission pool once emission ends.
pub const REEMISSION_REWARD: Nano = 3 * NANO_PER_ERG;

/// First height with no base emission.
pub const EMISSION_HORIZON: u64 = 2_080_800;

/// Total base-asset supply ever emitted.
pub const TOTAL_SUPPLY: Nano = 97_739_925 * NANO_PER_ERG;

/// Target block interval in seconds, used for time estimates only.
pub const BLOCK_TIME_SECS: u64 = 120;

/// Reserve bank parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankParameters {
    /// Minimum reserve ratio, in percent.
    pub min_reserve_ratio_pct: f64,
    /// Maximum reserve ratio, in percent.
    pub max_reserve_ratio_pct: f64,
    /// Fee fraction applied to mint/redeem flows (0.02 = 2%).
    pub fee: f64,
    /// Reserve-coin floor price in nanoERG.
    pub rc_default_price: f64,
}

impl Default for BankParameters {
    fn default() -> Self {
        Self {
            min_reserve_ratio_pct: MIN_RESERVE_RATIO_PCT,
            max_reserve_ratio_pct: MAX_RESERVE_RATIO_PCT,
            fee: PROTOCOL_FEE,
            rc_default_price: RC_DEFAULT_PRICE_NANO,
        }
    }
}

impl BankParameters {
    /// Minimum reserve ratio as a plain multiplier (4.0 for 400%).
    pub fn min_ratio(&self) -> f64 {
        self.min_reserve_ratio_pct / 100.0
    }

    /// Maximum reserve ratio as a plain multiplier (8.0 for 800%).
    pub fn max_ratio(&self) -> f64 {
        self.max_reserve_ratio_pct / 100.0
    }

    /// Check that the capacity closed forms are well defined for this set.
    ///
    /// # Errors
    /// Returns `EwiError::InvalidParameters` naming the first violated bound.
    pub fn validate(&self) -> Result<(), EwiError> {
        let all_finite = [
            self.min_reserve_ratio_pct,
            self.max_reserve_ratio_pct,
            self.fee,
            self.rc_default_price,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(EwiError::InvalidParameters(
                "bank parameters must be finite".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.fee) {
            return Err(EwiError::InvalidParameters(format!(
                "fee must be in [0, 1), got {}",
                self.fee
            )));
        }
        // SC minting adds reserves at (1 + fee) per unit of liability; the
        // floor must exceed that or the mint bound has no solution.
        if self.min_ratio() <= 1.0 + self.fee {
            return Err(EwiError::InvalidParameters(format!(
                "min reserve ratio must exceed {}%, got {}%",
                100.0 * (1.0 + self.fee),
                self.min_reserve_ratio_pct
            )));
        }
        if self.max_reserve_ratio_pct < self.min_reserve_ratio_pct {
            return Err(EwiError::InvalidParameters(format!(
                "max reserve ratio {}% is below min {}%",
                self.max_reserve_ratio_pct, self.min_reserve_ratio_pct
            )));
        }
        if self.rc_default_price <= 0.0 {
            return Err(EwiError::InvalidParameters(format!(
                "rc default price must be > 0, got {}",
                self.rc_default_price
            )));
        }
        Ok(())
    }
}

/// Emission schedule parameters. Amounts are in nanoERG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionParameters {
    /// Reward per block during the fixed-rate period.
    pub fixed_rate: Nano,
    /// Number of blocks (counting from height 0) paid at `fixed_rate`.
    pub fixed_rate_period: u64,
    /// Blocks per reduction epoch.
    pub epoch_length: u64,
    /// Reward reduction per epoch.
    pub one_epoch_reduction: Nano,
    /// First height diverting part of the reward to re-emission.
    pub reemission_activation_height: u64,
    /// Maximum per-block diversion.
    pub basic_charge_amount: Nano,
    /// Terminal per-block reward, also the part of the reward a miner keeps
    /// when the diversion tapers off.
    pub reemission_reward: Nano,
    /// Target block interval in seconds.
    pub block_time_secs: u64,
}

impl Default for EmissionParameters {
    fn default() -> Self {
        Self {
            fixed_rate: FIXED_RATE,
            fixed_rate_period: FIXED_RATE_PERIOD,
            epoch_length: EPOCH_LENGTH,
            one_epoch_reduction: ONE_EPOCH_REDUCTION,
            reemission_activation_height: REEMISSION_ACTIVATION_HEIGHT,
            basic_charge_amount: BASIC_CHARGE_AMOUNT,
            reemission_reward: REEMISSION_REWARD,
            block_time_secs: BLOCK_TIME_SECS,
        }
    }
}

impl EmissionParameters {
    /// Number of reduction epochs that still pay a positive base reward.
    pub fn positive_epochs(&self) -> u64 {
        (self.fixed_rate - 1) / self.one_epoch_reduction
    }

    /// First height whose base reward is zero.
    pub fn emission_horizon(&self) -> u64 {
        self.fixed_rate_period + self.positive_epochs() * self.epoch_length
    }

    /// Base reward during the last positive epoch.
    pub fn last_epoch_reward(&self) -> Nano {
        self.fixed_rate - self.positive_epochs() * self.one_epoch_reduction
    }

    /// # Errors
    /// Returns `EwiError::InvalidParameters` naming the first violated bound.
    pub fn validate(&self) -> Result<(), EwiError> {
        if self.fixed_rate == 0 {
            return Err(EwiError::InvalidParameters(
                "fixed rate must be > 0".to_string(),
            ));
        }
        if self.fixed_rate_period == 0 {
            return Err(EwiError::InvalidParameters(
                "fixed rate period must be >= 1 block".to_string(),
            ));
        }
        if self.epoch_length == 0 {
            return Err(EwiError::InvalidParameters(
                "epoch length must be > 0".to_string(),
            ));
        }
        if self.one_epoch_reduction == 0 {
            return Err(EwiError::InvalidParameters(
                "epoch reduction must be > 0".to_string(),
            ));
        }
        if self.block_time_secs == 0 {
            return Err(EwiError::InvalidParameters(
                "block time must be > 0".to_string(),
            ));
        }
        if self.reemission_reward == 0 {
            return Err(EwiError::InvalidParameters(
                "terminal reward must be > 0".to_string(),
            ));
        }
        // The terminal floor may not sit above the final scheduled reward,
        // otherwise the curve would step up at the horizon.
        let last = if self.positive_epochs() == 0 {
            self.fixed_rate
        } else {
            self.last_epoch_reward()
        };
        if self.reemission_reward > last {
            return Err(EwiError::InvalidParameters(format!(
                "terminal reward {} exceeds last scheduled reward {}",
                self.reemission_reward, last
            )));
        }
        // Horizon arithmetic must fit in u64.
        let horizon = self
            .positive_epochs()
            .checked_mul(self.epoch_length)
            .and_then(|blocks| blocks.checked_add(self.fixed_rate_period))
            .ok_or_else(|| {
                EwiError::InvalidParameters("emission horizon overflows u64".to_string())
            })?;
        if self
            .basic_charge_amount
            .checked_add(self.reemission_reward)
            .is_none()
        {
            return Err(EwiError::InvalidParameters(
                "re-emission charge plus terminal reward overflows u64".to_string(),
            ));
        }
        // Cumulative supplies and the pool's payout window are bounded by the
        // total emission, so both must fit in u64.
        let total = self.checked_total_emission().ok_or_else(|| {
            EwiError::InvalidParameters("total emission overflows u64".to_string())
        })?;
        if horizon.checked_add(total).is_none() {
            return Err(EwiError::InvalidParameters(
                "re-emission payout window overflows u64".to_string(),
            ));
        }
        Ok(())
    }

    /// Upper bound on everything the base curve emits, counting height 0:
    /// `fixed_rate·fixed_rate_period + epoch_length·Σ(fixed_rate − k·reduction)`
    /// over the positive epochs. `None` if it does not fit in u64.
    fn checked_total_emission(&self) -> Option<u64> {
        let n = u128::from(self.positive_epochs());
        let fixed = u128::from(self.fixed_rate);
        let triangle = n.checked_mul(n + 1)? / 2;
        let per_block_sum = n
            .checked_mul(fixed)?
            .checked_sub(u128::from(self.one_epoch_reduction).checked_mul(triangle)?)?;
        let total = fixed
            .checked_mul(u128::from(self.fixed_rate_period))?
            .checked_add(per_block_sum.checked_mul(u128::from(self.epoch_length))?)?;
        u64::try_from(total).ok()
    }
}
