// crates/ewi-economics/src/bank.rs
//
// Two-token reserve bank model (SigmaUSD/AgeUSD style).
//
// A bank holds a base-asset reserve backing two tokens:
//   - the stable-coin (SC), redeemable for its peg value while reserves allow
//   - the reserve-coin (RC), a claim on whatever equity is left over
//
// Everything here is a pure function of a `Bank` snapshot and a `PegRate`.
// Two clamps keep the model inside the reserve:
//   1. Liabilities never exceed the reserve (bank-run protection).
//   2. The SC price never exceeds reserve / SC supply.
//
// Capacity figures (mintable / redeemable) are closed-form solutions of the
// reserve ratio inequality after the trade, assuming the trade executes in a
// single transaction at the current price with the protocol fee applied.
//
// Units: reserves, liabilities, equity and prices are nanoERG (reals). The
// peg rate is nanoERG per SC unit as counted in `sc_circ`.

use ewi_core::error::EwiError;
use ewi_core::validate::validate_amount;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::BankParameters;

/// Immutable snapshot of the bank's circulating supplies and reserve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bank {
    sc_circ: f64,
    rc_circ: f64,
    base_reserves: f64,
}

impl Bank {
    /// Create a snapshot.
    ///
    /// # Errors
    /// Returns `EwiError::InvalidInput` if any quantity is negative or not finite.
    pub fn new(sc_circ: f64, rc_circ: f64, base_reserves: f64) -> Result<Self, EwiError> {
        Ok(Self {
            sc_circ: validate_amount("sc_circ", sc_circ)?,
            rc_circ: validate_amount("rc_circ", rc_circ)?,
            base_reserves: validate_amount("base_reserves", base_reserves)?,
        })
    }

    /// Circulating stable-coin supply.
    pub fn sc_circ(&self) -> f64 {
        self.sc_circ
    }

    /// Circulating reserve-coin supply.
    pub fn rc_circ(&self) -> f64 {
        self.rc_circ
    }

    /// Base-asset reserve in nanoERG.
    pub fn base_reserves(&self) -> f64 {
        self.base_reserves
    }
}

/// Oracle price of the peg currency: nanoERG per SC unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PegRate(f64);

impl PegRate {
    /// # Errors
    /// Returns `EwiError::InvalidInput` unless `nano_per_unit` is finite and > 0.
    pub fn new(nano_per_unit: f64) -> Result<Self, EwiError> {
        if !nano_per_unit.is_finite() || nano_per_unit <= 0.0 {
            return Err(EwiError::InvalidInput(format!(
                "peg rate must be a positive finite number, got {}",
                nano_per_unit
            )));
        }
        Ok(Self(nano_per_unit))
    }

    pub fn nano_per_unit(&self) -> f64 {
        self.0
    }
}

/// Reserve ratio with explicit markers for the cases a plain division can't express.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReserveRatio {
    /// Reserve / nominal liabilities, in percent. Never NaN; `+∞` only when
    /// the liabilities underflow to zero.
    Percent(f64),
    /// Reserve is positive and no stable-coin is outstanding.
    Unbounded,
    /// Neither reserve nor stable-coin exists.
    Undefined,
}

impl ReserveRatio {
    /// The ratio in percent, if stable-coin is outstanding.
    pub fn percent(&self) -> Option<f64> {
        match self {
            ReserveRatio::Percent(p) => Some(*p),
            _ => None,
        }
    }

    /// True if the ratio is a number at or below `threshold_pct`.
    pub fn at_or_below(&self, threshold_pct: f64) -> bool {
        matches!(self, ReserveRatio::Percent(p) if *p <= threshold_pct)
    }

    /// True if the ratio is unbounded or a number at or above `threshold_pct`.
    pub fn at_or_above(&self, threshold_pct: f64) -> bool {
        match self {
            ReserveRatio::Percent(p) => *p >= threshold_pct,
            ReserveRatio::Unbounded => true,
            ReserveRatio::Undefined => false,
        }
    }
}

impl fmt::Display for ReserveRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReserveRatio::Percent(p) if p.is_infinite() => write!(f, "∞ %"),
            ReserveRatio::Percent(p) => write!(f, "{:.0} %", p),
            ReserveRatio::Unbounded => write!(f, "∞"),
            ReserveRatio::Undefined => write!(f, "-"),
        }
    }
}

/// Every figure the dashboard shows for one bank snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BankSummary {
    pub bank: Bank,
    pub peg_rate: PegRate,
    pub sc_rate: f64,
    pub rc_rate: f64,
    pub liabilities: f64,
    pub equity: f64,
    pub reserve_ratio: ReserveRatio,
    pub mintable_sc: f64,
    pub redeemable_sc: f64,
    pub mintable_rc: f64,
    pub redeemable_rc: f64,
}

/// Bank state as served by the explorer backend.
///
/// `peg_rate_nano` is absent until the oracle has posted a rate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BankStateResponse {
    pub circ_sigusd: f64,
    pub circ_sigrsv: f64,
    pub reserves: f64,
    #[serde(default)]
    pub peg_rate_nano: Option<f64>,
}

impl BankStateResponse {
    /// Parse a JSON payload.
    ///
    /// # Errors
    /// Returns `EwiError::Serialization` on malformed JSON.
    pub fn from_json(payload: &str) -> Result<Self, EwiError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Validate into a snapshot and an optional peg rate.
    ///
    /// # Errors
    /// Returns `EwiError::InvalidInput` if any present value is out of range.
    pub fn into_snapshot(self) -> Result<(Bank, Option<PegRate>), EwiError> {
        let bank = Bank::new(self.circ_sigusd, self.circ_sigrsv, self.reserves)?;
        let peg = self.peg_rate_nano.map(PegRate::new).transpose()?;
        Ok((bank, peg))
    }
}

/// Pricing and capacity calculator for a reserve bank.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BankModel {
    params: BankParameters,
}

impl BankModel {
    /// # Errors
    /// Returns `EwiError::InvalidParameters` if `params` fails validation.
    pub fn new(params: BankParameters) -> Result<Self, EwiError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &BankParameters {
        &self.params
    }

    /// Value owed to SC holders at the peg, before the reserve cap.
    pub fn nominal_liabilities(&self, bank: &Bank, peg: PegRate) -> f64 {
        bank.sc_circ * peg.nano_per_unit()
    }

    /// Value owed to SC holders, capped at the reserve.
    pub fn liabilities(&self, bank: &Bank, peg: PegRate) -> f64 {
        if bank.sc_circ == 0.0 {
            return 0.0;
        }
        let nominal = self.nominal_liabilities(bank, peg);
        if nominal > bank.base_reserves {
            tracing::trace!(
                nominal,
                reserves = bank.base_reserves,
                "liabilities capped at reserve"
            );
            return bank.base_reserves;
        }
        nominal
    }

    /// Reserve left after liabilities. Never negative.
    pub fn equity(&self, bank: &Bank, peg: PegRate) -> f64 {
        bank.base_reserves - self.liabilities(bank, peg)
    }

    /// Reserve over nominal liabilities, in percent.
    ///
    /// Uses the uncapped liabilities so the ratio can fall below 100% and
    /// keeps decreasing as SC supply grows.
    ///
    /// Liabilities that overflow f64 give 0 %; liabilities that underflow to
    /// zero while SC is outstanding give `Percent(+∞)`.
    pub fn reserve_ratio(&self, bank: &Bank, peg: PegRate) -> ReserveRatio {
        if bank.sc_circ == 0.0 {
            if bank.base_reserves > 0.0 {
                return ReserveRatio::Unbounded;
            }
            return ReserveRatio::Undefined;
        }
        if bank.base_reserves == 0.0 {
            return ReserveRatio::Percent(0.0);
        }
        let nominal = self.nominal_liabilities(bank, peg);
        ReserveRatio::Percent(bank.base_reserves / nominal * 100.0)
    }

    /// Price of one SC unit in nanoERG: the peg, clamped to reserve / SC supply.
    pub fn sc_rate(&self, bank: &Bank, peg: PegRate) -> f64 {
        let nominal = peg.nano_per_unit();
        if bank.sc_circ == 0.0 {
            return nominal;
        }
        let backed = bank.base_reserves / bank.sc_circ;
        if backed < nominal {
            tracing::trace!(nominal, backed, "sc price clamped to reserve backing");
            return backed;
        }
        nominal
    }

    /// Price of one RC unit in nanoERG.
    ///
    /// Falls back to the default price while at most one RC exists or the
    /// bank has no equity left.
    pub fn rc_rate(&self, bank: &Bank, peg: PegRate) -> f64 {
        let equity = self.equity(bank, peg);
        if bank.rc_circ <= 1.0 || equity == 0.0 {
            return self.params.rc_default_price;
        }
        equity / bank.rc_circ
    }

    /// SC redemption is never ratio-gated: every outstanding unit can be redeemed.
    pub fn redeemable_sc(&self, bank: &Bank) -> f64 {
        bank.sc_circ
    }

    /// Largest SC amount that keeps the ratio at or above the minimum after minting.
    pub fn mintable_sc(&self, bank: &Bank, peg: PegRate) -> f64 {
        let ratio = self.reserve_ratio(bank, peg);
        if matches!(ratio, ReserveRatio::Undefined)
            || ratio.at_or_below(self.params.min_reserve_ratio_pct)
        {
            tracing::debug!(%ratio, "sc minting closed: reserve ratio at or below floor");
            return 0.0;
        }
        // (R + x·p·(1+f)) / ((S + x)·p) >= r_min
        let p = peg.nano_per_unit();
        let r_min = self.params.min_ratio();
        let headroom = bank.base_reserves - r_min * p * bank.sc_circ;
        let per_unit = p * (r_min - 1.0 - self.params.fee);
        (headroom / per_unit).max(0.0)
    }

    /// Largest RC amount that keeps the ratio at or below the maximum after minting.
    ///
    /// With no SC outstanding the ceiling cannot bind and the result is `f64::INFINITY`.
    pub fn mintable_rc(&self, bank: &Bank, peg: PegRate) -> f64 {
        if bank.sc_circ == 0.0 {
            return f64::INFINITY;
        }
        if self
            .reserve_ratio(bank, peg)
            .at_or_above(self.params.max_reserve_ratio_pct)
        {
            tracing::debug!("rc minting closed: reserve ratio at or above ceiling");
            return 0.0;
        }
        // (R + y·c·(1+f)) / (S·p) <= r_max
        let c = self.rc_rate(bank, peg);
        let ceiling = self.params.max_ratio() * self.nominal_liabilities(bank, peg);
        if !ceiling.is_finite() {
            tracing::debug!("rc minting closed: liabilities exceed f64 range");
            return 0.0;
        }
        ((ceiling - bank.base_reserves) / (c * (1.0 + self.params.fee))).max(0.0)
    }

    /// Largest RC amount that keeps the ratio at or above the minimum after redemption.
    pub fn redeemable_rc(&self, bank: &Bank, peg: PegRate) -> f64 {
        if bank.rc_circ == 0.0 {
            return 0.0;
        }
        if bank.sc_circ == 0.0 {
            return bank.rc_circ;
        }
        if self
            .reserve_ratio(bank, peg)
            .at_or_below(self.params.min_reserve_ratio_pct)
        {
            tracing::debug!("rc redemption closed: reserve ratio at or below floor");
            return 0.0;
        }
        // (R - y·c·(1-f)) / (S·p) >= r_min
        let c = self.rc_rate(bank, peg);
        let floor = self.params.min_ratio() * self.nominal_liabilities(bank, peg);
        ((bank.base_reserves - floor) / (c * (1.0 - self.params.fee)))
            .clamp(0.0, bank.rc_circ)
    }

    /// Base asset a minter pays into the reserve for `amount` SC, fee included.
    pub fn sc_mint_cost(&self, bank: &Bank, peg: PegRate, amount: f64) -> f64 {
        amount * self.sc_rate(bank, peg) * (1.0 + self.params.fee)
    }

    /// Base asset paid out of the reserve for `amount` SC, fee deducted.
    pub fn sc_redeem_proceeds(&self, bank: &Bank, peg: PegRate, amount: f64) -> f64 {
        amount * self.sc_rate(bank, peg) * (1.0 - self.params.fee)
    }

    /// Base asset a minter pays into the reserve for `amount` RC, fee included.
    pub fn rc_mint_cost(&self, bank: &Bank, peg: PegRate, amount: f64) -> f64 {
        amount * self.rc_rate(bank, peg) * (1.0 + self.params.fee)
    }

    /// Base asset paid out of the reserve for `amount` RC, fee deducted.
    pub fn rc_redeem_proceeds(&self, bank: &Bank, peg: PegRate, amount: f64) -> f64 {
        amount * self.rc_rate(bank, peg) * (1.0 - self.params.fee)
    }

    /// Snapshot after minting `amount` SC. Capacity is not checked.
    ///
    /// # Errors
    /// Returns `EwiError::InvalidInput` if `amount` is negative or not finite.
    pub fn apply_sc_mint(&self, bank: &Bank, peg: PegRate, amount: f64) -> Result<Bank, EwiError> {
        let amount = validate_amount("amount", amount)?;
        Bank::new(
            bank.sc_circ + amount,
            bank.rc_circ,
            bank.base_reserves + self.sc_mint_cost(bank, peg, amount),
        )
    }

    /// Snapshot after redeeming `amount` SC.
    ///
    /// # Errors
    /// Returns `EwiError::InvalidInput` if `amount` is invalid or exceeds supply.
    pub fn apply_sc_redeem(
        &self,
        bank: &Bank,
        peg: PegRate,
        amount: f64,
    ) -> Result<Bank, EwiError> {
        let amount = validate_amount("amount", amount)?;
        Bank::new(
            bank.sc_circ - amount,
            bank.rc_circ,
            bank.base_reserves - self.sc_redeem_proceeds(bank, peg, amount),
        )
    }

    /// Snapshot after minting `amount` RC. Capacity is not checked.
    ///
    /// # Errors
    /// Returns `EwiError::InvalidInput` if `amount` is negative or not finite.
    pub fn apply_rc_mint(&self, bank: &Bank, peg: PegRate, amount: f64) -> Result<Bank, EwiError> {
        let amount = validate_amount("amount", amount)?;
        Bank::new(
            bank.sc_circ,
            bank.rc_circ + amount,
            bank.base_reserves + self.rc_mint_cost(bank, peg, amount),
        )
    }

    /// Snapshot after redeeming `amount` RC.
    ///
    /// # Errors
    /// Returns `EwiError::InvalidInput` if `amount` is invalid or exceeds supply.
    pub fn apply_rc_redeem(
        &self,
        bank: &Bank,
        peg: PegRate,
        amount: f64,
    ) -> Result<Bank, EwiError> {
        let amount = validate_amount("amount", amount)?;
        Bank::new(
            bank.sc_circ,
            bank.rc_circ - amount,
            bank.base_reserves - self.rc_redeem_proceeds(bank, peg, amount),
        )
    }

    /// All figures for a snapshot, or `None` while the peg rate is unknown.
    pub fn summary(&self, bank: &Bank, peg: Option<PegRate>) -> Option<BankSummary> {
        let Some(peg) = peg else {
            tracing::debug!("peg rate not available; skipping bank figures");
            return None;
        };
        Some(BankSummary {
            bank: *bank,
            peg_rate: peg,
            sc_rate: self.sc_rate(bank, peg),
            rc_rate: self.rc_rate(bank, peg),
            liabilities: self.liabilities(bank, peg),
            equity: self.equity(bank, peg),
            reserve_ratio: self.reserve_ratio(bank, peg),
            mintable_sc: self.mintable_sc(bank, peg),
            redeemable_sc: self.redeemable_sc(bank),
            mintable_rc: self.mintable_rc(bank, peg),
            redeemable_rc: self.redeemable_rc(bank, peg),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BankModel {
        BankModel::default()
    }

    fn peg(v: f64) -> PegRate {
        PegRate::new(v).unwrap()
    }

    fn healthy() -> Bank {
        Bank::new(1000.0, 500.0, 6000.0).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_bank_rejects_negative_supply() {
        assert!(Bank::new(-1.0, 0.0, 0.0).is_err());
        assert!(Bank::new(0.0, -1.0, 0.0).is_err());
        assert!(Bank::new(0.0, 0.0, -1.0).is_err());
    }

    #[test]
    fn test_bank_rejects_nan() {
        assert!(Bank::new(f64::NAN, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_peg_rate_must_be_positive() {
        assert!(PegRate::new(0.0).is_err());
        assert!(PegRate::new(-3.0).is_err());
        assert!(PegRate::new(f64::INFINITY).is_err());
        assert!(PegRate::new(1.0).is_ok());
    }

    #[test]
    fn test_healthy_bank_scenario() {
        let m = model();
        let b = healthy();
        let p = peg(1.0);
        assert_eq!(m.liabilities(&b, p), 1000.0);
        assert_eq!(m.equity(&b, p), 5000.0);
        assert_eq!(m.reserve_ratio(&b, p), ReserveRatio::Percent(600.0));
        assert_eq!(m.sc_rate(&b, p), 1.0);
        assert_eq!(m.rc_rate(&b, p), 10.0);
    }

    #[test]
    fn test_liabilities_capped_at_reserve() {
        let m = model();
        let b = Bank::new(1000.0, 500.0, 600.0).unwrap();
        let p = peg(1.0);
        assert_eq!(m.nominal_liabilities(&b, p), 1000.0);
        assert_eq!(m.liabilities(&b, p), 600.0);
        assert_eq!(m.equity(&b, p), 0.0);
    }

    #[test]
    fn test_sc_rate_clamped_to_backing() {
        let m = model();
        let b = Bank::new(1000.0, 500.0, 600.0).unwrap();
        assert_eq!(m.sc_rate(&b, peg(1.0)), 0.6);
    }

    #[test]
    fn test_sc_rate_without_supply_is_peg() {
        let m = model();
        let b = Bank::new(0.0, 0.0, 0.0).unwrap();
        assert_eq!(m.sc_rate(&b, peg(2.5)), 2.5);
    }

    #[test]
    fn test_rc_rate_default_without_supply() {
        let m = model();
        let b = Bank::new(0.0, 0.0, 1_000_000.0).unwrap();
        assert_eq!(m.rc_rate(&b, peg(1.0)), m.params().rc_default_price);
    }

    #[test]
    fn test_rc_rate_default_without_equity() {
        let m = model();
        let b = Bank::new(1000.0, 500.0, 600.0).unwrap();
        assert_eq!(m.rc_rate(&b, peg(1.0)), m.params().rc_default_price);
    }

    #[test]
    fn test_reserve_ratio_unbounded_without_sc() {
        let m = model();
        let b = Bank::new(0.0, 10.0, 5000.0).unwrap();
        assert_eq!(m.reserve_ratio(&b, peg(1.0)), ReserveRatio::Unbounded);
        assert_eq!(m.reserve_ratio(&b, peg(1.0)).to_string(), "∞");
    }

    #[test]
    fn test_reserve_ratio_undefined_for_empty_bank() {
        let m = model();
        let b = Bank::new(0.0, 0.0, 0.0).unwrap();
        assert_eq!(m.reserve_ratio(&b, peg(1.0)), ReserveRatio::Undefined);
        assert_eq!(m.liabilities(&b, peg(1.0)), 0.0);
        assert_eq!(m.equity(&b, peg(1.0)), 0.0);
    }

    #[test]
    fn test_reserve_ratio_zero_when_reserve_empty() {
        let m = model();
        let b = Bank::new(10.0, 0.0, 0.0).unwrap();
        assert_eq!(m.reserve_ratio(&b, peg(1.0)), ReserveRatio::Percent(0.0));
    }

    #[test]
    fn test_ratio_display_rounds() {
        assert_eq!(ReserveRatio::Percent(612.4).to_string(), "612 %");
        assert_eq!(ReserveRatio::Undefined.to_string(), "-");
    }

    #[test]
    fn test_overflowing_liabilities_give_zero_ratio() {
        // S·p overflows to +∞ while the reserve is still finite.
        let m = model();
        let b = Bank::new(1e300, 1.0, 1e308).unwrap();
        let p = peg(1e10);
        assert_eq!(m.reserve_ratio(&b, p), ReserveRatio::Percent(0.0));
        assert_eq!(m.liabilities(&b, p), 1e308);
        assert_eq!(m.equity(&b, p), 0.0);
        assert_eq!(m.mintable_sc(&b, p), 0.0);
        assert_eq!(m.mintable_rc(&b, p), 0.0);
        assert_eq!(m.redeemable_rc(&b, p), 0.0);
        assert_eq!(m.rc_rate(&b, p), m.params().rc_default_price);
        let summary = m.summary(&b, Some(p)).unwrap();
        assert!(!summary.sc_rate.is_nan());
    }

    #[test]
    fn test_underflowing_liabilities_stay_numeric() {
        // SC is outstanding but S·p rounds to zero.
        let m = model();
        let b = Bank::new(1e-200, 10.0, 6000.0).unwrap();
        let p = peg(1e-200);
        let ratio = m.reserve_ratio(&b, p);
        assert_eq!(ratio, ReserveRatio::Percent(f64::INFINITY));
        assert_eq!(ratio.to_string(), "∞ %");
        assert!(ratio.at_or_above(800.0));
        assert_eq!(m.mintable_rc(&b, p), 0.0);
        let r = m.redeemable_rc(&b, p);
        assert!(!r.is_nan() && r <= b.rc_circ());
    }

    #[test]
    fn test_mintable_sc_closed_form() {
        let m = model();
        let b = healthy();
        // (6000 - 4·1000) / (4 - 1 - 0.02)
        assert!(close(m.mintable_sc(&b, peg(1.0)), 2000.0 / 2.98));
    }

    #[test]
    fn test_mintable_sc_lands_on_floor() {
        let m = model();
        let b = healthy();
        let p = peg(1.0);
        let x = m.mintable_sc(&b, p);
        let after = m.apply_sc_mint(&b, p, x).unwrap();
        let ratio = m.reserve_ratio(&after, p).percent().unwrap();
        assert!(close(ratio, 400.0));
    }

    #[test]
    fn test_mintable_sc_zero_at_floor() {
        let m = model();
        let b = Bank::new(1000.0, 500.0, 4000.0).unwrap();
        assert_eq!(m.mintable_sc(&b, peg(1.0)), 0.0);
    }

    #[test]
    fn test_mintable_sc_zero_below_floor() {
        let m = model();
        let b = Bank::new(1000.0, 500.0, 3000.0).unwrap();
        assert_eq!(m.mintable_sc(&b, peg(1.0)), 0.0);
    }

    #[test]
    fn test_mintable_sc_from_reserve_only() {
        let m = model();
        let b = Bank::new(0.0, 100.0, 2980.0).unwrap();
        assert!(close(m.mintable_sc(&b, peg(1.0)), 1000.0));
    }

    #[test]
    fn test_mintable_sc_empty_bank() {
        let m = model();
        let b = Bank::new(0.0, 0.0, 0.0).unwrap();
        assert_eq!(m.mintable_sc(&b, peg(1.0)), 0.0);
    }

    #[test]
    fn test_mintable_rc_closed_form() {
        let m = model();
        let b = healthy();
        // (8·1000 - 6000) / (10 · 1.02)
        assert!(close(m.mintable_rc(&b, peg(1.0)), 2000.0 / 10.2));
    }

    #[test]
    fn test_mintable_rc_lands_on_ceiling() {
        let m = model();
        let b = healthy();
        let p = peg(1.0);
        let y = m.mintable_rc(&b, p);
        let after = m.apply_rc_mint(&b, p, y).unwrap();
        let ratio = m.reserve_ratio(&after, p).percent().unwrap();
        assert!(close(ratio, 800.0));
    }

    #[test]
    fn test_mintable_rc_zero_over_ceiling() {
        let m = model();
        let b = Bank::new(1000.0, 500.0, 9000.0).unwrap();
        assert_eq!(m.mintable_rc(&b, peg(1.0)), 0.0);
    }

    #[test]
    fn test_mintable_rc_unbounded_without_sc() {
        let m = model();
        let b = Bank::new(0.0, 0.0, 0.0).unwrap();
        assert_eq!(m.mintable_rc(&b, peg(1.0)), f64::INFINITY);
    }

    #[test]
    fn test_redeemable_rc_closed_form() {
        let m = model();
        let b = healthy();
        // (6000 - 4000) / (10 · 0.98)
        assert!(close(m.redeemable_rc(&b, peg(1.0)), 2000.0 / 9.8));
    }

    #[test]
    fn test_redeemable_rc_lands_on_floor() {
        let m = model();
        let b = healthy();
        let p = peg(1.0);
        let y = m.redeemable_rc(&b, p);
        let after = m.apply_rc_redeem(&b, p, y).unwrap();
        let ratio = m.reserve_ratio(&after, p).percent().unwrap();
        assert!(close(ratio, 400.0));
    }

    #[test]
    fn test_redeemable_rc_capped_at_supply() {
        let m = model();
        let b = Bank::new(10.0, 5.0, 1_000_000.0).unwrap();
        assert_eq!(m.redeemable_rc(&b, peg(1.0)), 5.0);
    }

    #[test]
    fn test_redeemable_rc_all_without_sc() {
        let m = model();
        let b = Bank::new(0.0, 42.0, 1000.0).unwrap();
        assert_eq!(m.redeemable_rc(&b, peg(1.0)), 42.0);
    }

    #[test]
    fn test_redeemable_rc_zero_below_floor() {
        let m = model();
        let b = Bank::new(1000.0, 500.0, 3500.0).unwrap();
        assert_eq!(m.redeemable_rc(&b, peg(1.0)), 0.0);
    }

    #[test]
    fn test_redeemable_sc_is_supply() {
        assert_eq!(model().redeemable_sc(&healthy()), 1000.0);
    }

    #[test]
    fn test_costs_include_fee() {
        let m = model();
        let b = healthy();
        let p = peg(1.0);
        assert!(close(m.sc_mint_cost(&b, p, 100.0), 102.0));
        assert!(close(m.sc_redeem_proceeds(&b, p, 100.0), 98.0));
        assert!(close(m.rc_mint_cost(&b, p, 10.0), 102.0));
        assert!(close(m.rc_redeem_proceeds(&b, p, 10.0), 98.0));
    }

    #[test]
    fn test_apply_does_not_mutate_snapshot() {
        let m = model();
        let b = healthy();
        let after = m.apply_sc_mint(&b, peg(1.0), 10.0).unwrap();
        assert_eq!(b, healthy());
        assert_eq!(after.sc_circ(), 1010.0);
    }

    #[test]
    fn test_apply_redeem_beyond_supply_rejected() {
        let m = model();
        let b = healthy();
        assert!(m.apply_rc_redeem(&b, peg(1.0), 501.0).is_err());
        assert!(m.apply_sc_redeem(&b, peg(1.0), -1.0).is_err());
    }

    #[test]
    fn test_summary_requires_peg() {
        let m = model();
        assert!(m.summary(&healthy(), None).is_none());
        let s = m.summary(&healthy(), Some(peg(1.0))).unwrap();
        assert_eq!(s.liabilities, 1000.0);
        assert_eq!(s.reserve_ratio, ReserveRatio::Percent(600.0));
        assert_eq!(s.redeemable_sc, 1000.0);
    }

    #[test]
    fn test_state_response_parses() {
        let payload = r#"{"circ_sigusd": 1000.0, "circ_sigrsv": 500.0, "reserves": 6000.0, "peg_rate_nano": 1.0}"#;
        let (bank, peg) = BankStateResponse::from_json(payload)
            .unwrap()
            .into_snapshot()
            .unwrap();
        assert_eq!(bank, healthy());
        assert_eq!(peg.unwrap().nano_per_unit(), 1.0);
    }

    #[test]
    fn test_state_response_without_peg() {
        let payload = r#"{"circ_sigusd": 1, "circ_sigrsv": 2, "reserves": 3}"#;
        let (_, peg) = BankStateResponse::from_json(payload)
            .unwrap()
            .into_snapshot()
            .unwrap();
        assert!(peg.is_none());
    }

    #[test]
    fn test_state_response_rejects_negative_reserve() {
        let payload = r#"{"circ_sigusd": 1, "circ_sigrsv": 2, "reserves": -3}"#;
        let result = BankStateResponse::from_json(payload).unwrap().into_snapshot();
        assert!(matches!(result, Err(EwiError::InvalidInput(_))));
    }
}
