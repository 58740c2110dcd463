// crates/ewi-economics/src/series.rs
//
// Sampled emission curves for charting. Each point is a plain `emission_at`
// call; nothing here carries state between samples.

use ewi_core::error::EwiError;
use ewi_core::units::from_nano;
use serde::Serialize;

use crate::emission::EmissionScheduler;

/// Upper bound on points per series.
pub const MAX_SAMPLES: u64 = 100_000;

/// One chart sample, in whole ERG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub height: u64,
    pub rate: f64,
    pub miner_reward: f64,
    pub circulating_supply: f64,
    pub reemission_balance: f64,
}

/// Sample the curve every `step` blocks over `from..=to`. `to` is always included.
///
/// # Errors
/// Returns `EwiError::InvalidInput` if `step` is zero, `from > to`, or the
/// range would yield more than `MAX_SAMPLES` points.
pub fn sample_series(
    scheduler: &EmissionScheduler,
    from: u64,
    to: u64,
    step: u64,
) -> Result<Vec<SeriesPoint>, EwiError> {
    if step == 0 {
        return Err(EwiError::InvalidInput("series step must be > 0".to_string()));
    }
    if from > to {
        return Err(EwiError::InvalidInput(format!(
            "series range is empty: from {} > to {}",
            from, to
        )));
    }

    let samples = ((to - from) / step).saturating_add(2);
    if samples > MAX_SAMPLES {
        return Err(EwiError::InvalidInput(format!(
            "series would have {} points, limit is {}",
            samples, MAX_SAMPLES
        )));
    }

    let mut heights: Vec<u64> = (from..=to).step_by(step_len(step)).collect();
    if heights.last() != Some(&to) {
        heights.push(to);
    }
    tracing::debug!(from, to, step, samples = heights.len(), "sampling emission series");

    Ok(heights
        .into_iter()
        .map(|h| {
            let state = scheduler.emission_at(h);
            SeriesPoint {
                height: h,
                rate: from_nano(state.rate as f64),
                miner_reward: from_nano(state.miner_reward as f64),
                circulating_supply: from_nano(state.circulating_supply as f64),
                reemission_balance: from_nano(state.reemission_balance as f64),
            }
        })
        .collect())
}

fn step_len(step: u64) -> usize {
    usize::try_from(step).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EMISSION_HORIZON;

    #[test]
    fn test_sample_includes_endpoints() {
        let s = EmissionScheduler::default();
        let points = sample_series(&s, 0, 1_000, 300).unwrap();
        let heights: Vec<u64> = points.iter().map(|p| p.height).collect();
        assert_eq!(heights, vec![0, 300, 600, 900, 1_000]);
    }

    #[test]
    fn test_sample_single_point() {
        let s = EmissionScheduler::default();
        let points = sample_series(&s, 777_217, 777_217, 10).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].rate, 63.0);
        assert_eq!(points[0].miner_reward, 51.0);
    }

    #[test]
    fn test_sample_full_curve() {
        let s = EmissionScheduler::default();
        let points = sample_series(&s, 0, EMISSION_HORIZON, 64_800).unwrap();
        assert_eq!(points.first().unwrap().rate, 75.0);
        assert_eq!(points.last().unwrap().rate, 3.0);
        assert!(points
            .windows(2)
            .all(|w| w[1].circulating_supply >= w[0].circulating_supply));
    }

    #[test]
    fn test_zero_step_rejected() {
        let s = EmissionScheduler::default();
        assert!(sample_series(&s, 0, 10, 0).is_err());
    }

    #[test]
    fn test_oversized_series_rejected() {
        let s = EmissionScheduler::default();
        assert!(sample_series(&s, 0, u64::MAX, 1).is_err());
    }

    #[test]
    fn test_reversed_range_rejected() {
        let s = EmissionScheduler::default();
        assert!(sample_series(&s, 10, 0, 1).is_err());
    }
}
