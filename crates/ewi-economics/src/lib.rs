// crates/ewi-economics/src/lib.rs
//
// ewi-economics: the deterministic economic model behind the EWI dashboard.
//
// Two independent calculators:
//   - BankModel: prices, liabilities, reserve ratio, and mint/redeem capacity
//     of a two-token reserve bank, from a snapshot and an oracle peg rate
//   - EmissionScheduler: block reward, re-emission split, and supply figures
//     for any block height
//
// Both are pure functions over immutable parameter sets; they hold no shared
// state and can be called from any thread.

pub mod bank;
pub mod emission;
pub mod params;
pub mod progress;
pub mod series;

// Re-export key types for ergonomic access from downstream crates.
pub use bank::{Bank, BankModel, BankStateResponse, BankSummary, PegRate, ReserveRatio};
pub use emission::{EmissionScheduler, EmissionState};
pub use params::{
    BankParameters, EmissionParameters, EMISSION_HORIZON, REEMISSION_ACTIVATION_HEIGHT,
    TOTAL_SUPPLY,
};
pub use progress::{BlockDuration, EpochProgress};
pub use series::{sample_series, SeriesPoint};
