// crates/ewi-core/src/units.rs
//
// Base-asset amounts.
//
// The smallest unit of the base asset is the nanoERG. 1 ERG = 10^9 nanoERG.
// Emission figures are exact integers in nanoERG; bank figures are reals
// expressed in nanoERG and converted to whole ERG only for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of nanoERG in one ERG.
pub const NANO_PER_ERG: u64 = 1_000_000_000;

/// nanoERG, the smallest unit of the base asset.
pub type Nano = u64;

/// Convert a real nanoERG quantity to whole ERG.
pub fn from_nano(nano: f64) -> f64 {
    nano / NANO_PER_ERG as f64
}

/// An exact base-asset amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Erg {
    /// Amount in nanoERG (1 ERG = 10^9 nanoERG).
    pub nano: u64,
}

impl Erg {
    /// Create an amount from a nanoERG value.
    pub const fn from_nano(nano: u64) -> Self {
        Self { nano }
    }
}

impl fmt::Display for Erg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.nano / NANO_PER_ERG;
        let frac = self.nano % NANO_PER_ERG;
        if frac == 0 {
            write!(f, "{} ERG", whole)
        } else {
            let frac_str = format!("{:09}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} ERG", whole, trimmed)
        }
    }
}
