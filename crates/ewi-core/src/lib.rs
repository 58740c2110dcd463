// crates/ewi-core/src/lib.rs
//
// ewi-core: error types, base-asset units, and boundary validation shared by
// the EWI economic model crates.
//
// This is the leaf crate of the workspace. It holds nothing protocol-specific:
// the bank model and the emission schedule live in ewi-economics.

pub mod error;
pub mod units;
pub mod validate;

pub use error::EwiError;
pub use units::{from_nano, Erg, Nano, NANO_PER_ERG};
pub use validate::{validate_amount, validate_height};
