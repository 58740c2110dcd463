// crates/ewi-cli/src/commands/mod.rs
//
// Command module declarations for the EWI CLI.

pub mod bank;
pub mod emission;
pub mod params;
pub mod series;
