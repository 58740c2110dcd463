// crates/ewi-cli/src/commands/params.rs
//
// `ewi params`: effective protocol parameters after config overrides.

use ewi_core::units::Erg;
use ewi_economics::{BankParameters, EmissionParameters};
use serde::Serialize;

use crate::config::EwiConfig;
use crate::output::{field, format_json, format_table, Field, OutputFormat};

#[derive(Serialize)]
struct ParamsReport<'a> {
    emission: &'a EmissionParameters,
    emission_horizon: u64,
    total_supply: u64,
    bank: &'a BankParameters,
}

/// Run the params command.
pub fn run(config: &EwiConfig, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = config.scheduler()?;
    config.bank_model()?;
    let report = ParamsReport {
        emission: &config.emission,
        emission_horizon: scheduler.emission_horizon(),
        total_supply: scheduler.total_supply(),
        bank: &config.bank,
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => println!("{}", format_table(&rows(&report))),
    }
    Ok(())
}

fn rows(r: &ParamsReport<'_>) -> Vec<Field> {
    let e = r.emission;
    vec![
        field("Initial rate", format!("{} / block", Erg::from_nano(e.fixed_rate))),
        field("Fixed-rate period", format!("{} blocks", e.fixed_rate_period)),
        field("Reduction rate", format!("{} / epoch", Erg::from_nano(e.one_epoch_reduction))),
        field("Epoch length", format!("{} blocks", e.epoch_length)),
        field("Re-emission activation height", e.reemission_activation_height),
        field("Re-emission charge", format!("{} / block", Erg::from_nano(e.basic_charge_amount))),
        field("Terminal reward", format!("{} / block", Erg::from_nano(e.reemission_reward))),
        field("Emission horizon", r.emission_horizon),
        field("Total supply", Erg::from_nano(r.total_supply)),
        field("Min reserve ratio", format!("{} %", r.bank.min_reserve_ratio_pct)),
        field("Max reserve ratio", format!("{} %", r.bank.max_reserve_ratio_pct)),
        field("Protocol fee", format!("{} %", r.bank.fee * 100.0)),
    ]
}
