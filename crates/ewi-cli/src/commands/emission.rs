// crates/ewi-cli/src/commands/emission.rs
//
// `ewi emission`: emission state and epoch progress at a block height.

use clap::Args;
use ewi_core::units::Erg;
use ewi_core::validate::validate_height;
use ewi_economics::{EmissionState, EpochProgress};
use serde::Serialize;

use crate::config::EwiConfig;
use crate::output::{field, format_json, format_table, Field, OutputFormat};

/// Arguments for the emission command.
#[derive(Args, Debug)]
pub struct EmissionCmd {
    /// Block height to evaluate.
    #[arg(long, allow_negative_numbers = true)]
    pub height: i64,
}

#[derive(Debug, Serialize)]
struct EmissionReport {
    state: EmissionState,
    progress: EpochProgress,
    total_supply: u64,
}

/// Run the emission command.
pub fn run(
    cmd: &EmissionCmd,
    config: &EwiConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let height = validate_height(cmd.height)?;
    let scheduler = config.scheduler()?;
    let report = EmissionReport {
        state: scheduler.emission_at(height),
        progress: scheduler.epoch_progress(height),
        total_supply: scheduler.total_supply(),
    };
    tracing::debug!(height, epoch = report.state.epoch, "computed emission state");

    match format {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => println!("{}", format_table(&rows(&report))),
    }
    Ok(())
}

fn rows(report: &EmissionReport) -> Vec<Field> {
    let s = &report.state;
    let circulating_pct = if report.total_supply == 0 {
        0.0
    } else {
        s.circulating_supply as f64 / report.total_supply as f64 * 100.0
    };
    vec![
        field("Height", s.height),
        field("Epoch", s.epoch),
        field("Original emission rate", format!("{} / block", Erg::from_nano(s.rate))),
        field("Current block reward", format!("{} / block", Erg::from_nano(s.miner_reward))),
        field(
            "Reserved for re-emission",
            format!("{} / block", Erg::from_nano(s.reemission_rate)),
        ),
        field("Blocks remaining", report.progress.blocks_remaining),
        field("Time remaining", report.progress.time_remaining),
        field("Next epoch at", report.progress.next_epoch_height),
        field("Total supply", Erg::from_nano(report.total_supply)),
        field("Circulating", Erg::from_nano(s.circulating_supply)),
        field("Circulating %", format!("{:.2} %", circulating_pct)),
        field("Re-emission received", Erg::from_nano(s.reemission_supply)),
        field("Re-emission balance", Erg::from_nano(s.reemission_balance)),
    ]
}
