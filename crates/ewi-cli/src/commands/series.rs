// crates/ewi-cli/src/commands/series.rs
//
// `ewi series`: sampled emission curve for plotting.

use clap::Args;
use ewi_economics::{sample_series, SeriesPoint};
use tabled::Tabled;

use crate::config::EwiConfig;
use crate::output::{format_json, format_table, OutputFormat};

/// Arguments for the series command.
#[derive(Args, Debug)]
pub struct SeriesCmd {
    /// First height to sample.
    #[arg(long, default_value_t = 0)]
    pub from: u64,

    /// Last height to sample. Defaults to the emission horizon.
    #[arg(long)]
    pub to: Option<u64>,

    /// Blocks between samples. Defaults to one epoch.
    #[arg(long)]
    pub step: Option<u64>,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Height")]
    height: u64,
    #[tabled(rename = "Rate [ERG]")]
    rate: String,
    #[tabled(rename = "Miner [ERG]")]
    miner_reward: String,
    #[tabled(rename = "Circulating [M ERG]")]
    circulating: String,
    #[tabled(rename = "Re-emission [M ERG]")]
    reemission: String,
}

impl From<&SeriesPoint> for SeriesRow {
    fn from(p: &SeriesPoint) -> Self {
        Self {
            height: p.height,
            rate: format!("{}", p.rate),
            miner_reward: format!("{}", p.miner_reward),
            circulating: format!("{:.2}", p.circulating_supply / 1e6),
            reemission: format!("{:.2}", p.reemission_balance / 1e6),
        }
    }
}

/// Run the series command.
pub fn run(
    cmd: &SeriesCmd,
    config: &EwiConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = config.scheduler()?;
    let to = cmd.to.unwrap_or_else(|| scheduler.emission_horizon());
    let step = cmd.step.unwrap_or(scheduler.params().epoch_length);
    let points = sample_series(&scheduler, cmd.from, to, step)?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&points)),
        OutputFormat::Table => {
            let rows: Vec<SeriesRow> = points.iter().map(SeriesRow::from).collect();
            println!("{}", format_table(&rows));
        }
    }
    Ok(())
}
