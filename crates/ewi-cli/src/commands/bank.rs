// crates/ewi-cli/src/commands/bank.rs
//
// `ewi bank`: prices, reserve figures, and mint/redeem capacity for a bank
// snapshot, given either as flags or as a bank-state JSON file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use ewi_core::units::from_nano;
use ewi_economics::{Bank, BankStateResponse, BankSummary, PegRate};

use crate::config::EwiConfig;
use crate::output::{amount, erg, field, format_json, format_table, Field, OutputFormat};

/// Arguments for the bank command.
#[derive(Args, Debug)]
pub struct BankCmd {
    /// Bank-state JSON file (`circ_sigusd`, `circ_sigrsv`, `reserves`, `peg_rate_nano`).
    #[arg(long, conflicts_with_all = ["sc", "rc", "reserves", "peg"])]
    pub state: Option<PathBuf>,

    /// Circulating stable-coin supply.
    #[arg(long, required_unless_present = "state", allow_negative_numbers = true)]
    pub sc: Option<f64>,

    /// Circulating reserve-coin supply.
    #[arg(long, required_unless_present = "state", allow_negative_numbers = true)]
    pub rc: Option<f64>,

    /// Base-asset reserve in nanoERG.
    #[arg(long, required_unless_present = "state", allow_negative_numbers = true)]
    pub reserves: Option<f64>,

    /// Peg rate in nanoERG per stable-coin unit. Omit if the oracle has no rate yet.
    #[arg(long, allow_negative_numbers = true)]
    pub peg: Option<f64>,
}

impl BankCmd {
    fn snapshot(&self) -> Result<(Bank, Option<PegRate>), Box<dyn std::error::Error>> {
        if let Some(path) = &self.state {
            let payload = fs::read_to_string(path)?;
            tracing::debug!(path = %path.display(), "loaded bank state");
            return Ok(BankStateResponse::from_json(&payload)?.into_snapshot()?);
        }
        let response = BankStateResponse {
            circ_sigusd: self.sc.unwrap_or_default(),
            circ_sigrsv: self.rc.unwrap_or_default(),
            reserves: self.reserves.unwrap_or_default(),
            peg_rate_nano: self.peg,
        };
        Ok(response.into_snapshot()?)
    }
}

/// Run the bank command.
pub fn run(
    cmd: &BankCmd,
    config: &EwiConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (bank, peg) = cmd.snapshot()?;
    let model = config.bank_model()?;

    let Some(summary) = model.summary(&bank, peg) else {
        tracing::warn!("Peg rate unavailable; no bank figures computed");
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Table => println!("Peg rate unavailable."),
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&summary)),
        OutputFormat::Table => println!("{}", format_table(&rows(&summary))),
    }
    Ok(())
}

fn per_erg(price_nano: f64) -> String {
    let price = from_nano(price_nano);
    if price == 0.0 {
        return "-".to_string();
    }
    format!("{:.2}", 1.0 / price)
}

fn rows(s: &BankSummary) -> Vec<Field> {
    vec![
        field("SC circulating", amount(s.bank.sc_circ())),
        field("SC price", erg(s.sc_rate, 2)),
        field("SC per ERG", per_erg(s.sc_rate)),
        field("SC mintable", amount(s.mintable_sc)),
        field("SC redeemable", amount(s.redeemable_sc)),
        field("RC circulating", amount(s.bank.rc_circ())),
        field("RC price", erg(s.rc_rate, 8)),
        field("RC per ERG", per_erg(s.rc_rate)),
        field("RC mintable", amount(s.mintable_rc)),
        field("RC redeemable", amount(s.redeemable_rc)),
        field("Reserve", erg(s.bank.base_reserves(), 2)),
        field("Liabilities", erg(s.liabilities, 2)),
        field("Equity", erg(s.equity, 2)),
        field("Ratio (RR)", s.reserve_ratio),
    ]
}
