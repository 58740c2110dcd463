// crates/ewi-cli/src/output.rs
//
// Output formatting utilities for the EWI CLI.
// Supports table and JSON output modes.

use clap::ValueEnum;
use ewi_core::units::from_nano;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    #[default]
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// One labelled figure in a key/value table.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct Field {
    #[tabled(rename = "Field")]
    pub name: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub fn field(name: &str, value: impl ToString) -> Field {
    Field {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// nanoERG rendered as ERG with a fixed number of decimals.
pub fn erg(nano: f64, decimals: usize) -> String {
    format!("{:.*} ERG", decimals, from_nano(nano))
}

/// A quantity with two decimals, or "unlimited" when unbounded.
pub fn amount(value: f64) -> String {
    if value.is_infinite() {
        "unlimited".to_string()
    } else {
        format!("{:.2}", value)
    }
}
