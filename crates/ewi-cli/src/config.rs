// crates/ewi-cli/src/config.rs
//
// Runtime configuration for the EWI CLI.
// Loaded from a TOML file or populated with the mainnet defaults.

use ewi_core::error::EwiError;
use ewi_economics::{BankModel, BankParameters, EmissionParameters, EmissionScheduler};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::output::OutputFormat;

/// Errors raised while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EwiConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default output format when `--format` is not given.
    #[serde(default)]
    pub output: OutputFormat,

    /// Emission schedule parameters. Missing keys keep mainnet values.
    #[serde(default)]
    pub emission: EmissionParameters,

    /// Reserve bank parameters. Missing keys keep mainnet values.
    #[serde(default)]
    pub bank: BankParameters,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EwiConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: OutputFormat::default(),
            emission: EmissionParameters::default(),
            bank: BankParameters::default(),
        }
    }
}

impl EwiConfig {
    /// `~/.ewi/config.toml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".ewi").join("config.toml"))
    }

    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Scheduler for the configured emission parameters.
    pub fn scheduler(&self) -> Result<EmissionScheduler, EwiError> {
        EmissionScheduler::new(self.emission)
    }

    /// Bank model for the configured bank parameters.
    pub fn bank_model(&self) -> Result<BankModel, EwiError> {
        BankModel::new(self.bank)
    }
}
