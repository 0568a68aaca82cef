//! TOML configuration for `ev-tco`.
//!
//! Every table is optional:
//!
//! ```toml
//! [defaults]
//! ownership_years = 8
//! purchase_price = 3500000
//!
//! [display]
//! currency_symbol = "$"
//! format = "json"
//!
//! [limits]
//! enforce = true
//! ownership_years = { min = 1, max = 20 }
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::form::{InputLimits, InputOverrides};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Metrics, share chart and detailed breakdown for reading.
    #[default]
    Text,
    /// The input and the breakdown as a JSON object.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub distance_unit: String,
    pub format: OutputFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            distance_unit: "km".to_string(),
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: InputOverrides,
    pub display: DisplayConfig,
    pub limits: InputLimits,
}

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, otherwise returns the built-in configuration.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
