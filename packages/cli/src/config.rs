//! TOML configuration for the CLI.
//!
//! Both tables are optional. Anything left out of a user config keeps the
//! built-in default, so a config file only needs the overrides:
//!
//! ```toml
//! [columns]
//! name = ["title"]
//!
//! [pipeline]
//! scatter_limit = 250
//! ```

use std::path::Path;

use serde::Deserialize;
use track_charts_analytics_models::PipelineSettings;
use track_charts_normalize::mapping::ColumnMapping;

/// Errors that can occur while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`CliConfig`].
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Column mapping and pipeline tuning.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Dataset header names for each track field.
    pub columns: ColumnMapping,
    /// Aggregation constants.
    pub pipeline: PipelineSettings,
}

impl CliConfig {
    /// Parses a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the TOML is malformed or a field has
    /// the wrong type.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Loads the config at `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        log::debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}
