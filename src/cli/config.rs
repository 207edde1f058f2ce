//! TOML configuration file support for power users.
//!
//! Instead of passing CLI flags, settings can live in a config file:
//!
//! ```toml
//! # adcal.toml
//! [analysis]
//! quantity = "voltage"
//! plot_width = 1600
//! plot_height = 1200
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default chart dimensions in pixels.
pub const DEFAULT_PLOT_SIZE: (u32, u32) = (1600, 1200);

/// Root configuration structure for adcal.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Analysis-specific settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Configuration for the analyze command.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisConfig {
    /// Name of the calibrated quantity ("voltage", "temperature", ...).
    pub quantity: Option<String>,

    /// Analysis chart width in pixels.
    pub plot_width: Option<u32>,

    /// Analysis chart height in pixels.
    pub plot_height: Option<u32>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Chart dimensions, falling back to the defaults for missing fields.
    pub fn plot_size(&self) -> (u32, u32) {
        (
            self.analysis.plot_width.unwrap_or(DEFAULT_PLOT_SIZE.0),
            self.analysis.plot_height.unwrap_or(DEFAULT_PLOT_SIZE.1),
        )
    }
}
