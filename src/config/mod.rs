//! Engine tunables

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration.
///
/// The cooldown after a swap scales with the number of tabs involved:
/// `total_tabs * unit_delay_ms + base_delay_ms`. The multiplier is a
/// tunable, not a contract; only the scaling matters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL of the host's blank page; always capturable and used for the
    /// placeholder tab.
    pub blank_url: String,
    /// URL prefix of the host's internal pages, excluded from capture.
    pub internal_scheme: String,
    /// Cooldown milliseconds added per tab involved in a swap.
    pub unit_delay_ms: u64,
    /// Cooldown milliseconds added to every swap.
    pub base_delay_ms: u64,
    /// Seconds between autosave ticks.
    pub autosave_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blank_url: "about:blank".into(),
            internal_scheme: "about:".into(),
            unit_delay_ms: 330,
            base_delay_ms: 1_000,
            autosave_interval_secs: 300,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Cooldown for a swap touching `total_tabs` tabs (closed + created).
    pub fn cooldown_for(&self, total_tabs: usize) -> Duration {
        Duration::from_millis(total_tabs as u64 * self.unit_delay_ms + self.base_delay_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}
