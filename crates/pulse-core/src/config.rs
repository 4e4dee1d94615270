//! Engine configuration.
//!
//! Loaded from a TOML file when the consumer supplies one; every field
//! has a default so an absent or partial file still yields a working
//! config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub drift: DriftSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drift: DriftSettings::default(),
        }
    }
}

/// Tuning for the simulated-update generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSettings {
    /// Milliseconds between background ticks.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Maximum absolute workload perturbation per tick.
    #[serde(default = "default_workload_jitter")]
    pub workload_jitter: u8,
    /// Workload never drifts below this floor.
    #[serde(default = "default_workload_floor")]
    pub workload_floor: u8,
    /// Per-tick project progress perturbation, `lo..=hi`.
    #[serde(default = "default_project_jitter_lo")]
    pub project_jitter_lo: i8,
    #[serde(default = "default_project_jitter_hi")]
    pub project_jitter_hi: i8,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            workload_jitter: default_workload_jitter(),
            workload_floor: default_workload_floor(),
            project_jitter_lo: default_project_jitter_lo(),
            project_jitter_hi: default_project_jitter_hi(),
        }
    }
}

const fn default_interval_ms() -> u64 {
    3000
}

const fn default_workload_jitter() -> u8 {
    5
}

const fn default_workload_floor() -> u8 {
    20
}

const fn default_project_jitter_lo() -> i8 {
    -1
}

const fn default_project_jitter_hi() -> i8 {
    2
}

impl EngineConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// `ConfigParse` on malformed TOML; `InvalidInput` on out-of-range
    /// values.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| StoreError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// `ConfigParse` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StoreError::ConfigParse(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Validate ranges before use.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if any parameter is out of its valid range.
    pub fn validate(&self) -> Result<()> {
        let drift = &self.drift;
        if drift.interval_ms == 0 {
            return Err(StoreError::InvalidInput("drift.interval_ms must be > 0".to_owned()));
        }
        if drift.workload_floor > 100 {
            return Err(StoreError::InvalidInput(
                "drift.workload_floor must be within 0..=100".to_owned(),
            ));
        }
        if drift.project_jitter_lo > drift.project_jitter_hi {
            return Err(StoreError::InvalidInput(
                "drift.project_jitter_lo must not exceed project_jitter_hi".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml("").expect("parse");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.drift.interval_ms, 3000);
        assert_eq!(config.drift.workload_floor, 20);
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let config = EngineConfig::from_toml("[drift]\ninterval_ms = 5000\n").expect("parse");
        assert_eq!(config.drift.interval_ms, 5000);
        assert_eq!(config.drift.workload_jitter, 5);
    }

    #[test]
    fn malformed_toml_is_a_config_parse_error() {
        let err = EngineConfig::from_toml("[drift\n").expect_err("bad toml");
        assert_eq!(err.code(), "E1002");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = EngineConfig::from_toml("[drift]\ninterval_ms = 0\n").expect_err("invalid");
        assert_eq!(err.code(), "E4001");
    }

    #[test]
    fn inverted_jitter_band_is_rejected() {
        let toml = "[drift]\nproject_jitter_lo = 3\nproject_jitter_hi = 1\n";
        assert!(EngineConfig::from_toml(toml).is_err());
    }
}
