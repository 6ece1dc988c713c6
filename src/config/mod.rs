// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::Thresholds;
use crate::error::ThermostatError;
use crate::sensors::DEFAULT_SEED_DATA;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level
    pub log_level: String,

    /// Alert levels
    pub thresholds: ThresholdConfig,

    /// Temperature feed and cadence
    pub sampling: SamplingConfig,

    /// Operator prompts
    pub console: ConsoleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            thresholds: ThresholdConfig::default(),
            sampling: SamplingConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Check the configuration and build the validated thresholds
    pub fn validate(&self) -> Result<Thresholds, ThermostatError> {
        let thresholds = self.thresholds.build()?;
        match self.sampling.source {
            SourceKind::Seeded if self.sampling.seed_data.is_empty() => {
                return Err(ThermostatError::Config("seeded feed has no data".to_string()));
            }
            SourceKind::Simulated => self.sampling.simulated.validate()?,
            SourceKind::Seeded => {}
        }
        Ok(thresholds)
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("thermowatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Warning and emergency temperatures
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Warning level
    pub warning: f64,
    /// Emergency level
    pub emergency: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warning: 27.0,
            emergency: 75.0,
        }
    }
}

impl ThresholdConfig {
    /// Validated thresholds
    pub fn build(&self) -> Result<Thresholds, ThermostatError> {
        Thresholds::new(self.warning, self.emergency)
    }
}

/// Temperature feed selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Replay `seed_data`
    Seeded,
    /// Random walk from `simulated`
    Simulated,
}

/// Sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Pause between samples in milliseconds
    pub interval_ms: u64,

    /// Which feed to read
    pub source: SourceKind,

    /// Temperatures replayed by the seeded feed
    pub seed_data: Vec<f64>,

    /// Random-walk parameters
    pub simulated: SimulationConfig,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            source: SourceKind::Seeded,
            seed_data: DEFAULT_SEED_DATA.to_vec(),
            simulated: SimulationConfig::default(),
        }
    }
}

impl SamplingConfig {
    /// Pause between samples
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Random-walk simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// First temperature emitted
    pub start: f64,

    /// Standard deviation of each step
    pub step_std_dev: f64,

    /// Constant added per step
    pub drift: f64,

    /// Number of samples before the feed is exhausted
    pub samples: usize,

    /// Fixed RNG seed, entropy when absent
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Reject a negative or non-finite step deviation
    pub fn validate(&self) -> Result<(), ThermostatError> {
        if !(self.step_std_dev >= 0.0 && self.step_std_dev.is_finite()) {
            return Err(ThermostatError::Config(format!(
                "simulated step_std_dev must be finite and non-negative, got {}",
                self.step_std_dev
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: 20.0,
            step_std_dev: 2.0,
            drift: 1.5,
            samples: 60,
            seed: None,
        }
    }
}

/// Console prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Wait for the operator before starting
    pub confirm_start: bool,

    /// Wait for the operator before exiting
    pub confirm_exit: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            confirm_start: true,
            confirm_exit: true,
        }
    }
}
