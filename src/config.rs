//! Configuration
//!
//! Run parameters, loadable from a TOML file.

use crate::core::errors::{ConfigError, SimulationError};
use crate::protocols::qkd::bb84::ensure_positive_slots;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of symbols transmitted per run.
    pub slots: usize,
    /// Whether an interceptor sits on the channel.
    pub interceptor: bool,
    /// Fixed seed for reproducible runs. `None` draws from the thread generator.
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            slots: 14,
            interceptor: true,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Checks run parameters. A zero slot count is
    /// [`SimulationError::InvalidConfiguration`], whichever way it was set.
    pub fn validate(&self) -> Result<(), SimulationError> {
        ensure_positive_slots(self.slots)
    }
}
