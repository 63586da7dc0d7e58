use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Sequences produced by the parties are not index-aligned.
    /// Unreachable when the pipeline is built correctly.
    #[error("Internal invariant violated in {stage}: expected {expected}, got {got}")]
    InternalInvariantViolation {
        stage: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
