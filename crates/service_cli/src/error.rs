//! Error types for the gbm-pricer CLI.

use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use pricer_pricing::mc::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid simulation parameters
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Invalid analytic pricing inputs
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Simulation or export failure
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Interactive input could not be read
    #[error("Input error: {0}")]
    Input(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error writing the report
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
