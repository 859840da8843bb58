//! CLI error types

use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Instrument terms were rejected
    #[error("Invalid instrument: {0}")]
    Instrument(#[from] InstrumentError),

    /// The pricer refused or failed
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// JSON output could not be produced
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
