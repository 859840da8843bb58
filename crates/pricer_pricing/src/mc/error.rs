//! Error types for the Monte Carlo engine.
//!
//! This module defines the configuration errors raised when a simulation
//! or a quasi-random sequence is set up with invalid parameters.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for Monte Carlo pricers.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Batch size outside valid range [1, 1_048_576].
    #[error("Invalid batch size {0}: must be in range [1, 1_048_576]")]
    InvalidBatchSize(usize),

    /// Quasi-random dimension outside the supported range.
    #[error("Invalid sequence dimension {dimension}: must be in range [1, {max}]")]
    InvalidDimension {
        /// Requested dimension.
        dimension: usize,
        /// Largest supported dimension.
        max: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidParameter(err.to_string())
    }
}
