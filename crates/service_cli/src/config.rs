//! CLI configuration management
//!
//! Handles loading configuration from a TOML file with environment variable
//! overrides.
//!
//! ```toml
//! [monte_carlo]
//! paths = 100000
//! batch_size = 4096
//! seed = 0
//! parallel = true
//!
//! [solver]
//! tolerance = 1e-6
//! max_iterations = 100
//!
//! [kiko]
//! delta_bump = 1.0
//! ```
//!
//! Priority (highest to lowest):
//! 1. Command-line flags (`--paths`, `--seed`, `--bump`)
//! 2. Environment variables (`PRICER_MC_*`)
//! 3. Config file
//! 4. Default values

use std::path::Path;

use pricer_core::math::solvers::SolverConfig;
use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE, MAX_PATHS};
use serde::Deserialize;
use thiserror::Error;

/// Path count override
pub const ENV_PATHS: &str = "PRICER_MC_PATHS";
/// Seed override
pub const ENV_SEED: &str = "PRICER_MC_SEED";
/// Batch size override
pub const ENV_BATCH_SIZE: &str = "PRICER_MC_BATCH_SIZE";
/// Parallel flag override
pub const ENV_PARALLEL: &str = "PRICER_MC_PARALLEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`CliConfig`]
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment variable holds an unusable value
    #[error("Environment variable {name}={value} is invalid")]
    Env {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// One or more settings are out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// `[monte_carlo]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonteCarloSection {
    /// Paths for the simulated instruments
    pub paths: usize,
    /// Paths per batch
    pub batch_size: usize,
    /// Random seed
    pub seed: u64,
    /// Run batches on the rayon pool
    pub parallel: bool,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            paths: 100_000,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: 0,
            parallel: true,
        }
    }
}

/// `[solver]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSection {
    /// Newton tolerance on the premium error
    pub tolerance: f64,
    /// Newton iteration budget
    pub max_iterations: usize,
}

impl Default for SolverSection {
    fn default() -> Self {
        let config = SolverConfig::<f64>::implied_volatility();
        Self {
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        }
    }
}

/// `[kiko]` section
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KikoSection {
    /// Absolute spot bump for delta, `max(0.01·S₀, 0.01)` when unset
    pub delta_bump: Option<f64>,
}

/// CLI configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Monte Carlo settings
    pub monte_carlo: MonteCarloSection,
    /// Implied volatility solver settings
    pub solver: SolverSection,
    /// KIKO settings
    pub kiko: KikoSection,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build from an optional file, process environment and validation
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = config.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PRICER_MC_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides looked up through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(paths) = parse_var(&lookup, ENV_PATHS)? {
            self.monte_carlo.paths = paths;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            self.monte_carlo.seed = seed;
        }
        if let Some(batch_size) = parse_var(&lookup, ENV_BATCH_SIZE)? {
            self.monte_carlo.batch_size = batch_size;
        }
        if let Some(parallel) = lookup(ENV_PARALLEL) {
            self.monte_carlo.parallel = match parallel.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Env {
                        name: ENV_PARALLEL,
                        value: parallel,
                    })
                }
            };
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let mc = &self.monte_carlo;
        if mc.paths == 0 || mc.paths > MAX_PATHS {
            errors.push(format!(
                "monte_carlo.paths must be in [1, {}], got {}",
                MAX_PATHS, mc.paths
            ));
        }
        if mc.batch_size == 0 || mc.batch_size > MAX_BATCH_SIZE {
            errors.push(format!(
                "monte_carlo.batch_size must be in [1, {}], got {}",
                MAX_BATCH_SIZE, mc.batch_size
            ));
        }

        if SolverConfig::try_new(self.solver.tolerance, self.solver.max_iterations).is_none() {
            errors.push(format!(
                "solver needs a positive tolerance and iteration budget, got {} / {}",
                self.solver.tolerance, self.solver.max_iterations
            ));
        }

        if let Some(bump) = self.kiko.delta_bump {
            if !(bump > 0.0 && bump.is_finite()) {
                errors.push(format!("kiko.delta_bump must be positive, got {}", bump));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Engine configuration with an optional seed override
    pub fn monte_carlo_config(&self, seed: Option<u64>) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .seed(seed.unwrap_or(self.monte_carlo.seed))
            .batch_size(self.monte_carlo.batch_size)
            .parallel(self.monte_carlo.parallel)
            .build()
            .map_err(|e| ConfigError::Validation(vec![e.to_string()]))
    }

    /// Implied volatility solver settings
    pub fn solver_config(&self) -> Result<SolverConfig<f64>, ConfigError> {
        SolverConfig::try_new(self.solver.tolerance, self.solver.max_iterations).ok_or_else(|| {
            ConfigError::Validation(vec!["solver settings out of range".to_string()])
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { name, value }),
        None => Ok(None),
    }
}
