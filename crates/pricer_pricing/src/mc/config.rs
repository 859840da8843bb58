//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders for Monte Carlo
//! pricing runs: seed, batching and parallel execution.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of paths per batch.
pub const MAX_BATCH_SIZE: usize = 1 << 20;

/// Default number of paths per batch.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// Paths are simulated in batches of `batch_size`. Batch `b` owns its own
/// random stream, so the estimate depends only on the seed and the batch
/// size, never on `parallel` or the number of threads.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .seed(42)
///     .batch_size(1024)
///     .parallel(false)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.seed(), 42);
/// assert_eq!(config.resolve_paths(10_000), 10_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Path count overriding the instrument's own, if set.
    n_paths: Option<usize>,
    /// Seed for reproducibility.
    seed: u64,
    /// Paths per batch.
    batch_size: usize,
    /// Run batches on the rayon pool.
    parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: None,
            seed: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the path count override, if any.
    #[inline]
    pub fn n_paths(&self) -> Option<usize> {
        self.n_paths
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of paths per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether batches run in parallel.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Copy of this configuration with a different seed.
    #[inline]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self { seed, ..*self }
    }

    /// Path count for an instrument that asks for `instrument_paths`.
    #[inline]
    pub fn resolve_paths(&self, instrument_paths: usize) -> usize {
        self.n_paths.unwrap_or(instrument_paths)
    }

    /// Number of batches covering `n_paths`.
    #[inline]
    pub fn batch_count(&self, n_paths: usize) -> usize {
        n_paths.div_ceil(self.batch_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is set to 0 or more than 10,000,000
    /// - `batch_size` is 0 or more than [`MAX_BATCH_SIZE`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(n_paths) = self.n_paths {
            check_paths(n_paths)?;
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

/// Validates a path count against `[1, MAX_PATHS]`.
pub fn check_paths(n_paths: usize) -> Result<(), ConfigError> {
    if n_paths == 0 || n_paths > MAX_PATHS {
        return Err(ConfigError::InvalidPathCount(n_paths));
    }
    Ok(())
}

/// Builder for [`MonteCarloConfig`].
///
/// Provides a fluent API for constructing Monte Carlo configurations
/// with validation at build time.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{ConfigError, MonteCarloConfig};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .seed(12345)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.resolve_paths(1_000), 50_000);
///
/// let err = MonteCarloConfig::builder().batch_size(0).build().unwrap_err();
/// assert_eq!(err, ConfigError::InvalidBatchSize(0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    batch_size: Option<usize>,
    parallel: Option<bool>,
}

impl MonteCarloConfigBuilder {
    /// Overrides the path count of every instrument priced with this config.
    ///
    /// # Arguments
    ///
    /// * `n_paths` - Number of paths in [1, 10_000_000]
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility (default 0).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of paths per batch (default 4096).
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Enables or disables parallel batch execution (default enabled).
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path count or batch size is out of range.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let defaults = MonteCarloConfig::default();
        let config = MonteCarloConfig {
            n_paths: self.n_paths,
            seed: self.seed.unwrap_or(defaults.seed),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            parallel: self.parallel.unwrap_or(defaults.parallel),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = MonteCarloConfig::builder().build().unwrap();

        assert_eq!(config.n_paths(), None);
        assert_eq!(config.seed(), 0);
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
        assert!(config.parallel());
        assert_eq!(config, MonteCarloConfig::default());
    }

    #[test]
    fn test_config_builder_with_seed() {
        let config = MonteCarloConfig::builder().seed(42).build().unwrap();
        assert_eq!(config.seed(), 42);
        assert_eq!(config.with_seed(7).seed(), 7);
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = MonteCarloConfig::builder().n_paths(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        let result = MonteCarloConfig::builder().n_paths(MAX_PATHS + 1).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(_))));
    }

    #[test]
    fn test_config_invalid_batch_size() {
        assert!(matches!(
            MonteCarloConfig::builder().batch_size(0).build(),
            Err(ConfigError::InvalidBatchSize(0))
        ));
        assert!(MonteCarloConfig::builder()
            .batch_size(MAX_BATCH_SIZE + 1)
            .build()
            .is_err());
    }

    #[test]
    fn test_resolve_paths_and_batch_count() {
        let config = MonteCarloConfig::builder().batch_size(1000).build().unwrap();
        assert_eq!(config.resolve_paths(2500), 2500);
        assert_eq!(config.batch_count(2500), 3);
        assert_eq!(config.batch_count(3000), 3);
        assert_eq!(config.batch_count(1), 1);
    }
}
