//! Monte Carlo simulation engine.
//!
//! This module provides the simulation infrastructure shared by the
//! path-dependent pricers:
//!
//! - GBM path generation in log space and correlated multi-asset draws
//! - Batched execution with deterministic per-batch random streams
//! - Streaming moment accumulation with an optional control variate
//!
//! # Architecture
//!
//! ```text
//! MonteCarloConfig       (seed, batch size, parallel flag)
//! run_batches()
//! ├── BatchSpec          (index, first path, length)
//! ├── PricerRng          (stream = batch index)
//! └── PairAccumulator    (per batch, merged in batch order)
//!     ├── plain_estimate()
//!     └── control_variate_estimate(E[Y])
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{run_batches, MonteCarloConfig, PairAccumulator};
//! use pricer_pricing::rng::PricerRng;
//!
//! let config = MonteCarloConfig::builder().seed(42).build().unwrap();
//!
//! // E[exp(Z)] = exp(1/2) with Z itself as the control, E[Z] = 0
//! let acc = run_batches(&config, 100_000, |batch| {
//!     let mut rng = PricerRng::for_stream(config.seed(), batch.index);
//!     let mut acc = PairAccumulator::new();
//!     for _ in 0..batch.len {
//!         let z = rng.gen_normal();
//!         acc.push(z.exp(), z);
//!     }
//!     acc
//! });
//!
//! let estimate = acc.control_variate_estimate(0.0);
//! assert!((estimate.price - 0.5_f64.exp()).abs() < 5.0 * estimate.std_error);
//! assert!(estimate.std_error < acc.plain_estimate().std_error);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod paths;
pub mod runner;

// Re-exports for convenient access
pub use config::{
    check_paths, MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE,
    MAX_PATHS,
};
pub use error::ConfigError;
pub use estimator::{McEstimate, PairAccumulator, Z_95};
pub use paths::{fill_gbm_path, fill_terminal_prices, CorrelationFactor, GbmParams};
pub use runner::{run_batches, BatchSpec};
