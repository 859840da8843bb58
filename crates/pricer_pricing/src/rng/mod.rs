//! # Random Number Generation Infrastructure
//!
//! This module provides random number generation facilities for Monte Carlo
//! simulations: a seeded pseudo-random generator with per-batch streams and
//! a scrambled Sobol sequence for quasi-Monte Carlo.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators are seeded explicitly per call
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//! - **Independence**: Batch `b` always sees the same numbers, whichever
//!   thread runs it
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//! - [`qmc`]: Low-discrepancy sequence trait and Sobol implementation
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{LowDiscrepancySequence, PricerRng, SobolSequence};
//!
//! // Seeded PRNG stream for batch 3 of a run seeded with 12345
//! let mut rng = PricerRng::for_stream(12345, 3);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//!
//! // Scrambled Sobol points in 12 dimensions
//! let mut sobol = SobolSequence::scrambled(12, 12345).unwrap();
//! assert_eq!(sobol.next_point().len(), 12);
//! ```

pub mod prng;
pub mod qmc;

// Public re-exports
pub use prng::{splitmix64, PricerRng};
pub use qmc::{LowDiscrepancySequence, SobolSequence, MAX_DIMENSION};
