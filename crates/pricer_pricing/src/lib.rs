//! # Pricer Engine (Layer 3: Numerical Methods)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing holds every pricing method that is not a closed form:
//! - Binomial lattice for American exercise (`lattice`)
//! - Monte Carlo infrastructure with control variates (`mc`)
//! - Pseudo-random and Sobol quasi-random generators (`rng`)
//! - Path-dependent pricers for Asian, basket and KIKO options (`path_dependent`)
//! - A single dispatch over the `Instrument` enum (`engine`)
//!
//! ## Determinism
//!
//! A run is fully determined by its seed and parameters. Paths are cut
//! into fixed-size batches, each batch draws from its own derived stream
//! (or its own range of Sobol indices), and batch results are merged in
//! batch order. Parallel and sequential execution give identical bits.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{
//!     ArithmeticAsianOption, ControlVariate, Instrument, InstrumentParams, OptionType,
//! };
//! use pricer_pricing::engine::{price_instrument, PriceOutcome};
//! use pricer_pricing::mc::MonteCarloConfig;
//!
//! let params = InstrumentParams::new(100.0, 0.05, 3.0, 100.0, 0.3).unwrap();
//! let option = ArithmeticAsianOption::new(
//!     params, 50, 20_000, ControlVariate::Geometric, OptionType::Call,
//! ).unwrap();
//!
//! let config = MonteCarloConfig::builder().seed(0).build().unwrap();
//! let first = price_instrument(&Instrument::ArithmeticAsian(option), &config).unwrap();
//! let again = price_instrument(&Instrument::ArithmeticAsian(option), &config).unwrap();
//! assert_eq!(first, again);
//! assert!(matches!(first, PriceOutcome::Estimate(_)));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for estimates and price outcomes

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod lattice;
pub mod mc;
pub mod path_dependent;
pub mod rng;
