//! # pricer_core: Numerical Foundation for the Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - The pricing error taxonomy shared by every layer (`types::error`)
//! - Root-finding solvers used by implied volatility inversion (`math::solvers`)
//! - The `Priceable` trait implemented by closed-form instruments (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//! use pricer_core::types::PricingError;
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
//! let root = solver.find_root(|x: f64| x * x - 4.0, |x: f64| 2.0 * x, 1.0).unwrap();
//! assert!((root - 2.0).abs() < 1e-9);
//!
//! let err = PricingError::InvalidParameter("spot must be positive".to_string());
//! assert!(err.to_string().contains("spot"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `SolverConfig` and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
