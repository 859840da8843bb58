//! Numerical building blocks.
//!
//! - `solvers`: Newton-Raphson root finding with configurable tolerance

pub mod solvers;
