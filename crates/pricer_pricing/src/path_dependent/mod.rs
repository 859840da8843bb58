//! Path-dependent option pricers.
//!
//! # Key Components
//!
//! - [`ArithmeticAsianPricer`]: Average-price options, PRNG paths, geometric control
//! - [`ArithmeticBasketPricer`]: Multi-asset basket options, correlated terminal draws
//! - [`KikoPricer`]: Knock-in/knock-out barrier options on scrambled Sobol points
//!
//! # Design Philosophy
//!
//! - **Batched streams**: every pricer runs through [`run_batches`](crate::mc::run_batches),
//!   so parallel and sequential runs agree bit for bit
//! - **Static dispatch**: one concrete pricer per instrument family

mod asian;
mod basket;
mod kiko;

pub use asian::ArithmeticAsianPricer;
pub use basket::ArithmeticBasketPricer;
pub use kiko::{KikoEstimate, KikoPricer, MAX_RELATIVE_BUMP, MIN_BUMP, RELATIVE_BUMP};
