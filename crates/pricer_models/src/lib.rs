//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts and their closed-form prices.
//!
//! This crate provides:
//! - Validated instrument definitions (European, American, Asian, basket, KIKO)
//! - Black-Scholes, geometric Asian and geometric basket closed forms
//! - Black-Scholes implied volatility
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch
//! - **Validate on construction**: every instrument is immutable and
//!   internally consistent once built
//! - Simulation and lattice pricers live in `pricer_pricing`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
