//! Financial instrument definitions.
//!
//! This module provides the validated, immutable contract terms consumed by
//! the pricers, with enum dispatch over instrument families.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects) for static dispatch:
//! - `Instrument` enum wraps all instrument types
//! - Every constructor validates its inputs and returns `InstrumentError`
//!
//! # Instrument Types
//!
//! - [`EuropeanOption`]: Black-Scholes with repo yield
//! - [`AmericanOption`]: Early exercise on a binomial lattice
//! - [`GeometricAsianOption`], [`ArithmeticAsianOption`]: Discrete averaging
//! - [`GeometricBasketOption`], [`ArithmeticBasketOption`]: Multi-asset baskets
//! - [`KikoOption`]: Knock-in/knock-out barrier with rebate
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{
//!     EuropeanOption, Instrument, InstrumentParams, OptionType,
//! };
//!
//! let params = InstrumentParams::new(100.0, 0.05, 1.0, 100.0, 0.2).unwrap();
//! let call = EuropeanOption::new(params, 0.0, OptionType::Call).unwrap();
//! let instrument = Instrument::European(call);
//!
//! assert_eq!(instrument.kind(), "european");
//! assert_eq!(instrument.expiry(), 1.0);
//! ```

mod american;
mod asian;
mod basket;
mod error;
mod european;
mod kiko;
mod params;
mod payoff;

// Re-export all public types
pub use american::AmericanOption;
pub use asian::{ArithmeticAsianOption, GeometricAsianOption};
pub use basket::{ArithmeticBasketOption, BasketParams, GeometricBasketOption};
pub use error::InstrumentError;
pub use european::EuropeanOption;
pub use kiko::KikoOption;
pub use params::{ControlVariate, InstrumentParams};
pub use payoff::OptionType;

/// Unified instrument enum for static dispatch.
///
/// # Variants
/// - `European`: Closed-form Black-Scholes
/// - `American`: Binomial lattice
/// - `GeometricAsian` / `ArithmeticAsian`: Discretely averaged
/// - `GeometricBasket` / `ArithmeticBasket`: Multi-asset
/// - `Kiko`: Barrier with rebate
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    /// European option
    European(EuropeanOption),
    /// American option
    American(AmericanOption),
    /// Geometric-average Asian option
    GeometricAsian(GeometricAsianOption),
    /// Arithmetic-average Asian option
    ArithmeticAsian(ArithmeticAsianOption),
    /// Geometric-mean basket option
    GeometricBasket(GeometricBasketOption),
    /// Arithmetic-mean basket option
    ArithmeticBasket(ArithmeticBasketOption),
    /// Knock-in/knock-out barrier option
    Kiko(KikoOption),
}

impl Instrument {
    /// Short lowercase name of the instrument family.
    pub fn kind(&self) -> &'static str {
        match self {
            Instrument::European(_) => "european",
            Instrument::American(_) => "american",
            Instrument::GeometricAsian(_) => "geometric_asian",
            Instrument::ArithmeticAsian(_) => "arithmetic_asian",
            Instrument::GeometricBasket(_) => "geometric_basket",
            Instrument::ArithmeticBasket(_) => "arithmetic_basket",
            Instrument::Kiko(_) => "kiko",
        }
    }

    /// Time to expiry in years.
    pub fn expiry(&self) -> f64 {
        match self {
            Instrument::European(o) => o.params().expiry(),
            Instrument::American(o) => o.params().expiry(),
            Instrument::GeometricAsian(o) => o.params().expiry(),
            Instrument::ArithmeticAsian(o) => o.params().expiry(),
            Instrument::GeometricBasket(o) => o.basket().expiry(),
            Instrument::ArithmeticBasket(o) => o.basket().expiry(),
            Instrument::Kiko(o) => o.params().expiry(),
        }
    }

    /// Whether the family is priced by simulation.
    pub fn is_simulated(&self) -> bool {
        matches!(
            self,
            Instrument::ArithmeticAsian(_) | Instrument::ArithmeticBasket(_) | Instrument::Kiko(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_expiry_and_kind() {
        let params = InstrumentParams::new(100.0, 0.05, 2.5, 100.0, 0.2).unwrap();
        let basket =
            BasketParams::new(vec![100.0, 90.0], vec![0.2, 0.3], 0.4, 0.05, 1.5, 95.0).unwrap();

        let instruments = [
            Instrument::American(AmericanOption::new(params, 100, OptionType::Put).unwrap()),
            Instrument::GeometricBasket(GeometricBasketOption::new(basket, OptionType::Call)),
            Instrument::Kiko(KikoOption::new(params, 80.0, 120.0, 12, 1.0, 1000).unwrap()),
        ];

        assert_eq!(instruments[0].kind(), "american");
        assert_eq!(instruments[0].expiry(), 2.5);
        assert!(!instruments[0].is_simulated());

        assert_eq!(instruments[1].expiry(), 1.5);
        assert!(!instruments[1].is_simulated());

        assert_eq!(instruments[2].kind(), "kiko");
        assert!(instruments[2].is_simulated());
    }
}
