//! Single entry point pricing any [`Instrument`].
//!
//! Closed-form and lattice families return a plain value, simulated
//! families return their estimate with its confidence interval.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::instruments::Instrument;
use tracing::debug;

use crate::lattice::BinomialTree;
use crate::mc::{McEstimate, MonteCarloConfig};
use crate::path_dependent::{
    ArithmeticAsianPricer, ArithmeticBasketPricer, KikoEstimate, KikoPricer,
};

/// Result of [`price_instrument`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PriceOutcome {
    /// Deterministic present value
    Price {
        /// Present value
        price: f64,
    },
    /// Monte Carlo estimate
    Estimate(McEstimate),
    /// Quasi-Monte Carlo barrier estimate
    Kiko(KikoEstimate),
}

impl PriceOutcome {
    /// Point value regardless of the method.
    pub fn value(&self) -> f64 {
        match self {
            PriceOutcome::Price { price } => *price,
            PriceOutcome::Estimate(estimate) => estimate.price,
            PriceOutcome::Kiko(estimate) => estimate.price,
        }
    }

    /// 95% confidence interval for simulated values.
    pub fn confidence_interval(&self) -> Option<(f64, f64)> {
        match self {
            PriceOutcome::Price { .. } => None,
            PriceOutcome::Estimate(estimate) => Some(estimate.confidence_interval),
            PriceOutcome::Kiko(estimate) => Some((estimate.ci_low, estimate.ci_high)),
        }
    }
}

/// Prices `instrument`, using `config` for the simulated families.
///
/// The KIKO family scrambles its Sobol points with `config.seed()`.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{EuropeanOption, Instrument, InstrumentParams, OptionType};
/// use pricer_pricing::engine::price_instrument;
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let params = InstrumentParams::new(100.0, 0.05, 1.0, 100.0, 0.2).unwrap();
/// let option = EuropeanOption::new(params, 0.0, OptionType::Call).unwrap();
///
/// let outcome = price_instrument(&Instrument::European(option), &MonteCarloConfig::default())
///     .unwrap();
/// assert!((outcome.value() - 10.4506).abs() < 1e-4);
/// assert!(outcome.confidence_interval().is_none());
/// ```
///
/// # Errors
///
/// Whatever the family's pricer returns.
pub fn price_instrument(
    instrument: &Instrument,
    config: &MonteCarloConfig,
) -> Result<PriceOutcome, PricingError> {
    debug!(
        instrument = instrument.kind(),
        expiry = instrument.expiry(),
        simulated = instrument.is_simulated(),
        "pricing instrument"
    );

    let outcome = match instrument {
        Instrument::European(option) => PriceOutcome::Price {
            price: option.price()?,
        },
        Instrument::American(option) => PriceOutcome::Price {
            price: BinomialTree::new(option)?.price()?,
        },
        Instrument::GeometricAsian(option) => PriceOutcome::Price {
            price: option.price()?,
        },
        Instrument::GeometricBasket(option) => PriceOutcome::Price {
            price: option.price()?,
        },
        Instrument::ArithmeticAsian(option) => {
            PriceOutcome::Estimate(ArithmeticAsianPricer::new(*option, *config).price()?)
        }
        Instrument::ArithmeticBasket(option) => {
            PriceOutcome::Estimate(ArithmeticBasketPricer::new(option.clone(), *config).price()?)
        }
        Instrument::Kiko(option) => PriceOutcome::Kiko(
            KikoPricer::new(*option)
                .with_config(*config)
                .price(config.seed())?,
        ),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{
        AmericanOption, ArithmeticAsianOption, ArithmeticBasketOption, BasketParams,
        ControlVariate, GeometricAsianOption, GeometricBasketOption, InstrumentParams,
        KikoOption, OptionType,
    };

    fn params() -> InstrumentParams {
        InstrumentParams::new(100.0, 0.05, 3.0, 100.0, 0.3).unwrap()
    }

    fn basket() -> BasketParams {
        BasketParams::new(vec![100.0, 100.0], vec![0.3, 0.3], 0.5, 0.05, 3.0, 100.0).unwrap()
    }

    fn config() -> MonteCarloConfig {
        MonteCarloConfig::builder().seed(1).n_paths(4_096).build().unwrap()
    }

    #[test]
    fn test_closed_forms_dispatch() {
        let asian = GeometricAsianOption::new(params(), 50, OptionType::Call).unwrap();
        let outcome = price_instrument(&Instrument::GeometricAsian(asian), &config()).unwrap();
        assert_relative_eq!(outcome.value(), 13.259126, epsilon = 1e-5);

        let geo_basket = GeometricBasketOption::new(basket(), OptionType::Put);
        let outcome = price_instrument(&Instrument::GeometricBasket(geo_basket), &config()).unwrap();
        assert_relative_eq!(outcome.value(), 11.491573, epsilon = 1e-5);
    }

    #[test]
    fn test_lattice_dispatch() {
        let option = AmericanOption::new(params(), 200, OptionType::Put).unwrap();
        let outcome = price_instrument(&Instrument::American(option), &config()).unwrap();
        assert_eq!(outcome.value(), BinomialTree::new(&option).unwrap().price().unwrap());
    }

    #[test]
    fn test_simulated_dispatch_carries_interval() {
        let asian =
            ArithmeticAsianOption::new(params(), 50, 100_000, ControlVariate::Geometric, OptionType::Call)
                .unwrap();
        let basket_option =
            ArithmeticBasketOption::new(basket(), 10_000, ControlVariate::Geometric, OptionType::Call)
                .unwrap();
        let kiko = KikoOption::new(params(), 80.0, 125.0, 24, 1.5, 10_000).unwrap();

        for instrument in [
            Instrument::ArithmeticAsian(asian),
            Instrument::ArithmeticBasket(basket_option),
            Instrument::Kiko(kiko),
        ] {
            let outcome = price_instrument(&instrument, &config()).unwrap();
            let (low, high) = outcome.confidence_interval().unwrap();
            assert!(low <= outcome.value() && outcome.value() <= high);
        }

        match price_instrument(&Instrument::ArithmeticAsian(asian), &config()).unwrap() {
            PriceOutcome::Estimate(estimate) => assert_eq!(estimate.n_paths, 4_096),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_errors_propagate() {
        let flat = InstrumentParams::new(100.0, 0.05, 1.0, 100.0, 0.0).unwrap();
        let option = AmericanOption::new(flat, 10, OptionType::Put).unwrap();
        assert!(matches!(
            price_instrument(&Instrument::American(option), &config()),
            Err(PricingError::DegenerateInput(_))
        ));
    }
}
