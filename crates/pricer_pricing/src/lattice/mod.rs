//! Lattice pricers for early-exercise options.

mod binomial;

pub use binomial::BinomialTree;
