//! Monte Carlo simulations.

pub mod basketball;

pub use basketball::*;
