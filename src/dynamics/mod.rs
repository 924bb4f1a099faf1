//! Discrete dynamical systems.
//!
//! - logistic map sequences and attractor extraction (`logistic`)
//! - parameter sweeps over the growth rate (`bifurcation`)

pub mod bifurcation;
pub mod logistic;

pub use bifurcation::*;
pub use logistic::*;
