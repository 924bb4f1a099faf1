//! Tabular datasets.

pub mod prices;

pub use prices::*;
