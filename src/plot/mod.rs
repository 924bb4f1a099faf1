//! Terminal plots.
//!
//! - generic fixed-grid renderer (`ascii`)
//! - ready-made diagrams for each command (`diagrams`)

pub mod ascii;
pub mod diagrams;

pub use ascii::*;
pub use diagrams::*;
