//! `econ-lab` library crate.
//!
//! The binary (`econ`) is a thin wrapper around this library so that:
//!
//! - numeric code is testable without spawning processes
//! - the estimators and maps are usable from other crates
//!
//! The core pieces are [`math::ols`] (least squares) and
//! [`dynamics::logistic`] (logistic-map iteration and attractor extraction).

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod dynamics;
pub mod economy;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod sim;
pub mod tui;
