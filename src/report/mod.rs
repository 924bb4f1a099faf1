//! Formatted terminal output for every command.
//!
//! Formatting lives in one place so the numeric code stays free of presentation
//! and output changes are localized.

pub mod format;

pub use format::*;
