//! Input/output helpers.
//!
//! - numeric file ingest (`ingest`)
//! - CSV/JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
