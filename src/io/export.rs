//! Export computed series to CSV and fits to JSON.
//!
//! The CSV exports are meant to be easy to consume in spreadsheets or
//! downstream scripts. Floats are written with full precision.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dynamics::BifurcationPoint;
use crate::error::AppError;
use crate::math::OlsFit;

/// Write a logistic sequence as `step,x`.
pub fn write_sequence_csv(path: &Path, sequence: &[f64]) -> Result<(), AppError> {
    let mut out = create(path, "sequence CSV")?;

    writeln!(out, "step,x")
        .map_err(|e| AppError::new(2, format!("Failed to write sequence CSV header: {e}")))?;
    for (step, x) in sequence.iter().enumerate() {
        writeln!(out, "{step},{x}")
            .map_err(|e| AppError::new(2, format!("Failed to write sequence CSV row: {e}")))?;
    }
    finish(out, path)
}

/// Write a bifurcation sweep in long format: one `r,value` row per stable value.
pub fn write_bifurcation_csv(path: &Path, points: &[BifurcationPoint]) -> Result<(), AppError> {
    let mut out = create(path, "bifurcation CSV")?;

    writeln!(out, "r,value")
        .map_err(|e| AppError::new(2, format!("Failed to write bifurcation CSV header: {e}")))?;
    for p in points {
        for v in &p.values {
            writeln!(out, "{},{}", p.r, v)
                .map_err(|e| AppError::new(2, format!("Failed to write bifurcation CSV row: {e}")))?;
        }
    }
    finish(out, path)
}

/// Write an OLS fit (coefficients + diagnostics) as pretty JSON.
pub fn write_fit_json(path: &Path, fit: &OlsFit) -> Result<(), AppError> {
    let out = create(path, "fit JSON")?;
    serde_json::to_writer_pretty(out, fit)
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;
    tracing::info!(path = %path.display(), "wrote fit JSON");
    Ok(())
}

fn create(path: &Path, what: &str) -> Result<BufWriter<File>, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create {what} '{}': {e}", path.display())))?;
    Ok(BufWriter::new(file))
}

fn finish(mut out: BufWriter<File>, path: &Path) -> Result<(), AppError> {
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote export");
    Ok(())
}
