//! Price-index dataset summaries.
//!
//! Expected columns (any order, extra columns ignored):
//!
//! | column         | type         |
//! |----------------|--------------|
//! | `name`         | country name |
//! | `date`         | `YYYY-MM-DD` |
//! | `local_price`  | float        |
//! | `dollar_price` | float        |
//! | `adj_price`    | float, may be empty |

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::error::AppError;
use crate::math::{mean, median};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceRow {
    pub name: String,
    pub date: NaiveDate,
    pub local_price: f64,
    pub dollar_price: f64,
    #[serde(default)]
    pub adj_price: Option<f64>,
}

pub fn load_prices(path: &Path) -> Result<Vec<PriceRow>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    let rows = read_prices(file)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded price dataset");
    Ok(rows)
}

fn read_prices<R: std::io::Read>(reader: R) -> Result<Vec<PriceRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<PriceRow>().enumerate() {
        // +2: one header line, 1-based numbering.
        let line = idx + 2;
        let row = result.map_err(|e| AppError::new(3, format!("line {line}: {e}")))?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(AppError::new(3, "Price dataset has no rows."));
    }
    Ok(rows)
}

/// Number of distinct country names.
pub fn unique_countries(rows: &[PriceRow]) -> usize {
    rows.iter().map(|r| r.name.as_str()).collect::<HashSet<_>>().len()
}

/// Names attached to the `n` rows with the highest local price.
///
/// A country appearing in several of those rows is listed once, so the set can
/// be smaller than `n`. Rows with a NaN price never qualify.
pub fn top_local_price(rows: &[PriceRow], n: usize) -> BTreeSet<String> {
    let mut sorted: Vec<&PriceRow> = rows.iter().filter(|r| !r.local_price.is_nan()).collect();
    sorted.sort_by(|a, b| b.local_price.total_cmp(&a.local_price));
    sorted.into_iter().take(n).map(|r| r.name.clone()).collect()
}

/// Median dollar price over rows dated in the given month.
pub fn median_dollar_price(rows: &[PriceRow], year: i32, month: u32) -> Option<f64> {
    let prices: Vec<f64> = rows
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
        .map(|r| r.dollar_price)
        .collect();
    median(&prices)
}

/// Mean adjusted price for one country; rows without an adjusted price are skipped.
pub fn mean_adj_price(rows: &[PriceRow], country: &str) -> Option<f64> {
    let prices: Vec<f64> = rows
        .iter()
        .filter(|r| r.name == country)
        .filter_map(|r| r.adj_price)
        .collect();
    mean(&prices)
}

/// Everything the `prices` command reports.
#[derive(Debug, Clone)]
pub struct PriceSummary {
    pub rows: usize,
    pub countries: usize,
    pub top_local: BTreeSet<String>,
    pub median_month: (i32, u32),
    pub median_dollar: Option<f64>,
    pub country: Option<String>,
    pub mean_adj: Option<f64>,
}

pub fn summarize(
    rows: &[PriceRow],
    top_n: usize,
    year: i32,
    month: u32,
    country: Option<&str>,
) -> PriceSummary {
    PriceSummary {
        rows: rows.len(),
        countries: unique_countries(rows),
        top_local: top_local_price(rows, top_n),
        median_month: (year, month),
        median_dollar: median_dollar_price(rows, year, month),
        country: country.map(str::to_string),
        mean_adj: country.and_then(|c| mean_adj_price(rows, c)),
    }
}
