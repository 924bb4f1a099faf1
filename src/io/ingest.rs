//! Numeric file ingest.
//!
//! Two shapes are supported:
//!
//! - a flat list of numbers (`load_values`): commas, whitespace and newlines all
//!   separate values, `#` starts a comment
//! - a numeric table (`load_design`): every column but the last is a predictor,
//!   the last column is the response
//!
//! Errors carry the 1-based line number so bad rows are easy to find.

use std::fs::{self, File};
use std::path::Path;

use csv::StringRecord;
use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// A regression dataset split into predictors and response.
#[derive(Debug, Clone)]
pub struct DesignData {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    /// Predictor names when the file has a header row.
    pub predictors: Option<Vec<String>>,
    pub response: Option<String>,
}

impl DesignData {
    /// Label for predictor `j` (header name, else `x{j+1}`).
    pub fn predictor_label(&self, j: usize) -> String {
        self.predictors
            .as_ref()
            .and_then(|names| names.get(j).cloned())
            .unwrap_or_else(|| format!("x{}", j + 1))
    }
}

/// Read every number in a text/CSV file.
pub fn load_values(path: &Path) -> Result<Vec<f64>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
    let values = parse_values(&text)?;
    tracing::debug!(path = %path.display(), n = values.len(), "loaded values");
    Ok(values)
}

fn parse_values(text: &str) -> Result<Vec<f64>, AppError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("");
        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let token = token.trim_start_matches('\u{feff}');
            let v = token.parse::<f64>().map_err(|_| {
                AppError::new(3, format!("line {}: '{token}' is not a number", idx + 1))
            })?;
            out.push(v);
        }
    }
    Ok(out)
}

/// Read a numeric CSV table into `(X, y)`.
///
/// A first row with any non-numeric cell is treated as a header.
pub fn load_design(path: &Path) -> Result<DesignData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    let data = read_design(file)?;
    tracing::debug!(
        path = %path.display(),
        rows = data.x.nrows(),
        predictors = data.x.ncols(),
        "loaded design matrix"
    );
    Ok(data)
}

fn read_design<R: std::io::Read>(reader: R) -> Result<DesignData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width: Option<usize> = None;

    let mut first = true;

    for result in reader.records() {
        let record = result.map_err(|e| AppError::new(3, format!("CSV parse error: {e}")))?;
        // Comment lines are skipped by the reader, so count lines from its position.
        let line = record.position().map_or(0, |p| p.line());
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        if std::mem::take(&mut first) && !is_numeric_record(&record) {
            header = Some(record.iter().map(normalize_header_name).collect());
            width = Some(record.len());
            continue;
        }

        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            return Err(AppError::new(
                3,
                format!("line {line}: expected {expected} columns, found {}", record.len()),
            ));
        }

        let row = record
            .iter()
            .map(|cell| {
                cell.parse::<f64>()
                    .map_err(|_| AppError::new(3, format!("line {line}: '{cell}' is not a number")))
            })
            .collect::<Result<Vec<f64>, AppError>>()?;
        rows.push(row);
    }

    let Some(cols) = width else {
        return Err(AppError::new(3, "CSV contains no rows."));
    };
    if rows.is_empty() {
        return Err(AppError::new(3, "CSV contains a header but no data rows."));
    }
    if cols < 2 {
        return Err(AppError::new(
            3,
            "Need at least two columns (predictors followed by the response).",
        ));
    }

    let n = rows.len();
    let k = cols - 1;
    let x = DMatrix::from_fn(n, k, |i, j| rows[i][j]);
    let y = DVector::from_fn(n, |i, _| rows[i][k]);

    let (predictors, response) = match header {
        Some(mut names) => {
            let response = names.pop();
            (Some(names), response)
        }
        None => (None, None),
    };

    Ok(DesignData {
        x,
        y,
        predictors,
        response,
    })
}

fn is_numeric_record(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.parse::<f64>().is_ok())
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Strip it so labels print cleanly.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn values_accept_mixed_separators_and_comments() {
        let values = parse_values("# header comment\n1, 2 3\n4.5\t-6 # trailing\n\n").unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.5, -6.0]);
    }

    #[test]
    fn values_report_line_of_bad_token() {
        let err = parse_values("1 2\n3 abc\n").unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn load_values_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "300.5\n333.11").unwrap();
        let values = load_values(file.path()).unwrap();
        assert_eq!(values, vec![300.5, 333.11]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_values(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn design_with_header() {
        let csv = "gre,gpa,admit\n380,3.61,0\n660,3.67,1\n800,4.0,1\n";
        let data = read_design(csv.as_bytes()).unwrap();
        assert_eq!(data.x.nrows(), 3);
        assert_eq!(data.x.ncols(), 2);
        assert_eq!(data.x[(1, 0)], 660.0);
        assert_eq!(data.y[2], 1.0);
        assert_eq!(data.predictor_label(1), "gpa");
        assert_eq!(data.response.as_deref(), Some("admit"));
    }

    #[test]
    fn design_without_header_uses_generic_labels() {
        let data = read_design("1,2\n2,4\n3,6\n".as_bytes()).unwrap();
        assert_eq!(data.x.ncols(), 1);
        assert!(data.predictors.is_none());
        assert_eq!(data.predictor_label(0), "x1");
    }

    #[test]
    fn ragged_rows_are_rejected_with_line() {
        let err = read_design("a,b,c\n1,2,3\n4,5\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn errors_count_comment_lines() {
        let csv = "# admissions\n# gre,admit\nx,y\n1,2\n3,abc\n";
        let err = read_design(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 5"), "{err}");
    }

    #[test]
    fn header_after_blank_record_is_detected() {
        let data = read_design(",\ngre,admit\n1,0\n2,1\n3,1\n".as_bytes()).unwrap();
        assert_eq!(data.x.nrows(), 3);
        assert_eq!(data.predictor_label(0), "gre");
        assert_eq!(data.response.as_deref(), Some("admit"));
    }

    #[test]
    fn single_column_is_rejected() {
        assert!(read_design("1\n2\n3\n".as_bytes()).is_err());
        assert!(read_design("".as_bytes()).is_err());
        assert!(read_design("a,b\n".as_bytes()).is_err());
    }
}
