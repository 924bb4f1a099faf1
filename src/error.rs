//! Error types.
//!
//! Two layers:
//!
//! - [`MathError`] is returned by the pure numeric code (estimators, maps,
//!   economic models). It carries structured data and never an exit code.
//! - [`AppError`] is what the binary sees: a message plus the process exit code.
//!
//! Exit codes: `2` I/O or usage, `3` invalid input, `4` numerical/runtime failure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    #[error("normal-equations matrix is singular (collinear predictors or too few observations)")]
    SingularMatrix,

    #[error("iteration count {n} must exceed the transient cutoff of {cutoff}")]
    InvalidIterationCount { n: usize, cutoff: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl MathError {
    pub fn dimension(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<MathError> for AppError {
    fn from(err: MathError) -> Self {
        let code = match err {
            MathError::SingularMatrix => 4,
            MathError::DimensionMismatch { .. }
            | MathError::InvalidIterationCount { .. }
            | MathError::InvalidParameter(_) => 3,
        };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_errors_map_to_exit_codes() {
        let singular: AppError = MathError::SingularMatrix.into();
        assert_eq!(singular.exit_code(), 4);

        let count: AppError = MathError::InvalidIterationCount { n: 100, cutoff: 200 }.into();
        assert_eq!(count.exit_code(), 3);
        assert_eq!(
            count.to_string(),
            "iteration count 100 must exceed the transient cutoff of 200"
        );
    }
}
