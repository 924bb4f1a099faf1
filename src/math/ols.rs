//! Ordinary least squares via the normal equations.
//!
//! Given a design matrix `X` (rows = observations, columns = predictors) and a
//! response `y`, we solve:
//!
//! ```text
//! minimize Σ (y_i - β0 - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - The intercept column of ones is prepended here; callers pass raw predictors.
//! - We form `XᵗX β = Xᵗy` and use an LU solve instead of an explicit inverse.
//! - Before solving we estimate the reciprocal condition number of `XᵗX` from its
//!   singular values. Collinear predictors rarely produce an exact zero pivot in
//!   floating point, so a zero-pivot check alone would accept garbage.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::error::{MathError, MathResult};

/// Systems with `σ_min / σ_max` below this are reported as singular.
const RCOND_MIN: f64 = 1e-12;

/// Estimation output with the diagnostics the reports need.
#[derive(Debug, Clone, Serialize)]
pub struct OlsFit {
    /// Intercept first, then one slope per predictor column.
    pub coefficients: Vec<f64>,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
    pub sse: f64,
    /// `None` when `y` is constant (total sum of squares is zero).
    pub r_squared: Option<f64>,
    pub n: usize,
    pub k: usize,
}

/// Prepend the intercept column of ones.
pub fn design_matrix(x: &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(x.nrows(), x.ncols() + 1, |i, j| {
        if j == 0 { 1.0 } else { x[(i, j - 1)] }
    })
}

/// Closed-form OLS coefficients `[intercept, slope_1, ..., slope_k]`.
pub fn estimate(x: &DMatrix<f64>, y: &DVector<f64>) -> MathResult<DVector<f64>> {
    let n = x.nrows();
    if n == 0 {
        return Err(MathError::dimension("at least one observation", "0 rows"));
    }
    if y.len() != n {
        return Err(MathError::dimension(
            format!("{n} response values"),
            format!("{} response values", y.len()),
        ));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::InvalidParameter(
            "design matrix and response must be finite".to_string(),
        ));
    }

    // With n <= k the rank of XᵗX is at most n < k + 1.
    if n < x.ncols() + 1 {
        return Err(MathError::SingularMatrix);
    }

    let design = design_matrix(x);
    let xt = design.transpose();
    let xtx = &xt * &design;
    let xty = &xt * y;

    if reciprocal_condition(&xtx) < RCOND_MIN {
        return Err(MathError::SingularMatrix);
    }

    let beta = xtx.lu().solve(&xty).ok_or(MathError::SingularMatrix)?;
    if beta.iter().all(|v| v.is_finite()) {
        Ok(beta)
    } else {
        Err(MathError::SingularMatrix)
    }
}

/// Fitted values `[1 | X] β`.
pub fn predict(x: &DMatrix<f64>, beta: &DVector<f64>) -> MathResult<DVector<f64>> {
    if beta.len() != x.ncols() + 1 {
        return Err(MathError::dimension(
            format!("{} coefficients", x.ncols() + 1),
            format!("{} coefficients", beta.len()),
        ));
    }
    Ok(design_matrix(x) * beta)
}

/// Estimate and compute residual diagnostics in one pass.
pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> MathResult<OlsFit> {
    let beta = estimate(x, y)?;
    let fitted = predict(x, &beta)?;
    let residuals = y - &fitted;
    let sse = residuals.norm_squared();

    let mean_y = y.mean();
    let sst: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let r_squared = (sst > 0.0).then(|| 1.0 - sse / sst);

    Ok(OlsFit {
        coefficients: beta.iter().copied().collect(),
        fitted: fitted.iter().copied().collect(),
        residuals: residuals.iter().copied().collect(),
        sse,
        r_squared,
        n: x.nrows(),
        k: x.ncols(),
    })
}

fn reciprocal_condition(m: &DMatrix<f64>) -> f64 {
    let sv = m.singular_values();
    let max = sv.max();
    let min = sv.min();
    if max > 0.0 && max.is_finite() {
        min / max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sse(x: &DMatrix<f64>, y: &DVector<f64>, beta: &DVector<f64>) -> f64 {
        (y - design_matrix(x) * beta).norm_squared()
    }

    #[test]
    fn exact_line_has_zero_intercept_and_slope_two() {
        let x = DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
        let y = DVector::from_row_slice(&[2.0, 4.0, 6.0]);

        let beta = estimate(&x, &y).unwrap();
        assert_eq!(beta.len(), 2);
        assert!(beta[0].abs() < 1e-10, "intercept {}", beta[0]);
        assert!((beta[1] - 2.0).abs() < 1e-10, "slope {}", beta[1]);
    }

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 1, &[0.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = estimate(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn two_predictors_recover_plane() {
        // y = 1 + 2 a - 0.5 b, no noise.
        let rows = [(0.0, 1.0), (1.0, 0.0), (2.0, 3.0), (3.0, 1.0), (4.0, 5.0)];
        let mut data = Vec::new();
        let mut ys = Vec::new();
        for (a, b) in rows {
            data.extend_from_slice(&[a, b]);
            ys.push(1.0 + 2.0 * a - 0.5 * b);
        }
        let x = DMatrix::from_row_slice(rows.len(), 2, &data);
        let y = DVector::from_vec(ys);

        let beta = estimate(&x, &y).unwrap();
        assert!((beta[0] - 1.0).abs() < 1e-9);
        assert!((beta[1] - 2.0).abs() < 1e-9);
        assert!((beta[2] + 0.5).abs() < 1e-9);
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let x = DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(matches!(
            estimate(&x, &y),
            Err(MathError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn empty_design_is_rejected() {
        let x = DMatrix::<f64>::zeros(0, 2);
        let y = DVector::<f64>::zeros(0);
        assert!(matches!(
            estimate(&x, &y),
            Err(MathError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn too_few_rows_is_singular() {
        // Two observations, two predictors: three unknowns.
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert_eq!(estimate(&x, &y), Err(MathError::SingularMatrix));
    }

    #[test]
    fn collinear_predictors_are_singular() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 2.5, 4.0]);
        assert_eq!(estimate(&x, &y), Err(MathError::SingularMatrix));
    }

    #[test]
    fn constant_predictor_collides_with_intercept() {
        let x = DMatrix::from_row_slice(3, 1, &[5.0, 5.0, 5.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(estimate(&x, &y), Err(MathError::SingularMatrix));
    }

    #[test]
    fn estimate_minimizes_squared_residuals() {
        let x = DMatrix::from_row_slice(6, 1, &[0.5, 1.0, 2.0, 2.5, 4.0, 6.0]);
        let y = DVector::from_row_slice(&[1.1, 1.9, 4.2, 4.8, 8.3, 11.7]);

        let beta = estimate(&x, &y).unwrap();
        let best = sse(&x, &y, &beta);

        for (d0, d1) in [(0.01, 0.0), (-0.01, 0.0), (0.0, 0.01), (0.0, -0.01), (0.05, -0.02)] {
            let perturbed = DVector::from_row_slice(&[beta[0] + d0, beta[1] + d1]);
            assert!(sse(&x, &y, &perturbed) > best);
        }
    }

    #[test]
    fn estimate_is_invariant_to_row_permutation() {
        let x = DMatrix::from_row_slice(5, 2, &[1.0, 3.0, 2.0, 1.0, 4.0, 4.0, 5.0, 2.0, 7.0, 9.0]);
        let y = DVector::from_row_slice(&[3.0, 2.5, 6.1, 4.0, 11.2]);
        let order = [3, 0, 4, 1, 2];

        let xp = DMatrix::from_fn(5, 2, |i, j| x[(order[i], j)]);
        let yp = DVector::from_fn(5, |i, _| y[order[i]]);

        let a = estimate(&x, &y).unwrap();
        let b = estimate(&xp, &yp).unwrap();
        for (u, v) in a.iter().zip(b.iter()) {
            assert!((u - v).abs() < 1e-9, "{u} vs {v}");
        }
    }

    #[test]
    fn fit_reports_residual_diagnostics() {
        let x = DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_row_slice(&[1.0, 3.0, 2.0, 4.0]);

        let out = fit(&x, &y).unwrap();
        assert_eq!(out.n, 4);
        assert_eq!(out.k, 1);
        assert_eq!(out.coefficients.len(), 2);
        // Residuals of an OLS fit with intercept sum to zero.
        let total: f64 = out.residuals.iter().sum();
        assert!(total.abs() < 1e-10);
        let r2 = out.r_squared.unwrap();
        assert!(r2 > 0.0 && r2 < 1.0);
        assert!((r2 - 0.64).abs() < 1e-10);
    }
}
