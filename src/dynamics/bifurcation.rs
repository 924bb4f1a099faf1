//! Growth-rate sweeps for the logistic map.
//!
//! Each `r` on the grid is independent, so the sweep is evaluated in parallel
//! with rayon. Output order follows the grid regardless of scheduling.

use rayon::prelude::*;
use serde::Serialize;

use crate::dynamics::logistic::{StableOptions, stable_values_with};
use crate::error::{MathError, MathResult};

/// Attractor sample for one growth rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BifurcationPoint {
    pub r: f64,
    pub values: Vec<f64>,
}

/// Evenly spaced `r` grid over `[r_min, r_max]` (inclusive).
pub fn r_grid(r_min: f64, r_max: f64, steps: usize) -> MathResult<Vec<f64>> {
    if !(r_min.is_finite() && r_max.is_finite()) || r_max < r_min {
        return Err(MathError::InvalidParameter(format!(
            "invalid growth-rate range [{r_min}, {r_max}]"
        )));
    }
    if steps == 0 {
        return Err(MathError::InvalidParameter("sweep needs at least one step".to_string()));
    }
    if steps == 1 {
        return Ok(vec![r_min]);
    }
    Ok((0..steps)
        .map(|i| {
            let u = i as f64 / (steps as f64 - 1.0);
            r_min + u * (r_max - r_min)
        })
        .collect())
}

/// Stable values for every `r` on the grid.
pub fn bifurcation(
    r_min: f64,
    r_max: f64,
    steps: usize,
    x0: f64,
    n: usize,
    opts: &StableOptions,
) -> MathResult<Vec<BifurcationPoint>> {
    let grid = r_grid(r_min, r_max, steps)?;
    grid.into_par_iter()
        .map(|r| {
            stable_values_with(r, x0, n, opts).map(|values| BifurcationPoint { r, values })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_inclusive_and_ordered() {
        let grid = r_grid(2.0, 4.0, 5).unwrap();
        assert_eq!(grid, vec![2.0, 2.5, 3.0, 3.5, 4.0]);
        assert_eq!(r_grid(3.0, 3.0, 1).unwrap(), vec![3.0]);
    }

    #[test]
    fn grid_rejects_bad_ranges() {
        assert!(r_grid(4.0, 2.0, 10).is_err());
        assert!(r_grid(2.0, f64::NAN, 10).is_err());
        assert!(r_grid(2.0, 4.0, 0).is_err());
    }

    #[test]
    fn sweep_preserves_grid_order_and_period_doubling() {
        let points = bifurcation(2.5, 3.2, 8, 0.25, 500, &StableOptions::default()).unwrap();
        assert_eq!(points.len(), 8);
        for w in points.windows(2) {
            assert!(w[0].r < w[1].r);
        }
        // Below r = 3 the map has one fixed point; at 3.2 it has a 2-cycle.
        assert_eq!(points[0].values.len(), 1);
        assert_eq!(points[7].values.len(), 2);
    }

    #[test]
    fn sweep_propagates_iteration_errors() {
        let err = bifurcation(2.0, 3.0, 4, 0.25, 150, &StableOptions::default()).unwrap_err();
        assert!(matches!(err, MathError::InvalidIterationCount { n: 150, .. }));
    }
}
