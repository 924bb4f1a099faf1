//! Logistic map `x' = r·x·(1 - x)`.
//!
//! Inputs are not validated: an `x0` outside `[0, 1]` or a large `r` can drive
//! the recurrence to infinity or NaN, and those values are returned as is.
//!
//! Attractor detection is heuristic. We iterate a fixed number of steps, drop a
//! fixed transient prefix, round what is left and keep the distinct values. A
//! period-p cycle shows up as p values; a chaotic band shows up as many.

use crate::error::{MathError, MathResult};

/// Default length for [`generate_sequence`] callers that have no preference.
pub const DEFAULT_SEQUENCE_LEN: usize = 100;

/// Default length for [`stable_values`].
pub const DEFAULT_STABLE_LEN: usize = 500;

/// Iterates discarded before sampling the attractor.
pub const TRANSIENT_CUTOFF: usize = 200;

/// Decimal places kept when collapsing the tail into distinct values.
pub const ROUND_DECIMALS: i32 = 3;

/// Knobs for attractor extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StableOptions {
    pub transient: usize,
    pub decimals: i32,
}

impl Default for StableOptions {
    fn default() -> Self {
        Self {
            transient: TRANSIENT_CUTOFF,
            decimals: ROUND_DECIMALS,
        }
    }
}

/// One application of the map.
#[inline]
pub fn step(r: f64, x: f64) -> f64 {
    r * x * (1.0 - x)
}

/// The first `n` iterates starting at `x0` (index 0 is `x0` itself).
pub fn generate_sequence(x0: f64, r: f64, n: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(n);
    if n == 0 {
        return out;
    }
    let mut x = x0;
    out.push(x);
    for _ in 1..n {
        x = step(r, x);
        out.push(x);
    }
    out
}

/// Sorted distinct long-run values of the map, using the default cutoff and rounding.
pub fn stable_values(r: f64, x0: f64, n: usize) -> MathResult<Vec<f64>> {
    stable_values_with(r, x0, n, &StableOptions::default())
}

/// Sorted distinct long-run values with explicit cutoff and rounding.
///
/// Fails when `n` leaves no iterates after the transient is dropped.
pub fn stable_values_with(r: f64, x0: f64, n: usize, opts: &StableOptions) -> MathResult<Vec<f64>> {
    if n <= opts.transient {
        return Err(MathError::InvalidIterationCount {
            n,
            cutoff: opts.transient,
        });
    }

    let sequence = generate_sequence(x0, r, n);
    // NaN is replaced by the positive quiet NaN so it sorts last whatever its sign bit.
    let mut tail: Vec<f64> = sequence[opts.transient..]
        .iter()
        .map(|&v| if v.is_nan() { f64::NAN } else { round_to(v, opts.decimals) })
        .collect();

    // total_cmp puts -0.0 before 0.0; dedup merges both zeros and all NaNs.
    tail.sort_by(f64::total_cmp);
    tail.dedup_by(|a, b| a == b || (a.is_nan() && b.is_nan()));
    Ok(tail)
}

/// Round half to even at `decimals` places.
///
/// When `10^decimals` overflows the value already has fewer significant digits
/// and is returned unchanged; when it underflows the result is a signed zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals);
    if scale == 0.0 {
        return 0.0f64.copysign(value);
    }
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

/// Period of the cycle if the values look like a finite cycle.
///
/// Anything with more than `max_period` distinct values is treated as chaotic.
pub fn classify(values: &[f64], max_period: usize) -> Regime {
    if values.iter().any(|v| !v.is_finite()) {
        return Regime::Divergent;
    }
    match values.len() {
        0 => Regime::Divergent,
        p if p <= max_period => Regime::Periodic(p),
        _ => Regime::Chaotic,
    }
}

/// Coarse description of an attractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Periodic(usize),
    Chaotic,
    Divergent,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::Periodic(1) => write!(f, "fixed point"),
            Regime::Periodic(p) => write!(f, "period-{p} cycle"),
            Regime::Chaotic => write!(f, "chaotic band"),
            Regime::Divergent => write!(f, "divergent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    fn is_strictly_increasing(values: &[f64]) -> bool {
        values
            .windows(2)
            .all(|w| w[0].partial_cmp(&w[1]) == Some(Ordering::Less))
    }

    #[test]
    fn sequence_starts_at_x0_with_requested_length() {
        for &(x0, r, n) in &[(0.1, 3.9, 1), (0.3, 2.5, 7), (0.9, 0.5, 100)] {
            let seq = generate_sequence(x0, r, n);
            assert_eq!(seq.len(), n);
            assert_eq!(seq[0], x0);
        }
        assert!(generate_sequence(0.5, 2.0, 0).is_empty());
    }

    #[test]
    fn sequence_r2_matches_hand_computation() {
        let seq = generate_sequence(0.25, 2.0, 5);
        assert_eq!(seq[0], 0.25);
        assert_eq!(seq[1], 0.375);
        assert_eq!(seq[2], 0.46875);
        assert!((seq[3] - 0.498046875).abs() < 1e-15);
        assert!((seq[4] - 0.4999923706).abs() < 1e-9);
    }

    #[test]
    fn zero_growth_kills_everything_after_x0() {
        let seq = generate_sequence(0.7, 0.0, 10);
        assert_eq!(seq[0], 0.7);
        assert!(seq[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn unit_growth_decays_toward_zero() {
        let seq = generate_sequence(0.5, 1.0, 50);
        for w in seq.windows(2) {
            assert!(w[1] < w[0], "{} !< {}", w[1], w[0]);
            assert!(w[1] > 0.0);
        }
    }

    #[test]
    fn divergent_inputs_propagate() {
        let seq = generate_sequence(2.0, 4.0, 20);
        assert!(seq.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn stable_values_fixed_point_at_half() {
        let values = stable_values(2.0, 0.25, 500).unwrap();
        assert_eq!(values, vec![0.5]);
        assert_eq!(classify(&values, 64), Regime::Periodic(1));
    }

    #[test]
    fn stable_values_period_two() {
        let values = stable_values(3.2, 0.25, 500).unwrap();
        assert_eq!(values.len(), 2);
        assert!((values[0] - 0.513).abs() < 1e-12);
        assert!((values[1] - 0.799).abs() < 1e-12);
    }

    #[test]
    fn stable_values_are_strictly_increasing() {
        for &r in &[2.8, 3.5, 3.7, 3.9, 4.0] {
            let values = stable_values(r, 0.25, 500).unwrap();
            assert!(!values.is_empty());
            assert!(is_strictly_increasing(&values), "r={r}");
        }
    }

    #[test]
    fn chaotic_regime_has_many_values() {
        let values = stable_values(3.9, 0.25, 500).unwrap();
        assert_eq!(classify(&values, 64), Regime::Chaotic);
    }

    #[test]
    fn short_runs_are_rejected() {
        for n in [0, 1, 199, 200] {
            assert_eq!(
                stable_values(3.0, 0.25, n),
                Err(MathError::InvalidIterationCount { n, cutoff: 200 })
            );
        }
        assert!(stable_values(3.0, 0.25, 201).is_ok());
    }

    #[test]
    fn custom_options_change_cutoff_and_precision() {
        let opts = StableOptions { transient: 10, decimals: 1 };
        assert!(stable_values_with(2.0, 0.25, 11, &opts).is_ok());
        let values = stable_values_with(3.2, 0.25, 400, &opts).unwrap();
        assert_eq!(values, vec![0.5, 0.8]);
    }

    #[test]
    fn round_to_uses_half_even() {
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert!(round_to(f64::NAN, 3).is_nan());
    }

    #[test]
    fn oversized_precision_keeps_values() {
        assert_eq!(round_to(0.5, 400), 0.5);
        assert_eq!(round_to(0.123456, 320), 0.123456);
        assert_eq!(round_to(0.7, -400), 0.0);
        assert_eq!(round_to(f64::INFINITY, 3), f64::INFINITY);

        let opts = StableOptions { transient: 200, decimals: 400 };
        assert_eq!(stable_values_with(2.0, 0.25, 500, &opts).unwrap(), vec![0.5]);
    }

    #[test]
    fn arithmetic_nan_is_reported_as_positive_nan() {
        // 0 * inf yields a NaN whose sign bit depends on the platform.
        let values = stable_values(0.0, f64::INFINITY, 300).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values[0].is_nan());
        assert!(values[0].is_sign_positive());
    }

    #[test]
    fn divergent_tail_collapses_to_one_entry() {
        let values = stable_values(10.0, 0.5, 300).unwrap();
        assert_eq!(values, vec![f64::NEG_INFINITY]);
        assert_eq!(classify(&values, 64), Regime::Divergent);
    }

    #[test]
    fn nan_tail_is_reported_once() {
        let values = stable_values(3.0, f64::NAN, 300).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values[0].is_nan());
    }
}
