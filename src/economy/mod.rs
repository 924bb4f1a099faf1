//! Textbook macro models with closed-form equilibria.
//!
//! - goods market / Keynesian cross (`goods`)
//! - money market / LM (`money`)
//!
//! Both models expose a headline equilibrium plus a sampled curve for plotting.

pub mod goods;
pub mod money;

pub use goods::*;
pub use money::*;

/// A bounded, stepped parameter (what the TUI exposes as a slider).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Move `value` by `steps` increments, clamped to the range.
    ///
    /// The result is snapped to the step lattice anchored at `min` so repeated
    /// nudges do not accumulate floating-point drift.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        let raw = value + self.step * steps as f64;
        let k = ((raw - self.min) / self.step).round();
        (self.min + k * self.step).clamp(self.min, self.max)
    }
}

/// `n` evenly spaced values over `[lo, hi]`.
pub(crate) fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n as f64 - 1.0))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_clamps_and_snaps() {
        let r = ParamRange::new(0.1, 0.5, 0.05);
        assert!((r.nudge(0.2, 1) - 0.25).abs() < 1e-12);
        assert_eq!(r.nudge(0.5, 3), 0.5);
        assert_eq!(r.nudge(0.1, -1), 0.1);

        let mut v = 0.1;
        for _ in 0..8 {
            v = r.nudge(v, 1);
        }
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn linspace_endpoints() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 9.0, 1), vec![2.0]);
        let xs = linspace(0.0, 2500.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 2500.0);
    }
}
