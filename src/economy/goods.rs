//! Goods market in an open economy (Keynesian cross).
//!
//! Aggregate demand is linear in income:
//!
//! ```text
//! DA(Y) = A + c1·(1 - t1)·Y,   A = c0 + i0 + g0 + nx0
//! ```
//!
//! Equilibrium is where the demand line crosses the 45° line `Y = DA`:
//! `Y* = α·A` with the multiplier `α = 1 / (1 - c1·(1 - t1))`.

use serde::Serialize;

use crate::economy::{ParamRange, linspace};
use crate::error::{MathError, MathResult};

pub const G0_RANGE: ParamRange = ParamRange::new(100.0, 300.0, 10.0);
pub const T1_RANGE: ParamRange = ParamRange::new(0.1, 0.5, 0.05);
pub const I0_RANGE: ParamRange = ParamRange::new(50.0, 250.0, 10.0);
pub const NX0_RANGE: ParamRange = ParamRange::new(-50.0, 200.0, 10.0);

/// Fixed horizontal/vertical extent of the diagram.
pub const DEFAULT_Y_MAX: f64 = 2500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodsMarket {
    /// Autonomous consumption.
    pub c0: f64,
    /// Marginal propensity to consume.
    pub c1: f64,
    /// Government spending.
    pub g0: f64,
    /// Income tax rate.
    pub t1: f64,
    /// Autonomous investment.
    pub i0: f64,
    /// Autonomous net exports.
    pub nx0: f64,
}

impl Default for GoodsMarket {
    fn default() -> Self {
        Self {
            c0: 50.0,
            c1: 0.6,
            g0: 200.0,
            t1: 0.2,
            i0: 150.0,
            nx0: 100.0,
        }
    }
}

/// Solved model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodsEquilibrium {
    pub multiplier: f64,
    pub autonomous: f64,
    pub income: f64,
}

impl GoodsMarket {
    /// Slope of the demand line.
    pub fn marginal_propensity(&self) -> f64 {
        self.c1 * (1.0 - self.t1)
    }

    pub fn multiplier(&self) -> MathResult<f64> {
        let slope = self.marginal_propensity();
        if !slope.is_finite() || slope >= 1.0 {
            return Err(MathError::InvalidParameter(format!(
                "c1·(1 - t1) = {slope:.4} must be below 1 for a finite multiplier"
            )));
        }
        Ok(1.0 / (1.0 - slope))
    }

    pub fn autonomous(&self) -> f64 {
        self.c0 + self.i0 + self.g0 + self.nx0
    }

    pub fn equilibrium(&self) -> MathResult<GoodsEquilibrium> {
        let multiplier = self.multiplier()?;
        let autonomous = self.autonomous();
        Ok(GoodsEquilibrium {
            multiplier,
            autonomous,
            income: multiplier * autonomous,
        })
    }

    pub fn aggregate_demand(&self, income: f64) -> f64 {
        self.autonomous() + self.marginal_propensity() * income
    }

    /// `(Y, DA(Y))` pairs over `[0, y_max]`.
    pub fn demand_curve(&self, y_max: f64, n: usize) -> Vec<(f64, f64)> {
        linspace(0.0, y_max, n)
            .into_iter()
            .map(|y| (y, self.aggregate_demand(y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_equilibrium() {
        let m = GoodsMarket::default();
        let eq = m.equilibrium().unwrap();
        // 1 / (1 - 0.6 * 0.8) = 1 / 0.52
        assert!((eq.multiplier - 1.0 / 0.52).abs() < 1e-12);
        assert_eq!(eq.autonomous, 500.0);
        assert!((eq.income - 500.0 / 0.52).abs() < 1e-9);
    }

    #[test]
    fn equilibrium_lies_on_45_degree_line() {
        let m = GoodsMarket {
            g0: 270.0,
            t1: 0.35,
            i0: 80.0,
            nx0: -30.0,
            ..GoodsMarket::default()
        };
        let eq = m.equilibrium().unwrap();
        assert!((m.aggregate_demand(eq.income) - eq.income).abs() < 1e-9);
    }

    #[test]
    fn higher_tax_rate_lowers_multiplier() {
        let low = GoodsMarket { t1: 0.1, ..GoodsMarket::default() };
        let high = GoodsMarket { t1: 0.5, ..GoodsMarket::default() };
        assert!(low.multiplier().unwrap() > high.multiplier().unwrap());
    }

    #[test]
    fn explosive_propensity_is_rejected() {
        let m = GoodsMarket { c1: 1.2, t1: 0.0, ..GoodsMarket::default() };
        assert!(matches!(m.multiplier(), Err(MathError::InvalidParameter(_))));
    }

    #[test]
    fn demand_curve_spans_diagram() {
        let m = GoodsMarket::default();
        let curve = m.demand_curve(DEFAULT_Y_MAX, 100);
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0], (0.0, 500.0));
        let (y, da) = curve[99];
        assert_eq!(y, 2500.0);
        assert!((da - (500.0 + 0.48 * 2500.0)).abs() < 1e-9);
    }
}
