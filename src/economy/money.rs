//! Money market equilibrium (LM).
//!
//! Real money demand `L = k·Y - h·i` meets the vertical real supply `Ms / P`:
//!
//! ```text
//! i* = (k·Y - Ms/P) / h
//! ```
//!
//! A negative `i*` is reported as computed; the diagram simply clips it.

use serde::Serialize;

use crate::economy::{ParamRange, linspace};
use crate::error::{MathError, MathResult};

pub const MS_RANGE: ParamRange = ParamRange::new(50.0, 250.0, 10.0);
pub const INCOME_RANGE: ParamRange = ParamRange::new(500.0, 1500.0, 25.0);
pub const PRICE_RANGE: ParamRange = ParamRange::new(0.5, 2.0, 0.1);

pub const DEFAULT_M_MAX: f64 = 500.0;
pub const DEFAULT_I_MAX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoneyMarket {
    /// Income sensitivity of money demand.
    pub k: f64,
    /// Interest sensitivity of money demand.
    pub h: f64,
    /// Nominal money supply.
    pub ms: f64,
    /// Income level.
    pub y: f64,
    /// Price level.
    pub p: f64,
}

impl Default for MoneyMarket {
    fn default() -> Self {
        Self {
            k: 0.5,
            h: 10.0,
            ms: 150.0,
            y: 800.0,
            p: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoneyEquilibrium {
    pub real_supply: f64,
    pub rate: f64,
}

impl MoneyMarket {
    pub fn real_supply(&self) -> MathResult<f64> {
        if !(self.p > 0.0) {
            return Err(MathError::InvalidParameter(format!(
                "price level must be positive, got {}",
                self.p
            )));
        }
        Ok(self.ms / self.p)
    }

    pub fn equilibrium_rate(&self) -> MathResult<f64> {
        if !(self.h > 0.0) {
            return Err(MathError::InvalidParameter(format!(
                "interest sensitivity h must be positive, got {}",
                self.h
            )));
        }
        let supply = self.real_supply()?;
        Ok((self.k * self.y - supply) / self.h)
    }

    pub fn equilibrium(&self) -> MathResult<MoneyEquilibrium> {
        Ok(MoneyEquilibrium {
            real_supply: self.real_supply()?,
            rate: self.equilibrium_rate()?,
        })
    }

    pub fn money_demand(&self, rate: f64) -> f64 {
        self.k * self.y - self.h * rate
    }

    /// `(L(i), i)` pairs over `i ∈ [0, i_max]`, money on the x-axis.
    pub fn demand_curve(&self, i_max: f64, n: usize) -> Vec<(f64, f64)> {
        linspace(0.0, i_max, n)
            .into_iter()
            .map(|i| (self.money_demand(i), i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_equilibrium_rate() {
        let m = MoneyMarket::default();
        let eq = m.equilibrium().unwrap();
        assert_eq!(eq.real_supply, 150.0);
        // (0.5 * 800 - 150) / 10
        assert_eq!(eq.rate, 25.0);
    }

    #[test]
    fn demand_equals_supply_at_equilibrium() {
        let m = MoneyMarket { ms: 210.0, y: 1275.0, p: 1.4, ..MoneyMarket::default() };
        let eq = m.equilibrium().unwrap();
        assert!((m.money_demand(eq.rate) - eq.real_supply).abs() < 1e-9);
    }

    #[test]
    fn higher_prices_raise_the_rate() {
        let base = MoneyMarket::default();
        let inflated = MoneyMarket { p: 2.0, ..base };
        assert!(inflated.equilibrium_rate().unwrap() > base.equilibrium_rate().unwrap());
    }

    #[test]
    fn negative_rate_is_reported() {
        let m = MoneyMarket { ms: 250.0, y: 400.0, ..MoneyMarket::default() };
        assert_eq!(m.equilibrium_rate().unwrap(), -5.0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let zero_price = MoneyMarket { p: 0.0, ..MoneyMarket::default() };
        assert!(zero_price.real_supply().is_err());
        let flat = MoneyMarket { h: 0.0, ..MoneyMarket::default() };
        assert!(flat.equilibrium_rate().is_err());
    }

    #[test]
    fn demand_curve_puts_money_on_x() {
        let m = MoneyMarket::default();
        let curve = m.demand_curve(DEFAULT_I_MAX, 100);
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0], (400.0, 0.0));
        assert_eq!(curve[99], (-100.0, 50.0));
    }
}
