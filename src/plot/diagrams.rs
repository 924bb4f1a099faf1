//! Ready-made ASCII diagrams.
//!
//! Glyphs:
//! - `-` model curves (demand, fitted line, sequence path)
//! - `.` reference lines (45° line, money supply)
//! - `o` observations / iterates
//! - `*` equilibrium

use crate::dynamics::BifurcationPoint;
use crate::economy::{GoodsEquilibrium, GoodsMarket, MoneyEquilibrium, MoneyMarket};
use crate::plot::ascii::{PlotSpec, Series, render_ascii_plot};

const CURVE_POINTS: usize = 100;

/// Iterates against step index.
pub fn sequence_plot(sequence: &[f64], width: usize, height: usize) -> String {
    let pts: Vec<(f64, f64)> = sequence
        .iter()
        .enumerate()
        .map(|(i, &x)| (i as f64, x))
        .collect();
    render_ascii_plot(
        &[Series::line(&pts, '-'), Series::points(&pts, 'o')],
        &PlotSpec::new(width, height).labels("step", "x"),
    )
}

/// Observations and fitted line for a single predictor.
pub fn fit_plot(x: &[f64], y: &[f64], intercept: f64, slope: f64, width: usize, height: usize) -> String {
    let observed: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();

    let lo = x.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let line = if lo.is_finite() && hi.is_finite() {
        vec![(lo, intercept + slope * lo), (hi, intercept + slope * hi)]
    } else {
        Vec::new()
    };

    render_ascii_plot(
        &[Series::line(&line, '-'), Series::points(&observed, 'o')],
        &PlotSpec::new(width, height),
    )
}

/// Keynesian cross on a fixed `[0, y_max]²` frame.
pub fn goods_plot(
    market: &GoodsMarket,
    eq: &GoodsEquilibrium,
    y_max: f64,
    width: usize,
    height: usize,
) -> String {
    let diagonal = [(0.0, 0.0), (y_max, y_max)];
    let demand = market.demand_curve(y_max, CURVE_POINTS);
    let point = [(eq.income, eq.income)];

    render_ascii_plot(
        &[
            Series::line(&diagonal, '.'),
            Series::line(&demand, '-'),
            Series::points(&point, '*'),
        ],
        &PlotSpec::new(width, height)
            .labels("Y", "DA")
            .bounds([0.0, y_max], [0.0, y_max]),
    )
}

/// Money demand against the vertical real supply, rate on the y-axis.
pub fn money_plot(
    market: &MoneyMarket,
    eq: &MoneyEquilibrium,
    m_max: f64,
    i_max: f64,
    width: usize,
    height: usize,
) -> String {
    let demand = market.demand_curve(i_max, CURVE_POINTS);
    let supply = [(eq.real_supply, 0.0), (eq.real_supply, i_max)];
    let point = [(eq.real_supply, eq.rate)];

    render_ascii_plot(
        &[
            Series::line(&supply, '.'),
            Series::line(&demand, '-'),
            Series::points(&point, '*'),
        ],
        &PlotSpec::new(width, height)
            .labels("M/P", "i")
            .bounds([0.0, m_max], [0.0, i_max]),
    )
}

/// Scatter of stable values against the growth rate.
pub fn bifurcation_plot(points: &[BifurcationPoint], width: usize, height: usize) -> String {
    let pts: Vec<(f64, f64)> = points
        .iter()
        .flat_map(|p| p.values.iter().map(move |&v| (p.r, v)))
        .collect();
    render_ascii_plot(
        &[Series::points(&pts, '.')],
        &PlotSpec::new(width, height).labels("r", "x"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(txt: &str) -> String {
        txt.lines().skip(1).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn goods_plot_marks_equilibrium() {
        let m = GoodsMarket::default();
        let eq = m.equilibrium().unwrap();
        let txt = goods_plot(&m, &eq, 2500.0, 60, 20);
        assert!(txt.starts_with("Plot: Y=[0.000, 2500.000] | DA=[0.000, 2500.000]\n"));
        let grid = body(&txt);
        assert_eq!(grid.matches('*').count(), 1);
        assert!(grid.contains('.'));
        assert!(grid.contains('-'));
    }

    #[test]
    fn money_plot_hides_negative_rate() {
        let m = MoneyMarket { ms: 250.0, y: 400.0, ..MoneyMarket::default() };
        let eq = m.equilibrium().unwrap();
        assert!(eq.rate < 0.0);
        let txt = money_plot(&m, &eq, 500.0, 50.0, 40, 12);
        assert_eq!(body(&txt).matches('*').count(), 0);
    }

    #[test]
    fn sequence_plot_has_one_row_per_height() {
        let seq = crate::dynamics::generate_sequence(0.25, 3.2, 30);
        let txt = sequence_plot(&seq, 40, 10);
        assert_eq!(txt.lines().count(), 11);
        assert!(body(&txt).contains('o'));
    }

    #[test]
    fn fit_plot_draws_points_and_line() {
        let txt = fit_plot(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], 0.0, 2.0, 20, 8);
        assert_eq!(body(&txt).matches('o').count(), 3);
    }
}
