//! Text reports.

use crate::data::PriceSummary;
use crate::dynamics::{BifurcationPoint, Regime};
use crate::economy::{GoodsEquilibrium, GoodsMarket, MoneyEquilibrium, MoneyMarket};
use crate::math::OlsFit;
use crate::sim::{SimConfig, SimSummary};

/// Mean of a numeric file.
pub fn format_mean(source: &str, n: usize, mean: f64) -> String {
    format!("=== econ - array mean ===\nSource: {source}\nValues: n={n}\nMean: {mean:.4}\n")
}

/// Coefficient table plus fit diagnostics.
///
/// `labels` names the predictors in column order.
pub fn format_ols(fit: &OlsFit, labels: &[String]) -> String {
    let mut out = String::new();
    out.push_str("=== econ - OLS estimation ===\n");
    out.push_str(&format!("Observations: n={} | predictors: k={}\n\n", fit.n, fit.k));

    out.push_str(format!("{:<24} {:>16}", "term", "coefficient").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<24} {:-<16}", "", "").trim_end());
    out.push('\n');

    for (j, beta) in fit.coefficients.iter().enumerate() {
        let name = if j == 0 {
            "(intercept)".to_string()
        } else {
            labels
                .get(j - 1)
                .cloned()
                .unwrap_or_else(|| format!("x{j}"))
        };
        out.push_str(format!("{:<24} {:>16.6}", truncate(&name, 24), beta).trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("SSE: {:.6}\n", fit.sse));
    match fit.r_squared {
        Some(r2) => out.push_str(&format!("R²: {r2:.6}\n")),
        None => out.push_str("R²: n/a (constant response)\n"),
    }
    out
}

/// Logistic sequence listing.
pub fn format_sequence(x0: f64, r: f64, sequence: &[f64]) -> String {
    let mut out = String::new();
    out.push_str("=== econ - logistic map ===\n");
    out.push_str(&format!("x0={x0} | r={r} | n={}\n", sequence.len()));
    for (i, x) in sequence.iter().enumerate() {
        out.push_str(&format!("{i:>5}  {x:.6}\n"));
    }
    out
}

/// Attractor values for one growth rate.
pub fn format_stable(r: f64, x0: f64, n: usize, values: &[f64], regime: Regime) -> String {
    let mut out = String::new();
    out.push_str("=== econ - stable values ===\n");
    out.push_str(&format!("r={r} | x0={x0} | n={n}\n"));
    out.push_str(&format!("Regime: {regime} ({} distinct values)\n", values.len()));
    out.push_str(&format!("Values: {}\n", fmt_vec(values, 3)));
    out
}

/// One line per growth rate: number of distinct values and a preview.
pub fn format_bifurcation(points: &[BifurcationPoint], max_period: usize) -> String {
    let mut out = String::new();
    out.push_str("=== econ - bifurcation sweep ===\n");
    out.push_str(format!("{:>8} {:>6} {:<16} {}", "r", "count", "regime", "values").trim_end());
    out.push('\n');
    for p in points {
        let regime = crate::dynamics::classify(&p.values, max_period);
        let preview = if p.values.len() <= 8 {
            fmt_vec(&p.values, 3)
        } else {
            format!("[{:.3} .. {:.3}]", p.values[0], p.values[p.values.len() - 1])
        };
        out.push_str(
            format!(
                "{:>8.4} {:>6} {:<16} {}",
                p.r,
                p.values.len(),
                regime.to_string(),
                preview
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Monte Carlo summary.
pub fn format_simulation(config: &SimConfig, summary: &SimSummary) -> String {
    let mut out = String::new();
    out.push_str("=== econ - quarter scoring simulation ===\n");
    out.push_str(&format!(
        "Trials: {} | intervals: {} | p3={:.2} | p2={:.2} | seed={}\n",
        summary.trials,
        config.model.intervals,
        config.model.p_three,
        config.model.p_two,
        config.seed
    ));
    out.push_str(&format!(
        "Mean points: {:.4} (analytic {:.4})\n",
        summary.mean, summary.analytic_mean
    ));
    out.push_str(&format!(
        "Std dev: {:.4} | range: [{}, {}]\n",
        summary.std_dev, summary.min, summary.max
    ));
    out
}

/// Dataset summary answers.
pub fn format_prices(summary: &PriceSummary) -> String {
    let mut out = String::new();
    out.push_str("=== econ - price dataset ===\n");
    out.push_str(&format!("Rows: {}\n", summary.rows));
    out.push_str(&format!("Unique countries: {}\n", summary.countries));

    let names: Vec<&str> = summary.top_local.iter().map(String::as_str).collect();
    out.push_str(&format!("Top local price: {}\n", names.join(", ")));

    let (year, month) = summary.median_month;
    out.push_str(&format!(
        "Median dollar price {year:04}-{month:02}: {}\n",
        fmt_opt(summary.median_dollar)
    ));
    if let Some(country) = &summary.country {
        out.push_str(&format!(
            "Mean adjusted price ({country}): {}\n",
            fmt_opt(summary.mean_adj)
        ));
    }
    out
}

/// Keynesian cross headline.
pub fn format_goods(market: &GoodsMarket, eq: &GoodsEquilibrium) -> String {
    let mut out = String::new();
    out.push_str("=== econ - goods market (Keynesian cross) ===\n");
    out.push_str(&format!(
        "c0={} c1={} | g0={} t1={} i0={} nx0={}\n",
        market.c0, market.c1, market.g0, market.t1, market.i0, market.nx0
    ));
    out.push_str(&format!(
        "Multiplier: {:.2} | autonomous spending: {:.1} | equilibrium income: {:.1}\n",
        eq.multiplier, eq.autonomous, eq.income
    ));
    out
}

/// Money market headline.
pub fn format_money(market: &MoneyMarket, eq: &MoneyEquilibrium) -> String {
    let mut out = String::new();
    out.push_str("=== econ - money market (LM) ===\n");
    out.push_str(&format!(
        "k={} h={} | Ms={} Y={} P={}\n",
        market.k, market.h, market.ms, market.y, market.p
    ));
    out.push_str(&format!(
        "Real supply: {:.2} | equilibrium rate: {:.2}%\n",
        eq.real_supply, eq.rate
    ));
    out
}

fn fmt_vec(v: &[f64], decimals: usize) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.decimals$}")).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ols_table_labels_terms() {
        let fit = OlsFit {
            coefficients: vec![-3.5, 0.002, 0.8],
            fitted: vec![],
            residuals: vec![],
            sse: 12.0,
            r_squared: Some(0.25),
            n: 400,
            k: 2,
        };
        let txt = format_ols(&fit, &["gre".to_string(), "gpa".to_string()]);
        assert!(txt.contains("(intercept)"));
        assert!(txt.contains("gre"));
        assert!(txt.contains("      0.800000"));
        assert!(txt.contains("R²: 0.250000"));
        assert!(txt.lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn stable_report_lists_values() {
        let txt = format_stable(3.2, 0.25, 500, &[0.513, 0.799], Regime::Periodic(2));
        assert!(txt.contains("Regime: period-2 cycle (2 distinct values)"));
        assert!(txt.contains("Values: [0.513, 0.799]"));
    }

    #[test]
    fn bifurcation_preview_is_compact_for_chaos() {
        let many: Vec<f64> = (0..20).map(|i| i as f64 / 20.0).collect();
        let points = vec![
            BifurcationPoint { r: 2.5, values: vec![0.6] },
            BifurcationPoint { r: 3.9, values: many },
        ];
        let txt = format_bifurcation(&points, 16);
        assert!(txt.contains("fixed point"));
        assert!(txt.contains("chaotic band"));
        assert!(txt.contains("[0.000 .. 0.950]"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd.");
    }

    #[test]
    fn missing_values_print_dash() {
        assert_eq!(fmt_opt(None), "-");
        assert_eq!(fmt_opt(Some(f64::NAN)), "-");
        assert_eq!(fmt_opt(Some(4.69)), "4.6900");
    }
}
