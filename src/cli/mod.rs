//! Command-line parsing for the `econ` toolbox.
//!
//! Argument parsing stays here; numeric code never sees clap types. Options
//! that have a configured default are `Option<T>` and are resolved against
//! [`crate::config::Config`] in the app layer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "econ", version, about = "Econometrics and dynamics toolbox")]
pub struct Cli {
    /// TOML config file (defaults to $ECON_CONFIG, then ./econ.toml).
    #[arg(long, global = true, value_name = "TOML")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Arithmetic mean of every number in a file.
    Mean(MeanArgs),
    /// Ordinary least squares on a CSV table (last column is the response).
    Ols(OlsArgs),
    /// Iterate the logistic map and print the sequence.
    Logistic(LogisticArgs),
    /// Distinct long-run values of the logistic map for one growth rate.
    Stable(StableArgs),
    /// Stable values over a grid of growth rates.
    Bifurcation(BifurcationArgs),
    /// Monte Carlo estimate of points scored in one quarter.
    Hoops(HoopsArgs),
    /// Summaries of a country price dataset.
    Prices(PricesArgs),
    /// Keynesian cross equilibrium.
    Goods(GoodsArgs),
    /// Money market (LM) equilibrium rate.
    Money(MoneyArgs),
    /// Launch the interactive TUI (the default when no subcommand is given).
    Tui,
}

/// Terminal plot switches shared by the plotting commands.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct MeanArgs {
    /// Text or CSV file of numbers.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct OlsArgs {
    /// Numeric CSV; a non-numeric first row is read as a header.
    #[arg(value_name = "CSV")]
    pub data: PathBuf,

    /// Write coefficients and diagnostics to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[derive(Debug, Args)]
pub struct LogisticArgs {
    /// Initial population fraction.
    #[arg(long)]
    pub x0: Option<f64>,

    /// Growth rate.
    #[arg(short, long = "rate")]
    pub r: Option<f64>,

    /// Sequence length (including x0).
    #[arg(short, long = "iterations")]
    pub n: Option<usize>,

    /// Write the sequence to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[derive(Debug, Args)]
pub struct StableArgs {
    /// Growth rate.
    #[arg(short, long = "rate")]
    pub r: Option<f64>,

    /// Initial population fraction.
    #[arg(long)]
    pub x0: Option<f64>,

    /// Total iterations, must exceed the transient.
    #[arg(short, long = "iterations")]
    pub n: Option<usize>,

    /// Leading iterates discarded as transient.
    #[arg(long, default_value_t = crate::dynamics::TRANSIENT_CUTOFF)]
    pub transient: usize,

    /// Decimal places used to merge nearly equal values.
    #[arg(long, default_value_t = crate::dynamics::ROUND_DECIMALS)]
    pub decimals: i32,

    /// Largest cycle length reported as periodic.
    #[arg(long, default_value_t = 64)]
    pub max_period: usize,
}

#[derive(Debug, Args)]
pub struct BifurcationArgs {
    #[arg(long, default_value_t = 2.5)]
    pub r_min: f64,

    #[arg(long, default_value_t = 4.0)]
    pub r_max: f64,

    /// Number of growth rates on the grid.
    #[arg(long, default_value_t = 31)]
    pub steps: usize,

    /// Initial population fraction.
    #[arg(long)]
    pub x0: Option<f64>,

    /// Iterations per growth rate.
    #[arg(short, long = "iterations")]
    pub n: Option<usize>,

    /// Largest cycle length reported as periodic.
    #[arg(long, default_value_t = 64)]
    pub max_period: usize,

    /// Write the sweep to CSV (one row per value).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[derive(Debug, Args)]
pub struct HoopsArgs {
    /// Number of simulated quarters.
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,

    /// Random seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct PricesArgs {
    /// Price dataset CSV (name,date,local_price,dollar_price,adj_price).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Size of the highest-local-price set.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Year for the median dollar price.
    #[arg(long, default_value_t = 2024)]
    pub year: i32,

    /// Month for the median dollar price.
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Country for the mean adjusted price.
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Args)]
pub struct GoodsArgs {
    /// Government spending.
    #[arg(long, default_value_t = 200.0)]
    pub g0: f64,

    /// Tax rate.
    #[arg(long, default_value_t = 0.2)]
    pub t1: f64,

    /// Autonomous investment.
    #[arg(long, default_value_t = 150.0)]
    pub i0: f64,

    /// Autonomous net exports.
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub nx0: f64,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[derive(Debug, Args)]
pub struct MoneyArgs {
    /// Nominal money supply.
    #[arg(long, default_value_t = 150.0)]
    pub ms: f64,

    /// Income.
    #[arg(short, long = "income", default_value_t = 800.0)]
    pub y: f64,

    /// Price level.
    #[arg(short, long = "price", default_value_t = 1.0)]
    pub p: f64,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::parse_from(["econ", "stable", "-r", "3.2", "--config", "x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        match cli.command {
            Command::Stable(args) => {
                assert_eq!(args.r, Some(3.2));
                assert_eq!(args.x0, None);
                assert_eq!(args.transient, 200);
                assert_eq!(args.decimals, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_net_exports_parse() {
        let cli = Cli::parse_from(["econ", "goods", "--nx0", "-50"]);
        match cli.command {
            Command::Goods(args) => assert_eq!(args.nx0, -50.0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
