//! Top-level application orchestration.
//!
//! `src/main.rs` only maps the result to an exit code; this module:
//! - installs the tracing subscriber
//! - parses CLI arguments and loads the config
//! - runs the requested computation
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::cli::{
    BifurcationArgs, Cli, Command, GoodsArgs, HoopsArgs, LogisticArgs, MeanArgs, MoneyArgs,
    OlsArgs, PricesArgs, StableArgs,
};
use crate::config::Config;
use crate::dynamics::StableOptions;
use crate::economy::{GoodsMarket, MoneyMarket};
use crate::error::AppError;

/// Entry point for the `econ` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let config = prepare(&cli)?;

    match cli.command {
        Command::Mean(args) => handle_mean(args),
        Command::Ols(args) => handle_ols(args),
        Command::Logistic(args) => handle_logistic(args, &config),
        Command::Stable(args) => handle_stable(args, &config),
        Command::Bifurcation(args) => handle_bifurcation(args, &config),
        Command::Hoops(args) => handle_hoops(args, &config),
        Command::Prices(args) => handle_prices(args),
        Command::Goods(args) => handle_goods(args, &config),
        Command::Money(args) => handle_money(args, &config),
        Command::Tui => crate::tui::run(&config),
    }
}

/// Environment, logging, then config, in that order.
///
/// `.env` may set `ECON_LOG` and `ECON_CONFIG`, and the config load logs which
/// file it picked, so the subscriber has to exist before it runs.
fn prepare(cli: &Cli) -> Result<Config, AppError> {
    dotenvy::dotenv().ok();
    init_tracing();
    Config::load(cli.config.as_deref())
}

/// `ECON_LOG` takes precedence over `RUST_LOG`; default level is `warn`.
fn init_tracing() {
    let base = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
    let filter = match std::env::var("ECON_LOG") {
        Ok(directives) => base.parse_lossy(directives),
        Err(_) => base.from_env_lossy(),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_mean(args: MeanArgs) -> Result<(), AppError> {
    let values = crate::io::load_values(&args.path)?;
    let mean = crate::math::mean(&values).ok_or_else(|| {
        AppError::new(3, format!("'{}' contains no numbers.", args.path.display()))
    })?;
    print!(
        "{}",
        crate::report::format_mean(&args.path.display().to_string(), values.len(), mean)
    );
    Ok(())
}

fn handle_ols(args: OlsArgs) -> Result<(), AppError> {
    let data = crate::io::load_design(&args.data)?;
    let fit = crate::math::fit(&data.x, &data.y)?;
    tracing::info!(n = fit.n, k = fit.k, sse = fit.sse, "ols fit");

    let labels: Vec<String> = (0..data.x.ncols()).map(|j| data.predictor_label(j)).collect();
    print!("{}", crate::report::format_ols(&fit, &labels));

    // A 2-D picture only makes sense for a single predictor.
    if !args.plot.no_plot && data.x.ncols() == 1 {
        let x: Vec<f64> = data.x.column(0).iter().copied().collect();
        let y: Vec<f64> = data.y.iter().copied().collect();
        let plot = crate::plot::fit_plot(
            &x,
            &y,
            fit.coefficients[0],
            fit.coefficients[1],
            args.plot.width,
            args.plot.height,
        );
        println!("\n{plot}");
    }

    if let Some(path) = &args.export {
        crate::io::write_fit_json(path, &fit)?;
    }
    Ok(())
}

fn handle_logistic(args: LogisticArgs, config: &Config) -> Result<(), AppError> {
    let x0 = args.x0.unwrap_or(config.logistic.x0);
    let r = args.r.unwrap_or(config.logistic.r);
    let n = args.n.unwrap_or(config.logistic.n);

    let sequence = crate::dynamics::generate_sequence(x0, r, n);
    print!("{}", crate::report::format_sequence(x0, r, &sequence));

    if !args.plot.no_plot && !sequence.is_empty() {
        let plot = crate::plot::sequence_plot(&sequence, args.plot.width, args.plot.height);
        println!("\n{plot}");
    }

    if let Some(path) = &args.export {
        crate::io::write_sequence_csv(path, &sequence)?;
    }
    Ok(())
}

fn handle_stable(args: StableArgs, config: &Config) -> Result<(), AppError> {
    let r = args.r.unwrap_or(config.logistic.r);
    let x0 = args.x0.unwrap_or(config.logistic.x0);
    let n = args.n.unwrap_or(config.logistic.stable_n);
    let opts = StableOptions {
        transient: args.transient,
        decimals: args.decimals,
    };

    let values = crate::dynamics::stable_values_with(r, x0, n, &opts)?;
    let regime = crate::dynamics::classify(&values, args.max_period);
    tracing::debug!(r, distinct = values.len(), %regime, "stable values");

    print!("{}", crate::report::format_stable(r, x0, n, &values, regime));
    Ok(())
}

fn handle_bifurcation(args: BifurcationArgs, config: &Config) -> Result<(), AppError> {
    let x0 = args.x0.unwrap_or(config.logistic.x0);
    let n = args.n.unwrap_or(config.logistic.stable_n);

    let points = crate::dynamics::bifurcation(
        args.r_min,
        args.r_max,
        args.steps,
        x0,
        n,
        &StableOptions::default(),
    )?;
    print!("{}", crate::report::format_bifurcation(&points, args.max_period));

    if !args.plot.no_plot {
        let plot = crate::plot::bifurcation_plot(&points, args.plot.width, args.plot.height);
        println!("\n{plot}");
    }

    if let Some(path) = &args.export {
        crate::io::write_bifurcation_csv(path, &points)?;
    }
    Ok(())
}

fn handle_hoops(args: HoopsArgs, config: &Config) -> Result<(), AppError> {
    let mut sim = config.simulation.to_sim();
    if let Some(trials) = args.trials {
        sim.trials = trials;
    }
    if let Some(seed) = args.seed {
        sim.seed = seed;
    }

    let summary = crate::sim::expected_points(&sim)?;
    print!("{}", crate::report::format_simulation(&sim, &summary));
    Ok(())
}

fn handle_prices(args: PricesArgs) -> Result<(), AppError> {
    let rows = crate::data::load_prices(&args.csv)?;
    let summary = crate::data::summarize(
        &rows,
        args.top,
        args.year,
        args.month,
        args.country.as_deref(),
    );
    print!("{}", crate::report::format_prices(&summary));
    Ok(())
}

fn handle_goods(args: GoodsArgs, config: &Config) -> Result<(), AppError> {
    let market = GoodsMarket {
        g0: args.g0,
        t1: args.t1,
        i0: args.i0,
        nx0: args.nx0,
        ..config.goods.market()
    };
    let eq = market.equilibrium()?;
    print!("{}", crate::report::format_goods(&market, &eq));

    if !args.plot.no_plot {
        let y_max = config.goods.y_max.max(eq.income * 1.1);
        let plot = crate::plot::goods_plot(&market, &eq, y_max, args.plot.width, args.plot.height);
        println!("\n{plot}");
    }
    Ok(())
}

fn handle_money(args: MoneyArgs, config: &Config) -> Result<(), AppError> {
    let market = MoneyMarket {
        ms: args.ms,
        y: args.y,
        p: args.p,
        ..config.money.market()
    };
    let eq = market.equilibrium()?;
    print!("{}", crate::report::format_money(&market, &eq));

    if !args.plot.no_plot {
        let plot = crate::plot::money_plot(
            &market,
            &eq,
            config.money.m_max,
            config.money.i_max,
            args.plot.width,
            args.plot.height,
        );
        println!("\n{plot}");
    }
    Ok(())
}

const SUBCOMMANDS: [&str; 10] = [
    "mean",
    "ols",
    "logistic",
    "stable",
    "bifurcation",
    "hoops",
    "prices",
    "goods",
    "money",
    "tui",
];

/// Rewrite argv so `econ` defaults to `econ tui`.
///
/// Rules:
/// - `econ`                         -> `econ tui`
/// - `econ --config f.toml`         -> `econ --config f.toml tui`
/// - `econ --help/--version/help`   -> unchanged
/// - anything naming a subcommand   -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let rest = argv.get(1..).unwrap_or(&[]);

    let wants_help = rest
        .iter()
        .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version" | "help"));
    let has_subcommand = rest.iter().any(|a| SUBCOMMANDS.contains(&a.as_str()));
    if wants_help || has_subcommand {
        return argv;
    }

    // Only the global `--config` may precede the implicit subcommand.
    let only_globals = match rest {
        [] => true,
        [flag, _] => flag == "--config",
        [flag] => flag.starts_with("--config="),
        _ => false,
    };
    if only_globals {
        argv.push("tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["econ"])), args(&["econ", "tui"]));
        assert_eq!(
            rewrite_args(args(&["econ", "--config", "a.toml"])),
            args(&["econ", "--config", "a.toml", "tui"])
        );
        assert_eq!(
            rewrite_args(args(&["econ", "--config=a.toml"])),
            args(&["econ", "--config=a.toml", "tui"])
        );
    }

    #[test]
    fn explicit_commands_and_help_are_untouched() {
        for list in [
            &["econ", "stable", "-r", "3.2"][..],
            &["econ", "--config", "a.toml", "goods"][..],
            &["econ", "--help"][..],
            &["econ", "-V"][..],
        ] {
            assert_eq!(rewrite_args(args(list)), args(list));
        }
    }

    #[test]
    fn subscriber_is_installed_before_config_load() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logistic]\nr = 3.5").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from(["econ", "--config", path.as_str(), "stable"]);
        let config = prepare(&cli).unwrap();
        assert_eq!(config.logistic.r, 3.5);
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn unknown_input_is_left_for_clap_to_reject() {
        let argv = args(&["econ", "--bogus"]);
        assert_eq!(rewrite_args(argv.clone()), argv);
    }
}
