use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use spacetherm_trades::{
    cases::{Case, TradeStudy},
    config::{self, Method, SimulationConfig},
    environments::Destination,
    report, scenario,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Runs sample-return spacecraft thermal trades and writes one report per
/// (destination, case) pair.
///
/// ```bash
/// spacetherm --study heater-rhu --destination venus --output outputs
/// ```
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trade study to run: nominal, insulation-paint, heater-rhu,
    /// radiator-louver, active-cooling, or all
    #[arg(long, short, default_value = "nominal")]
    study: TradeStudy,

    /// TOML file of `[[case]]` tables to run instead of a built-in study
    #[arg(long, conflicts_with = "study")]
    cases: Option<PathBuf>,

    /// Destination to simulate, repeatable; defaults to all of them
    #[arg(long = "destination", short)]
    destinations: Vec<Destination>,

    /// Existing directory that receives the reports
    #[arg(long, short, default_value = "outputs")]
    output: PathBuf,

    /// TOML file of solver settings (t_end, abs_tol, rel_tol, first_step,
    /// max_step, method, euler_step)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integrator: dopri5 (adaptive) or euler (fixed step); overrides the
    /// settings file
    #[arg(long)]
    method: Option<Method>,

    /// Run scenarios one after another instead of in parallel
    #[arg(long)]
    serial: bool,

    /// Show each temperature history in a window after the run
    #[cfg(feature = "plot")]
    #[arg(long)]
    plot: bool,

    /// Increase log detail (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(method) = args.method {
        config.method = method;
    }

    let cases = selected_cases(&args)?;

    let destinations = if args.destinations.is_empty() {
        Destination::ALL.to_vec()
    } else {
        args.destinations.clone()
    };

    let scenarios = scenario::scenarios(&destinations, &cases);
    tracing::info!(
        cases = cases.len(),
        destinations = destinations.len(),
        t_end = config.t_end,
        method = %config.method,
        "starting trade run"
    );

    let results = scenario::run_all(&scenarios, &config, !args.serial)?;

    for result in &results {
        println!("{result}");
    }

    report::write_reports(&args.output, &results)
        .with_context(|| format!("writing reports to {}", args.output.display()))?;

    #[cfg(feature = "plot")]
    if args.plot {
        for result in &results {
            show_temperatures(result)?;
        }
    }

    Ok(())
}

/// The custom case file when one is given, otherwise the built-in study.
fn selected_cases(args: &Args) -> Result<Vec<Case>> {
    match &args.cases {
        Some(path) => {
            let cases = config::load_cases(path)
                .with_context(|| format!("loading cases from {}", path.display()))?;
            tracing::info!(cases_file = %path.display(), "using custom cases");
            Ok(cases)
        }
        None => {
            tracing::info!(study = %args.study, "using built-in study");
            Ok(args.study.cases())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[cfg(feature = "plot")]
fn show_temperatures(result: &scenario::ScenarioResult) -> Result<()> {
    use spacetherm_observers::{PlotObserver, ShowConfig};

    let trajectory = &result.trajectory;
    let mut plot = PlotObserver::new(trajectory.component_names().iter().cloned());
    for (&time, state) in trajectory.times().iter().zip(trajectory.states()) {
        plot.record(time, state.temperatures().iter().copied().map(Some));
    }

    plot.show(
        ShowConfig::new()
            .title(format!(
                "Thermal Sim - {}\n{}",
                result.environment,
                result.case_name()
            ))
            .legend()
            .x_label("Time (s)")
            .y_label("Component Temperature (K)"),
    )
    .map_err(|err| anyhow::anyhow!("plot window failed: {err}"))
}
