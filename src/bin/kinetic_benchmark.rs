use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use kinetic_efficiency::config::{load_profiles, load_twin_configs};
use kinetic_efficiency::efficiency::{catalog, default_profiles, run_benchmark, run_twin_benchmark};
use kinetic_efficiency::export::open_output;
use kinetic_efficiency::export::report::{Format, Presentation, write_report};
use kinetic_efficiency::export::trace::write_trace;
use kinetic_efficiency::twin::{self, DEFAULT_QUANTUM_J};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Kinetic Conversion Efficiency benchmark (S = Δv / ΔE)"
)]
struct Cli {
    /// Emit a JSON document instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Present results ranked by S, highest first (computation order is unchanged)
    #[arg(long, default_value_t = false)]
    rank: bool,

    /// Profile catalog: YAML list, single TOML record, or a directory of either
    #[arg(long, conflicts_with = "twin")]
    profiles: Option<PathBuf>,

    /// Derive the profiles from the energy-quantum digital twin
    #[arg(long, default_value_t = false)]
    twin: bool,

    /// Twin parameter catalog (defaults to the built-in archetype suite)
    #[arg(long, requires = "twin")]
    twins: Option<PathBuf>,

    /// Energy applied per twin step, in joules
    #[arg(long, default_value_t = DEFAULT_QUANTUM_J)]
    energy_quantum: f64,

    /// Write the per-step twin telemetry as JSON to this path
    #[arg(long, requires = "twin")]
    trace: Option<PathBuf>,

    /// Output file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Fail when any profile or twin is invalid instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let report = if cli.twin {
        let suite = match &cli.twins {
            Some(path) => catalog::twins_from_configs(
                &load_twin_configs(path)
                    .with_context(|| format!("loading twins from {}", path.display()))?,
            ),
            None => twin::default_suite(),
        };
        tracing::info!(
            count = suite.len(),
            quantum_j = cli.energy_quantum,
            "running twin benchmark"
        );
        let (report, outcomes) = run_twin_benchmark(&suite, cli.energy_quantum);
        if let Some(path) = &cli.trace {
            let mut writer = open_output(path)
                .with_context(|| format!("unable to open {}", path.display()))?;
            write_trace(writer.as_mut(), &outcomes)?;
        }
        report
    } else {
        let profiles = match &cli.profiles {
            Some(path) => catalog::profiles_from_configs(
                &load_profiles(path)
                    .with_context(|| format!("loading profiles from {}", path.display()))?,
            ),
            None => default_profiles(),
        };
        tracing::info!(count = profiles.len(), "running benchmark");
        run_benchmark(&profiles)
    };

    let format = if cli.json { Format::Json } else { Format::Text };
    let presentation = if cli.rank {
        Presentation::Ranked
    } else {
        Presentation::Declared
    };

    let mut writer = open_output(&cli.output)
        .with_context(|| format!("unable to open {}", cli.output.display()))?;
    write_report(writer.as_mut(), &report, format, presentation)?;

    let rejected = report.failures().count();
    if cli.strict && rejected > 0 {
        bail!("{rejected} profile(s) failed validation");
    }
    Ok(())
}

/// Logs go to stderr so stdout stays parseable; `KCE_LOG_FORMAT=json` emits JSON lines.
fn init_tracing() {
    let log_format = std::env::var("KCE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
