//! ---
//! ems_section: "05-networking-external-interfaces"
//! ems_subsection: "binary"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Operator CLI for the hybrid propulsion advisor."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use roro_ems_calc_engine::OperatingConditions;
use roro_ems_common::{baseline_conditions, init_tracing, AppConfig};
use roro_ems_sim::{SimulationEngine, SimulationReport};
use tracing::info;

mod render;

const DEFAULT_CONFIG_FILE: &str = "roro-ems.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TraceFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Diesel/electric power split advisor for hybrid Ro-Ro vessels",
    long_about = None
)]
struct Cli {
    /// Configuration file (falls back to RORO_EMS_CONFIG, then ./roro-ems.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recommend a power split for one set of operating conditions
    Advise(AdviseArgs),
    /// Run the 24-hour voyage simulation
    Simulate(SimulateArgs),
    /// Simulate a voyage and compare it with the fixed baselines
    Compare(CompareArgs),
    /// List the configured scenario presets
    Scenarios,
}

#[derive(Debug, Clone, Args)]
struct AdviseArgs {
    /// Start from a named preset (see `scenarios`)
    #[arg(long)]
    scenario: Option<String>,

    /// Speed through water in knots
    #[arg(long)]
    speed: Option<f64>,

    /// Douglas sea state, 1 to 7
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    sea_state: Option<u8>,

    /// Cargo load in percent
    #[arg(long)]
    cargo: Option<f64>,

    /// Wind speed in m/s
    #[arg(long)]
    wind: Option<f64>,

    /// Significant wave height in metres
    #[arg(long)]
    wave: Option<f64>,

    /// Battery state of charge in percent
    #[arg(long)]
    battery: Option<f64>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Debug, Clone, Args)]
struct SimulateArgs {
    /// Seed for the sea-state jitter (overrides voyage.seed)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = TraceFormat::Text)]
    format: TraceFormat,
}

#[derive(Debug, Clone, Args)]
struct CompareArgs {
    /// Seed for the sea-state jitter (overrides voyage.seed)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let _guard = init_tracing(env!("CARGO_PKG_NAME"), &config.logging)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => AppConfig::from_path(path),
        None => AppConfig::load(&[DEFAULT_CONFIG_FILE]),
    }
}

fn execute<W: Write>(command: &Commands, config: &AppConfig, out: &mut W) -> Result<()> {
    match command {
        Commands::Advise(args) => advise(args, config, out),
        Commands::Simulate(args) => {
            let report = simulate(config, args.seed)?;
            match args.format {
                TraceFormat::Text => render::write_trace_text(out, &report),
                TraceFormat::Json => render::write_json(out, &report),
                TraceFormat::Csv => render::write_trace_csv(out, &report),
            }
        }
        Commands::Compare(args) => {
            let report = simulate(config, args.seed)?;
            let comparison = config.comparison_engine()?.compare(&report.summary);
            match args.format {
                ReportFormat::Text => {
                    render::write_comparison_text(out, &report.summary, &comparison)
                }
                ReportFormat::Json => render::write_json(
                    out,
                    &render::Comparison {
                        simulation: &report.summary,
                        comparison: &comparison,
                    },
                ),
            }
        }
        Commands::Scenarios => render::write_scenarios(out, &config.scenarios),
    }
}

fn advise<W: Write>(args: &AdviseArgs, config: &AppConfig, out: &mut W) -> Result<()> {
    let conditions = resolve_conditions(args, config)?;
    let recommendation = config
        .decision_engine()?
        .recommend(&conditions)
        .context("unable to evaluate operating conditions")?;
    info!(mode = %recommendation.mode, rule = %recommendation.rule, "recommendation ready");

    match args.format {
        ReportFormat::Text => render::write_advice_text(out, &conditions, &recommendation),
        ReportFormat::Json => render::write_json(
            out,
            &render::Advice {
                conditions: &conditions,
                sea_state_description: render::sea_state_label(conditions.sea_state),
                mode_label_ar: recommendation.mode.label_ar(),
                recommendation: &recommendation,
            },
        ),
    }
}

/// Preset (or the baseline snapshot) with any explicit values layered on top.
fn resolve_conditions(args: &AdviseArgs, config: &AppConfig) -> Result<OperatingConditions> {
    let mut conditions = match &args.scenario {
        Some(name) => *config.scenario(name).ok_or_else(|| {
            anyhow!(
                "unknown scenario '{}'; available: {}",
                name,
                config
                    .scenarios
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?,
        None => baseline_conditions(),
    };
    if let Some(speed) = args.speed {
        conditions.speed_knots = speed;
    }
    if let Some(sea_state) = args.sea_state {
        conditions.sea_state = sea_state;
    }
    if let Some(cargo) = args.cargo {
        conditions.cargo_percent = cargo;
    }
    if let Some(wind) = args.wind {
        conditions.wind_ms = wind;
    }
    if let Some(wave) = args.wave {
        conditions.wave_height_m = wave;
    }
    if let Some(battery) = args.battery {
        conditions.battery_soc_percent = battery;
    }
    conditions
        .validate()
        .context("operating conditions out of range")?;
    Ok(conditions)
}

fn simulate(config: &AppConfig, seed: Option<u64>) -> Result<SimulationReport> {
    let rng = match seed.or(config.voyage.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine =
        SimulationEngine::with_rng(config.decision_engine()?, config.simulation_settings(), rng)
            .context("invalid simulation settings")?;
    let report = engine.run().context("voyage simulation failed")?;
    Ok(report)
}
