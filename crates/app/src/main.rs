//! Trackprobe CLI - Main Entry Point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trackprobe::{Filter, Harness, Marker, Suite, catalogue, runner};
use trackprobe_infrastructure::SettingsLoader;

/// Trackprobe - acceptance checks for an issue tracker REST API
#[derive(Parser)]
#[command(name = "trackprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file (defaults to ./trackprobe.toml when present)
    #[arg(long, env = "TRACKPROBE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scenarios against the configured tracker
    Run {
        /// Only run these suites
        #[arg(long = "suite", value_enum)]
        suites: Vec<Suite>,

        /// Only run scenarios with these markers
        #[arg(long = "marker", value_enum)]
        markers: Vec<Marker>,

        /// Print the selected scenarios without running them
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Run {
            suites,
            markers,
            list,
        } => {
            let selected = Filter { suites, markers }.select(&catalogue());
            if list {
                for scenario in &selected {
                    println!("{}::{} [{}]", scenario.suite, scenario.name, scenario.marker);
                }
                return Ok(ExitCode::SUCCESS);
            }

            let loader = match cli.config {
                Some(path) => SettingsLoader::new().with_file(path),
                None => SettingsLoader::new(),
            };
            let settings = loader.load().context("failed to load settings")?;
            tracing::info!(
                "Starting trackprobe v{} against {}",
                env!("CARGO_PKG_VERSION"),
                settings.base_url
            );

            let harness = Harness::new(settings)?;
            let report = runner::run(&harness, &selected);
            for outcome in &report.outcomes {
                println!("{outcome}");
            }
            println!("{} passed, {} failed", report.passed(), report.failed());

            Ok(if report.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
