//! Vehicle Check - Main Entry Point

use anyhow::Context;
use clap::{Parser, Subcommand};
use vehicle_check::{describe_plate, init_logging, read_input, validate_document, AppConfig};
use record_store::{seed, InMemoryStore};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use vehicle_validator::Validator;

#[derive(Debug, Parser)]
#[command(
    name = "vehicle-check",
    version,
    about = "Validate and normalize vehicle records from legal documents."
)]
struct Cli {
    /// Settings file (default: ./vehicle-check.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one vehicle record read as JSON ("-" for stdin).
    Validate { input: PathBuf },
    /// Validate the vehicle list of one document ("-" for stdin).
    ValidateSet { input: PathBuf },
    /// Show whether a plate is well formed and its normalized forms.
    Plate { value: String },
    /// Seed an in-memory store with the sample vehicles and print the report.
    Seed,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: failed to load settings: {err}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config.log_level, config.log_format);

    info!("=== Vehicle Check v{} ===", env!("CARGO_PKG_VERSION"));

    match run(cli.cmd, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Run one command; `Ok(false)` means the input was rejected
fn run(cmd: Command, config: &AppConfig) -> anyhow::Result<bool> {
    let validator = Validator::new(config.validation.clone());

    match cmd {
        Command::Validate { input } => {
            let report = validate_document(&validator, &read_input(&input)?, false)?;
            print_json(&report)?;
            Ok(report.valid)
        }
        Command::ValidateSet { input } => {
            let report = validate_document(&validator, &read_input(&input)?, true)?;
            print_json(&report)?;
            Ok(report.valid)
        }
        Command::Plate { value } => {
            let report = describe_plate(&value);
            print_json(&report)?;
            Ok(report.valid)
        }
        Command::Seed => {
            let store = InMemoryStore::new();
            let report = seed(&store, &validator).context("seeding failed")?;
            print_json(&report)?;
            Ok(true)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{text}");
    Ok(())
}
