//! `ember-modes`: map Ember generation records onto canonical production modes.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load reference tables and policy ([`load_config`]).
//! 3. Read records ([`read_records`]).
//! 4. Classify every record ([`ModeClassifier`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (clean) or `1` (at least one record rejected for a non-string mode).

mod cli;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use ember_modes::config::load_config;
use ember_modes::input::read_records;
use ember_modes::mode::classifier::ModeClassifier;
use ember_modes::models::ClassifiedRecord;
use ember_modes::report;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load tables and policy; --invalid-mode beats the file
    let cwd = std::env::current_dir()?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    if let Some(arg) = &cli.invalid_mode {
        config.invalid_mode = arg.into();
    }

    let records = read_records(&cli.input)?;

    if !cli.quiet {
        eprintln!(
            "  {} {} records (non-string modes: {})",
            "→".cyan(),
            records.len(),
            config.invalid_mode
        );
    }

    let classifier = ModeClassifier::new(config.modes, config.invalid_mode);
    let rows: Vec<ClassifiedRecord> = records
        .iter()
        .zip(classifier.classify_all(&records))
        .map(|(record, outcome)| ClassifiedRecord::from_outcome(record, outcome))
        .collect();

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&rows, &cli.input, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    // Exit code: 1 if any record was rejected
    if rows.iter().any(ClassifiedRecord::is_rejected) {
        std::process::exit(1);
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
