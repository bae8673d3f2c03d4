// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! daq - serial sensor acquisition with live terminal plots
//!
//! Main entry point for the CLI application.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use daq::cli::{Cli, Commands, RunArgs};
use daq::commands;
use daq::config::Settings;
use daq::device::{self, Sensor};
use daq::error::Result;
use daq::tui;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(&cli)?;

    // Load settings
    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load_from(&settings_path)?;

    // Dispatch to appropriate command
    match &cli.command {
        None => run_interactive(&RunArgs::default(), settings)?,
        Some(Commands::Run(args)) => run_interactive(args, settings)?,
        Some(Commands::Record(args)) => commands::record::execute(args, settings)?,
        Some(Commands::Ports) => commands::ports::execute(&cli.format)?,
        Some(Commands::Settings(args)) => {
            commands::settings::execute(args, &settings, &settings_path, &cli.format)?
        }
    }

    Ok(())
}

fn run_interactive(args: &RunArgs, mut settings: Settings) -> Result<()> {
    args.link.apply(&mut settings);
    if let Some(output) = &args.output {
        settings.output.default_file = Some(output.clone());
    }
    settings.validate()?;

    let sensor = device::connect(&settings)?;
    tracing::info!(sensor = sensor.name(), "starting acquisition screen");
    tui::run_tui(&settings, sensor)
}

/// The acquisition screen owns the terminal, so its diagnostics go to a
/// log file; every other command logs to stderr.
fn init_tracing(cli: &Cli) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_env_filter(rust_log.as_deref(), cli.verbose);

    if cli.is_interactive() {
        let log_path: PathBuf = Settings::log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

/// `RUST_LOG` when set and valid, WARN otherwise; `-v`/`-vv` then raise the
/// `daq` targets.
fn build_env_filter(rust_log: Option<&str>, verbose: u8) -> EnvFilter {
    let mut env_filter = rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let directives: &[&str] = match verbose {
        0 => &[],
        1 => &["daq=debug"],
        _ => &["daq=trace"],
    };
    for directive in directives {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }
    env_filter
}
