// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;

use clap::Parser;
use daq::cli::{Cli, Commands, OutputFormat};
use daq::config::Settings;
use daq::error::DaqError;
use tempfile::TempDir;

#[test]
fn test_global_config_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["daq", "ports", "--config", "/tmp/daq.json"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Ports)));
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/daq.json")));
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Cli::try_parse_from(["daq", "--format", "yaml"]).is_err());
}

#[test]
fn test_run_settings_layering() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"serial": {"port": "/dev/ttyUSB1"}, "acquisition": {"interval_ms": 250}}"#,
    )
    .unwrap();
    let mut settings = Settings::load_from(&path).unwrap();

    let cli = Cli::try_parse_from(["daq", "run", "--simulate", "-b", "9600"]).unwrap();
    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run");
    };
    args.link.apply(&mut settings);

    // File values survive unless a flag overrides them
    assert_eq!(settings.serial.port, "/dev/ttyUSB1");
    assert_eq!(settings.acquisition.interval_ms, 250);
    assert_eq!(settings.serial.baud_rate, 9600);
    assert!(settings.acquisition.simulate);
    assert_eq!(cli.format, OutputFormat::Text);
}

#[test]
fn test_invalid_settings_file_reports_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"serial": {"baud_rate": 0}}"#).unwrap();

    match Settings::load_from(&path) {
        Err(DaqError::Config(msg)) => assert!(msg.contains("baud")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_error_display() {
    assert_eq!(
        DaqError::Protocol("empty line".to_string()).to_string(),
        "Protocol error: empty line"
    );
    assert_eq!(
        DaqError::FileExists(PathBuf::from("out.txt")).to_string(),
        "Output file already exists: out.txt"
    );
    assert_eq!(
        DaqError::Timeout.to_string(),
        "Timed out waiting for the device to answer"
    );
}
