// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for daq.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Settings;
use crate::output::FileConflict;

/// daq - poll a deformation/temperature probe, log it and plot it
#[derive(Parser, Debug)]
#[command(name = "daq")]
#[command(version, about = "Serial sensor acquisition with live terminal plots")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether this invocation takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Run(_)))
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive acquisition screen (default when no command given)
    Run(RunArgs),

    /// Headless acquisition: poll N times, print and save each sample
    Record(RecordArgs),

    /// List serial ports on this machine
    Ports,

    /// Show or manage configuration
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// Serial link and cadence overrides shared by `run` and `record`
#[derive(clap::Args, Debug, Default, Clone)]
pub struct LinkArgs {
    /// Serial port (e.g. /dev/ttyACM0, COM3)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Polling interval in milliseconds
    #[arg(short, long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Use a simulated sensor instead of the serial port
    #[arg(long)]
    pub simulate: bool,
}

impl LinkArgs {
    /// Layer command-line values over the loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(port) = &self.port {
            settings.serial.port = port.clone();
        }
        if let Some(baud) = self.baud {
            settings.serial.baud_rate = baud;
        }
        if let Some(interval) = self.interval_ms {
            settings.acquisition.interval_ms = interval;
        }
        if self.simulate {
            settings.acquisition.simulate = true;
        }
    }
}

/// Arguments for the run subcommand
#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub link: LinkArgs,

    /// Output file pre-filled in the file field
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the record subcommand
#[derive(clap::Args, Debug)]
pub struct RecordArgs {
    #[command(flatten)]
    pub link: LinkArgs,

    /// Number of polls to perform
    #[arg(short = 'n', long)]
    pub samples: u64,

    /// Output file (defaults to output.default_file from settings)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to do if the output file exists
    #[arg(long)]
    pub conflict: Option<ConflictArg>,

    /// Write elapsed seconds as a leading column
    #[arg(long)]
    pub time_column: bool,
}

/// Non-interactive answers to the file-exists question
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    Overwrite,
    Append,
}

impl From<ConflictArg> for FileConflict {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Overwrite => FileConflict::Overwrite,
            ConflictArg::Append => FileConflict::Append,
        }
    }
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the effective settings
    Show,
    /// Print the settings file location
    Path,
    /// Write default settings to the settings file
    Reset,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_is_interactive() {
        let cli = Cli::try_parse_from(["daq"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_run_with_link_flags() {
        let cli = Cli::try_parse_from([
            "daq",
            "run",
            "--port",
            "/dev/ttyUSB0",
            "-b",
            "9600",
            "--interval-ms",
            "500",
            "-o",
            "run.txt",
        ])
        .unwrap();

        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.link.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(args.link.baud, Some(9600));
        assert_eq!(args.link.interval_ms, Some(500));
        assert_eq!(args.output, Some(PathBuf::from("run.txt")));
    }

    #[test]
    fn test_record_args() {
        let cli = Cli::try_parse_from([
            "daq",
            "record",
            "-n",
            "10",
            "--simulate",
            "--conflict",
            "append",
            "--time-column",
        ])
        .unwrap();

        assert!(!cli.is_interactive());
        let Some(Commands::Record(args)) = cli.command else {
            panic!("expected record");
        };
        assert_eq!(args.samples, 10);
        assert!(args.link.simulate);
        assert_eq!(args.conflict, Some(ConflictArg::Append));
        assert!(args.time_column);
    }

    #[test]
    fn test_record_requires_samples() {
        assert!(Cli::try_parse_from(["daq", "record"]).is_err());
    }

    #[test]
    fn test_settings_alias_and_global_flags() {
        let cli = Cli::try_parse_from(["daq", "config", "show", "--format", "json", "-vv"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Settings(SettingsArgs {
                command: SettingsCommands::Show
            }))
        ));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_link_args_apply() {
        let mut settings = Settings::default();
        let link = LinkArgs {
            port: Some("COM4".to_string()),
            baud: Some(57600),
            interval_ms: Some(200),
            simulate: true,
        };
        link.apply(&mut settings);

        assert_eq!(settings.serial.port, "COM4");
        assert_eq!(settings.serial.baud_rate, 57600);
        assert_eq!(settings.acquisition.interval_ms, 200);
        assert!(settings.acquisition.simulate);
    }

    #[test]
    fn test_link_args_empty_keeps_settings() {
        let mut settings = Settings::default();
        settings.acquisition.simulate = true;
        LinkArgs::default().apply(&mut settings);
        assert_eq!(settings, {
            let mut s = Settings::default();
            s.acquisition.simulate = true;
            s
        });
    }

    #[test]
    fn test_conflict_arg_into_file_conflict() {
        assert_eq!(
            FileConflict::from(ConflictArg::Overwrite),
            FileConflict::Overwrite
        );
        assert_eq!(FileConflict::from(ConflictArg::Append), FileConflict::Append);
    }
}
