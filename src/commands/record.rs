// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Headless acquisition
//!
//! Same session as the terminal UI, without the screen: each sample is
//! printed as a tab-delimited line on stdout and appended to the output
//! file; failed polls are reported on stderr.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use crate::acquisition::{Session, TickOutcome};
use crate::cli::args::RecordArgs;
use crate::config::Settings;
use crate::device::{self, Sensor};
use crate::error::{DaqError, Result};
use crate::output::{check_output, format_line, OutputTarget};

/// Counts from a finished recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSummary {
    pub recorded: u64,
    pub skipped: u64,
}

/// Execute the record command
pub fn execute(args: &RecordArgs, mut settings: Settings) -> Result<()> {
    args.link.apply(&mut settings);
    if args.time_column {
        settings.output.time_column = true;
    }
    settings.validate()?;

    let output = resolve_output(args.output.as_ref(), &settings)?;

    // The conflict check may truncate; only reach it with an open link.
    let sensor = device::connect(&settings)?;
    let mut session = Session::new(sensor, &settings);

    let target = check_output(&output.display().to_string(), args.conflict.map(Into::into))
        .map_err(|e| match e {
            DaqError::FileExists(path) => DaqError::InvalidInput(format!(
                "{} exists; pass --conflict overwrite or --conflict append",
                path.display()
            )),
            other => other,
        })?;

    eprintln!(
        "Recording {} polls every {} ms from {}",
        args.samples,
        session.interval().as_millis(),
        session.sensor_name()
    );

    let stdout = std::io::stdout();
    let summary = record(&mut session, &target, args.samples, &mut stdout.lock())?;

    eprintln!(
        "{} samples written to {} ({} skipped)",
        summary.recorded,
        target.path.display(),
        summary.skipped
    );
    Ok(())
}

fn resolve_output(arg: Option<&PathBuf>, settings: &Settings) -> Result<PathBuf> {
    arg.or(settings.output.default_file.as_ref())
        .cloned()
        .ok_or_else(|| {
            DaqError::InvalidInput(
                "specify an output file with --output or output.default_file".to_string(),
            )
        })
}

/// Run `polls` ticks at the session's cadence, echoing samples to `out`.
///
/// Every tick counts toward `polls`, whether it recorded or was skipped.
pub fn record<S: Sensor, W: Write>(
    session: &mut Session<S>,
    target: &OutputTarget,
    polls: u64,
    out: &mut W,
) -> Result<RecordSummary> {
    let mut summary = RecordSummary::default();
    let time_column = session.time_column();

    session.start(target);
    while summary.recorded + summary.skipped < polls {
        std::thread::sleep(session.wait(Instant::now()));

        match session.tick_if_due(Instant::now())? {
            Some(TickOutcome::Recorded(sample)) => {
                summary.recorded += 1;
                out.write_all(format_line(&sample, time_column).as_bytes())?;
                out.flush()?;
            }
            Some(TickOutcome::Skipped(msg)) => {
                summary.skipped += 1;
                eprintln!("warning: {}", msg);
            }
            Some(TickOutcome::Idle) | None => {}
        }
    }
    session.pause();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{ConflictArg, LinkArgs};
    use crate::device::{Reading, ScriptedSensor};
    use tempfile::TempDir;

    fn fast_settings() -> Settings {
        let mut settings = Settings::default();
        settings.acquisition.interval_ms = 5;
        settings
    }

    #[test]
    fn test_record_writes_file_and_stdout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let target = check_output(path.to_str().unwrap(), None).unwrap();

        let sensor = ScriptedSensor::from_pairs(&[(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)]);
        let mut session = Session::new(sensor, &fast_settings());
        let mut out = Vec::new();

        let summary = record(&mut session, &target, 3, &mut out).unwrap();

        assert_eq!(summary, RecordSummary { recorded: 3, skipped: 0 });
        let expected = "1.0\t10.0\n2.0\t20.0\n3.0\t30.0\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
        assert!(!session.is_running());
    }

    #[test]
    fn test_record_counts_skipped_polls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let target = check_output(path.to_str().unwrap(), None).unwrap();

        let sensor = ScriptedSensor::new(vec![
            Ok(Reading::new(1.0, 1.0)),
            Err(DaqError::Protocol("garbled".into())),
            Ok(Reading::new(2.0, 2.0)),
        ]);
        let mut session = Session::new(sensor, &fast_settings());
        let mut out = Vec::new();

        let summary = record(&mut session, &target, 3, &mut out).unwrap();

        assert_eq!(summary, RecordSummary { recorded: 2, skipped: 1 });
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "1.0\t1.0\n2.0\t2.0\n"
        );
    }

    #[test]
    fn test_record_time_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let target = check_output(path.to_str().unwrap(), None).unwrap();

        let mut settings = fast_settings();
        settings.output.time_column = true;
        let mut session = Session::new(ScriptedSensor::from_pairs(&[(1.0, 2.0)]), &settings);
        let mut out = Vec::new();
        record(&mut session, &target, 1, &mut out).unwrap();

        let line = String::from_utf8(out).unwrap();
        let columns: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(columns.len(), 3);
        assert!(columns[0].parse::<f64>().unwrap() > 0.0);
        assert_eq!(&columns[1..], ["1.0", "2.0"]);
    }

    fn record_args(output: PathBuf, conflict: Option<ConflictArg>) -> RecordArgs {
        RecordArgs {
            link: LinkArgs::default(),
            samples: 1,
            output: Some(output),
            conflict,
            time_column: false,
        }
    }

    #[test]
    fn test_execute_bad_port_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, "precious\t1.0\n").unwrap();

        let mut args = record_args(path.clone(), Some(ConflictArg::Overwrite));
        args.link.port = Some(dir.path().join("no-such-tty").display().to_string());

        let err = execute(&args, fast_settings()).unwrap_err();
        assert!(matches!(err, DaqError::Serial(_)));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "precious\t1.0\n"
        );
    }

    #[test]
    fn test_execute_existing_file_without_conflict_choice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, "old\n").unwrap();

        let mut args = record_args(path.clone(), None);
        args.link.simulate = true;

        match execute(&args, fast_settings()) {
            Err(DaqError::InvalidInput(msg)) => assert!(msg.contains("--conflict")),
            other => panic!("expected invalid input, got {:?}", other),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_resolve_output_prefers_flag() {
        let mut settings = Settings::default();
        settings.output.default_file = Some(PathBuf::from("default.txt"));

        let flag = PathBuf::from("flag.txt");
        assert_eq!(resolve_output(Some(&flag), &settings).unwrap(), flag);
        assert_eq!(
            resolve_output(None, &settings).unwrap(),
            PathBuf::from("default.txt")
        );
        assert!(resolve_output(None, &Settings::default()).is_err());
    }
}
