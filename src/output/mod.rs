// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Measurement file
//!
//! Samples are written as tab-delimited text, one line per tick:
//!
//! ```text
//! deformation<TAB>temperature
//! ```
//!
//! With the time column enabled, elapsed seconds come first. The file is
//! opened for each line and closed again; nothing holds it between ticks.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::acquisition::Sample;
use crate::error::{DaqError, Result};

/// What to do when the chosen output file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileConflict {
    /// Truncate and start over
    Overwrite,
    /// Keep existing lines, add new ones at the end
    Append,
    /// Abort so a different name can be entered
    Rename,
}

/// An output file that passed the start-time check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    /// True when earlier content was kept
    pub appending: bool,
}

/// Validate the output name before a run starts.
///
/// A missing file is created empty. An existing file needs a
/// [`FileConflict`] decision; without one this returns
/// [`DaqError::FileExists`] so the caller can ask.
pub fn check_output(name: &str, conflict: Option<FileConflict>) -> Result<OutputTarget> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DaqError::InvalidInput(
            "specify an output file name".to_string(),
        ));
    }
    let path = PathBuf::from(name);

    if path.is_dir() {
        return Err(DaqError::InvalidInput(format!(
            "{} is a directory",
            path.display()
        )));
    }

    if !path.exists() {
        File::create(&path)?;
        tracing::debug!(path = %path.display(), "created output file");
        return Ok(OutputTarget {
            path,
            appending: false,
        });
    }

    match conflict {
        None => Err(DaqError::FileExists(path)),
        Some(FileConflict::Rename) => Err(DaqError::InvalidInput(
            "choose a different output file name".to_string(),
        )),
        Some(FileConflict::Overwrite) => {
            File::create(&path)?;
            tracing::info!(path = %path.display(), "overwriting output file");
            Ok(OutputTarget {
                path,
                appending: false,
            })
        }
        Some(FileConflict::Append) => {
            tracing::info!(path = %path.display(), "appending to output file");
            Ok(OutputTarget {
                path,
                appending: true,
            })
        }
    }
}

/// Appends sample lines to an accepted output file
#[derive(Debug, Clone)]
pub struct Recorder {
    path: PathBuf,
    time_column: bool,
    lines_written: usize,
}

impl Recorder {
    pub fn new(target: &OutputTarget, time_column: bool) -> Self {
        Self {
            path: target.path.clone(),
            time_column,
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn append(&mut self, sample: &Sample) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(format_line(sample, self.time_column).as_bytes())?;
        self.lines_written += 1;
        Ok(())
    }
}

/// One output line, newline included.
pub fn format_line(sample: &Sample, time_column: bool) -> String {
    if time_column {
        format!(
            "{}\t{}\t{}\n",
            format_value(sample.elapsed_secs),
            format_value(sample.deformation),
            format_value(sample.temperature)
        )
    } else {
        format!(
            "{}\t{}\n",
            format_value(sample.deformation),
            format_value(sample.temperature)
        )
    }
}

/// Shortest round-trip float text in plain decimal notation, keeping a
/// decimal point on whole numbers
pub fn format_value(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn sample(t: f64, d: f64, temp: f64) -> Sample {
        Sample {
            elapsed_secs: t,
            deformation: d,
            temperature: temp,
        }
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = check_output("   ", None).unwrap_err();
        assert!(matches!(err, DaqError::InvalidInput(_)));
        assert!(err.to_string().contains("specify"));
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");

        let target = check_output(path_str(&path), None).unwrap();
        assert!(path.exists());
        assert!(!target.appending);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_existing_file_needs_decision() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, "old\n").unwrap();

        let err = check_output(path_str(&path), None).unwrap_err();
        assert!(matches!(&err, DaqError::FileExists(p) if *p == path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_existing_file_overwrite_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, "old\n").unwrap();

        let target = check_output(path_str(&path), Some(FileConflict::Overwrite)).unwrap();
        assert!(!target.appending);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_existing_file_append_keeps_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, "old\n").unwrap();

        let target = check_output(path_str(&path), Some(FileConflict::Append)).unwrap();
        assert!(target.appending);

        let mut recorder = Recorder::new(&target, false);
        recorder.append(&sample(0.0, 1.5, 22.0)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n1.5\t22.0\n");
    }

    #[test]
    fn test_existing_file_rename_aborts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        std::fs::write(&path, "old\n").unwrap();

        let err = check_output(path_str(&path), Some(FileConflict::Rename)).unwrap_err();
        assert!(matches!(err, DaqError::InvalidInput(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let err = check_output(path_str(dir.path()), None).unwrap_err();
        assert!(matches!(err, DaqError::InvalidInput(_)));
    }

    #[test]
    fn test_recorder_appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        let target = check_output(path_str(&path), None).unwrap();

        let mut recorder = Recorder::new(&target, false);
        recorder.append(&sample(1.0, 0.5, 20.25)).unwrap();
        recorder.append(&sample(2.0, 0.75, 21.0)).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "0.5\t20.25\n0.75\t21.0\n"
        );
        assert_eq!(recorder.lines_written(), 2);
    }

    #[test]
    fn test_recorder_time_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.txt");
        let target = check_output(path_str(&path), None).unwrap();

        let mut recorder = Recorder::new(&target, true);
        recorder.append(&sample(3.0, 0.5, 20.0)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3.0\t0.5\t20.0\n");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.0), "1.0");
        assert_eq!(format_value(0.1), "0.1");
        assert_eq!(format_value(-273.15), "-273.15");
        assert_eq!(format_value(512.0), "512.0");
    }

    #[test]
    fn test_format_value_never_uses_exponent() {
        assert_eq!(format_value(0.00005), "0.00005");
        assert_eq!(format_value(1e-7), "0.0000001");
        assert_eq!(format_value(1e16), "10000000000000000.0");
        assert_eq!(format_value(-2.5e-6), "-0.0000025");
    }
}
