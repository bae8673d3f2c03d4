// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Start/pause state machine and the per-tick measurement cycle

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use super::{Calibration, Sample, SeriesSet, Stopwatch, Ticker};
use crate::config::Settings;
use crate::device::Sensor;
use crate::error::Result;
use crate::output::{format_value, OutputTarget, Recorder};

/// Event log entries kept for display
pub const EVENT_LOG_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// What a tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Session is paused; nothing was polled
    Idle,
    /// A sample was taken, plotted and written
    Recorded(Sample),
    /// The poll failed; the session keeps running
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub text: String,
    pub is_error: bool,
}

/// Bounded, append-only measurement and status log
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), false);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), true);
    }

    fn push(&mut self, text: String, is_error: bool) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at: Local::now(),
            text,
            is_error,
        });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct Session<S: Sensor> {
    sensor: S,
    calibration: Calibration,
    stopwatch: Stopwatch,
    ticker: Ticker,
    series: SeriesSet,
    recorder: Option<Recorder>,
    time_column: bool,
    state: RunState,
    log: EventLog,
    samples: usize,
    failures: usize,
}

impl<S: Sensor> Session<S> {
    pub fn new(sensor: S, settings: &Settings) -> Self {
        Self {
            sensor,
            calibration: Calibration::from(&settings.calibration),
            stopwatch: Stopwatch::new(),
            ticker: Ticker::new(settings.interval()),
            series: SeriesSet::new(settings.plot.max_points),
            recorder: None,
            time_column: settings.output.time_column,
            state: RunState::Paused,
            log: EventLog::default(),
            samples: 0,
            failures: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn sensor_name(&self) -> &str {
        self.sensor.name()
    }

    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Whether recorded lines carry a leading elapsed-seconds column
    pub fn time_column(&self) -> bool {
        self.time_column
    }

    /// Samples recorded since the session was created
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Polls that failed since the session was created
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.stopwatch.elapsed_at(now)
    }

    pub fn start(&mut self, target: &OutputTarget) {
        self.start_at(target, Instant::now());
    }

    /// Paused → Running, writing to an already-checked output file.
    pub fn start_at(&mut self, target: &OutputTarget, now: Instant) {
        if self.is_running() {
            return;
        }
        self.recorder = Some(Recorder::new(target, self.time_column));
        self.stopwatch.resume_at(now);
        self.ticker.arm(now);
        self.state = RunState::Running;

        let mode = if target.appending {
            "appending to"
        } else {
            "writing"
        };
        tracing::info!(path = %target.path.display(), appending = target.appending, "acquisition started");
        self.log
            .info(format!("started, {} {}", mode, target.path.display()));
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Running → Paused. The output file is released.
    pub fn pause_at(&mut self, now: Instant) {
        if !self.is_running() {
            return;
        }
        self.stopwatch.pause_at(now);
        self.ticker.disarm();
        self.state = RunState::Paused;

        let written = self.recorder.take().map_or(0, |r| r.lines_written());
        tracing::info!(lines = written, "acquisition paused");
        self.log.info(format!("paused after {} lines", written));
    }

    /// Run a tick if the ticker says one is due.
    pub fn tick_if_due(&mut self, now: Instant) -> Result<Option<TickOutcome>> {
        if !self.ticker.due(now) {
            return Ok(None);
        }
        self.tick_at(now).map(Some)
    }

    /// One measurement cycle: poll, calibrate, stamp, log, plot, save.
    ///
    /// A failed poll skips this tick and leaves the session running. A
    /// failed write pauses the session and is returned as an error.
    pub fn tick_at(&mut self, now: Instant) -> Result<TickOutcome> {
        if !self.is_running() {
            return Ok(TickOutcome::Idle);
        }
        self.ticker.mark(now);

        let raw = match self.sensor.poll() {
            Ok(raw) => raw,
            Err(e) => {
                self.failures += 1;
                tracing::warn!(error = %e, sensor = self.sensor.name(), "poll failed");
                let msg = e.to_string();
                self.log.error(msg.clone());
                return Ok(TickOutcome::Skipped(msg));
            }
        };

        let reading = self.calibration.apply(raw);
        let sample = Sample {
            elapsed_secs: self.stopwatch.elapsed_at(now).as_secs_f64(),
            deformation: reading.deformation,
            temperature: reading.temperature,
        };

        self.log.info(format!(
            "{}\t{}",
            format_value(sample.deformation),
            format_value(sample.temperature)
        ));
        self.series.push(&sample);

        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.append(&sample) {
                tracing::error!(error = %e, "failed to write sample");
                self.log.error(format!("write failed: {}", e));
                self.pause_at(now);
                return Err(e);
            }
        }
        self.samples += 1;
        tracing::debug!(
            t = sample.elapsed_secs,
            deformation = sample.deformation,
            temperature = sample.temperature,
            "sample recorded"
        );

        Ok(TickOutcome::Recorded(sample))
    }

    /// How long a caller may block before the next tick is due.
    pub fn wait(&self, now: Instant) -> Duration {
        self.ticker.wait(now)
    }

    /// Empty the plots and restart the time axis at zero.
    pub fn clear_plots(&mut self, now: Instant) {
        self.series.clear();
        self.stopwatch.reset_at(now);
        self.log.info("plots cleared");
    }
}
