// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Acquisition session
//!
//! A [`Session`] ties a [`Sensor`](crate::device::Sensor) to the output file
//! and the plot series. It is a two-state machine (Paused/Running) driven by
//! a fixed-rate [`Ticker`]; each due tick polls once, calibrates, stamps the
//! reading with stopwatch time and fans it out to the event log, the plots
//! and the file.

pub mod calibration;
pub mod series;
pub mod session;
pub mod stopwatch;
pub mod ticker;

pub use calibration::{Calibration, LinearMap};
pub use series::{Bounds, Series, SeriesSet};
pub use session::{EventLog, LogEntry, RunState, Session, TickOutcome};
pub use stopwatch::Stopwatch;
pub use ticker::Ticker;

/// A calibrated reading stamped with run time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed_secs: f64,
    pub deformation: f64,
    pub temperature: f64,
}
