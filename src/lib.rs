// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! daq - poll a two-channel deformation/temperature probe over a serial
//! link, append each sample to a text file and plot it live.
//!
//! This crate exposes the shared runtime used by the `daq` binary
//! (`src/main.rs`) for both the interactive screen and headless recording.
//!
//! Architecture highlights:
//! - `device`: the `Sensor` seam and its serial, simulated and scripted sources
//! - `acquisition`: session state machine, stopwatch, tick scheduling, plot series
//! - `output`: output-file checks and the append-only recorder
//! - `tui`: the ratatui acquisition screen
//! - `cli`, `commands`, `config`: argument parsing, subcommands, JSON settings

pub mod acquisition;
pub mod cli;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod output;
pub mod tui;

pub use error::{DaqError, Result};
