// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for daq
//!
//! Handles loading and saving settings from ~/.daq/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod io;
mod validation;

/// Main settings structure, stored in ~/.daq/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Serial link to the acquisition board
    #[serde(default)]
    pub serial: SerialConfig,

    /// Polling cadence and data source
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Raw-to-engineering-unit conversions
    #[serde(default)]
    pub calibration: CalibrationConfig,

    /// Measurement file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Plot settings
    #[serde(default)]
    pub plot: PlotConfig,
}

/// Serial port configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialConfig {
    /// Port path (e.g. /dev/ttyACM0 or COM3)
    #[serde(default = "default_port")]
    pub port: String,

    /// Baud rate
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Blocking read timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Request byte that asks the board for a reading
    #[serde(default = "default_command")]
    pub command: char,
}

/// Acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcquisitionConfig {
    /// Polling interval in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Use the simulated sensor instead of the serial port
    #[serde(default)]
    pub simulate: bool,
}

/// Linear conversion `gain * raw + offset`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinearConfig {
    #[serde(default = "default_gain")]
    pub gain: f64,

    #[serde(default)]
    pub offset: f64,
}

/// Calibration for both channels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct CalibrationConfig {
    /// Volts to millimetres
    #[serde(default)]
    pub deformation: LinearConfig,

    /// Raw counts to degrees Celsius
    #[serde(default)]
    pub temperature: LinearConfig,
}

/// Measurement file configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// File name pre-filled in the output field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_file: Option<PathBuf>,

    /// Write elapsed seconds as a leading column
    #[serde(default)]
    pub time_column: bool,
}

/// Plot configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlotConfig {
    /// Keep at most this many points per plot (0 = keep everything)
    #[serde(default)]
    pub max_points: usize,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            timeout_ms: default_timeout_ms(),
            command: default_command(),
        }
    }
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            simulate: false,
        }
    }
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            gain: default_gain(),
            offset: 0.0,
        }
    }
}

fn default_port() -> String {
    if cfg!(windows) {
        "COM3".to_string()
    } else {
        "/dev/ttyACM0".to_string()
    }
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_command() -> char {
    'w'
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_gain() -> f64 {
    1.0
}
