// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Sensor link
//!
//! The acquisition board answers a one-byte request with one ASCII line per
//! channel. Channel 0 is the deformation transducer, channel 1 the
//! temperature probe. [`Sensor`] is the seam the acquisition session polls;
//! implementations cover the real serial link, a simulated board, and a
//! scripted double for tests.

pub mod scripted;
pub mod serial;
pub mod simulated;

pub use scripted::ScriptedSensor;
pub use serial::{available_ports, open_serial, PortInfo, SerialLink, SerialSensor, Transport};
pub use simulated::SimulatedSensor;

use crate::config::Settings;
use crate::error::Result;

/// Number of channels the board reports per request
pub const CHANNELS: usize = 2;

/// One raw measurement pair, before calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub deformation: f64,
    pub temperature: f64,
}

impl Reading {
    pub fn new(deformation: f64, temperature: f64) -> Self {
        Self {
            deformation,
            temperature,
        }
    }
}

/// Anything that can be asked for a reading
pub trait Sensor {
    /// Short description shown in the UI and logs
    fn name(&self) -> &str;

    /// Request and read one measurement pair. Blocks up to the link timeout.
    fn poll(&mut self) -> Result<Reading>;
}

impl<S: Sensor + ?Sized> Sensor for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn poll(&mut self) -> Result<Reading> {
        (**self).poll()
    }
}

/// Build the sensor selected by the settings.
pub fn connect(settings: &Settings) -> Result<Box<dyn Sensor>> {
    if settings.acquisition.simulate {
        tracing::info!("using simulated sensor");
        return Ok(Box::new(SimulatedSensor::new()));
    }
    let link = SerialLink::from_settings(settings);
    Ok(Box::new(open_serial(&link)?))
}
