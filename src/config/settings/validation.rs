// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::time::Duration;

use crate::error::{DaqError, Result};

use super::Settings;

impl Settings {
    /// Reject values the acquisition loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.serial.port.trim().is_empty() {
            return Err(DaqError::Config("serial.port must not be empty".into()));
        }
        if self.serial.baud_rate == 0 {
            return Err(DaqError::Config("serial.baud_rate must be positive".into()));
        }
        if self.serial.timeout_ms == 0 {
            return Err(DaqError::Config("serial.timeout_ms must be positive".into()));
        }
        if !self.serial.command.is_ascii() {
            return Err(DaqError::Config(format!(
                "serial.command must be a single ASCII character, got {:?}",
                self.serial.command
            )));
        }
        if self.acquisition.interval_ms == 0 {
            return Err(DaqError::Config(
                "acquisition.interval_ms must be positive".into(),
            ));
        }
        for (name, map) in [
            ("deformation", self.calibration.deformation),
            ("temperature", self.calibration.temperature),
        ] {
            if !map.gain.is_finite() || !map.offset.is_finite() {
                return Err(DaqError::Config(format!(
                    "calibration.{} must be finite",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.acquisition.interval_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.timeout_ms)
    }
}
