// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Raw-to-engineering-unit conversion

use crate::config::{CalibrationConfig, LinearConfig};
use crate::device::Reading;

/// `gain * raw + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap {
    pub gain: f64,
    pub offset: f64,
}

impl LinearMap {
    pub const IDENTITY: LinearMap = LinearMap {
        gain: 1.0,
        offset: 0.0,
    };

    pub fn apply(&self, raw: f64) -> f64 {
        self.gain * raw + self.offset
    }
}

impl Default for LinearMap {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<LinearConfig> for LinearMap {
    fn from(config: LinearConfig) -> Self {
        Self {
            gain: config.gain,
            offset: config.offset,
        }
    }
}

/// Per-channel conversions: volts to mm, raw counts to °C
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calibration {
    pub deformation: LinearMap,
    pub temperature: LinearMap,
}

impl Calibration {
    pub fn apply(&self, raw: Reading) -> Reading {
        Reading::new(
            self.deformation.apply(raw.deformation),
            self.temperature.apply(raw.temperature),
        )
    }
}

impl From<&CalibrationConfig> for Calibration {
    fn from(config: &CalibrationConfig) -> Self {
        Self {
            deformation: config.deformation.into(),
            temperature: config.temperature.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let cal = Calibration::default();
        let raw = Reading::new(12.5, -3.0);
        assert_eq!(cal.apply(raw), raw);
    }

    #[test]
    fn test_channels_are_independent() {
        let cal = Calibration {
            deformation: LinearMap {
                gain: 2.0,
                offset: 1.0,
            },
            temperature: LinearMap {
                gain: 0.1,
                offset: -40.0,
            },
        };

        let out = cal.apply(Reading::new(3.0, 500.0));
        assert_eq!(out.deformation, 7.0);
        assert!((out.temperature - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_config() {
        let mut config = CalibrationConfig::default();
        config.temperature.gain = 0.5;
        config.deformation.offset = 2.0;

        let cal = Calibration::from(&config);
        assert_eq!(cal.temperature.gain, 0.5);
        assert_eq!(cal.deformation.offset, 2.0);
        assert_eq!(cal.deformation.gain, 1.0);
    }
}
