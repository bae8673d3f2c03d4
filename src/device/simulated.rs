// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Simulated board for running without hardware

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Reading, Sensor};
use crate::error::Result;

/// Upper bound (exclusive) of simulated raw values
pub const SIMULATED_RANGE: f64 = 1000.0;

/// Returns uniformly random readings in `[0, SIMULATED_RANGE)` on both channels
pub struct SimulatedSensor {
    rng: StdRng,
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence, for reproducible demos and tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sensor for SimulatedSensor {
    fn name(&self) -> &str {
        "simulated"
    }

    fn poll(&mut self) -> Result<Reading> {
        Ok(Reading::new(
            self.rng.random_range(0.0..SIMULATED_RANGE),
            self.rng.random_range(0.0..SIMULATED_RANGE),
        ))
    }
}
