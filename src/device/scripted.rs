// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Scripted sensor for testing
//!
//! Replays a queue of readings and errors so sessions can be exercised
//! without a serial port.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Reading, Sensor};
use crate::error::{DaqError, Result};

/// A sensor that returns pre-configured results in order
pub struct ScriptedSensor {
    script: VecDeque<Result<Reading>>,
    poll_count: Arc<AtomicUsize>,
}

impl ScriptedSensor {
    pub fn new(script: Vec<Result<Reading>>) -> Self {
        Self {
            script: script.into(),
            poll_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Script built from plain `(deformation, temperature)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(d, t)| Ok(Reading::new(d, t))).collect())
    }

    /// Shared counter that keeps working after the sensor is boxed away
    pub fn poll_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.poll_count)
    }
}

impl Sensor for ScriptedSensor {
    fn name(&self) -> &str {
        "scripted"
    }

    /// An exhausted script behaves like a board that stopped answering.
    fn poll(&mut self) -> Result<Reading> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        self.script.pop_front().unwrap_or(Err(DaqError::Timeout))
    }
}
