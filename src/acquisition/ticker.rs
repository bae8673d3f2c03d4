// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Fixed-rate deadline tracking
//!
//! The first tick fires one interval after arming. Late ticks are not
//! replayed: the next deadline is always one interval after the tick that
//! actually ran.

use std::time::{Duration, Instant};

/// Upper bound on how long the UI blocks for input while disarmed
pub const IDLE_WAIT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    pub fn due(&self, now: Instant) -> bool {
        self.next.is_some_and(|next| now >= next)
    }

    /// Record that a tick ran at `now`.
    pub fn mark(&mut self, now: Instant) {
        if self.next.is_some() {
            self.next = Some(now + self.interval);
        }
    }

    /// How long the caller may wait before the next tick is due.
    pub fn wait(&self, now: Instant) -> Duration {
        match self.next {
            Some(next) => next.saturating_duration_since(now).min(IDLE_WAIT),
            None => IDLE_WAIT,
        }
    }
}
