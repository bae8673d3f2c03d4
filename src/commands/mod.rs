// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Non-interactive subcommands
//!
//! - `record`: headless acquisition for a fixed number of polls
//! - `ports`: list serial ports
//! - `settings`: show, locate or reset the settings file

pub mod ports;
pub mod record;
pub mod settings;
