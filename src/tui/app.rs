// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Application state and logic
//!
//! Manages the acquisition screen: the Start/Pause toggle, the output file
//! field, the file-conflict prompt and the status line.

use std::time::Instant;

use crate::acquisition::{Session, TickOutcome};
use crate::config::Settings;
use crate::device::Sensor;
use crate::error::DaqError;
use crate::output::{check_output, FileConflict};

/// Result of input handling
pub enum AppResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Input mode for the acquisition screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Toggle, clear, quit
    Normal,
    /// Typing the output file name
    EditingFile,
    /// Output file exists; waiting for overwrite/append/new name
    ConfirmConflict,
}

/// Main application state
pub struct App {
    pub session: Session<Box<dyn Sensor>>,
    /// Output file name as shown in the field
    pub output_file: String,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(sensor: Box<dyn Sensor>, settings: &Settings) -> Self {
        let output_file = settings
            .output
            .default_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        Self {
            session: Session::new(sensor, settings),
            output_file,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status_message: None,
            status_is_error: false,
        }
    }

    /// Label for the toggle: the action it will perform.
    pub fn toggle_label(&self) -> &'static str {
        if self.session.is_running() {
            "Pause"
        } else {
            "Start"
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = Some(message.into());
        self.status_is_error = is_error;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.session.is_running() {
            self.session.pause_at(now);
            self.set_status("Paused", false);
        } else {
            self.request_start(None, now);
        }
    }

    /// Run the output-file check and start if it passes.
    pub fn request_start(&mut self, conflict: Option<FileConflict>, now: Instant) {
        match check_output(&self.output_file, conflict) {
            Ok(target) => {
                self.input_mode = InputMode::Normal;
                self.session.start_at(&target, now);
                self.set_status(format!("Recording to {}", target.path.display()), false);
            }
            Err(DaqError::FileExists(path)) => {
                self.input_mode = InputMode::ConfirmConflict;
                self.set_status(format!("{} already exists", path.display()), false);
            }
            Err(DaqError::InvalidInput(msg)) => {
                self.set_status(capitalize(&msg), true);
                self.start_editing();
            }
            Err(e) => {
                tracing::error!(error = %e, "output file check failed");
                self.set_status(e.to_string(), true);
            }
        }
    }

    /// Answer to the conflict prompt.
    pub fn resolve_conflict(&mut self, choice: FileConflict, now: Instant) {
        if self.input_mode != InputMode::ConfirmConflict {
            return;
        }
        match choice {
            FileConflict::Rename => {
                self.input_mode = InputMode::Normal;
                self.set_status("Enter a new output file name", false);
                self.start_editing();
            }
            FileConflict::Overwrite | FileConflict::Append => {
                self.request_start(Some(choice), now);
            }
        }
    }

    pub fn start_editing(&mut self) {
        if self.session.is_running() {
            self.set_status("Pause before changing the output file", true);
            return;
        }
        self.input_buffer = self.output_file.clone();
        self.input_mode = InputMode::EditingFile;
    }

    pub fn confirm_edit(&mut self) {
        if self.input_mode != InputMode::EditingFile {
            return;
        }
        self.output_file = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        self.input_mode = InputMode::Normal;
        if self.output_file.is_empty() {
            self.set_status("Output file cleared", false);
        } else {
            self.set_status(format!("Output file: {}", self.output_file), false);
        }
    }

    pub fn cancel_editing(&mut self) {
        self.input_buffer.clear();
        self.input_mode = InputMode::Normal;
        self.clear_status();
    }

    pub fn clear_plots(&mut self, now: Instant) {
        self.session.clear_plots(now);
        self.set_status("Plots cleared", false);
    }

    /// Drive the session clock; called once per loop iteration.
    pub fn on_tick(&mut self, now: Instant) {
        match self.session.tick_if_due(now) {
            Ok(Some(TickOutcome::Skipped(msg))) => self.set_status(msg, true),
            Ok(Some(TickOutcome::Recorded(_))) => {
                if self.status_is_error {
                    self.clear_status();
                }
            }
            Ok(Some(TickOutcome::Idle)) | Ok(None) => {}
            Err(e) => self.set_status(format!("Paused: {}", e), true),
        }
    }

    /// Stop acquisition before leaving.
    pub fn shutdown(&mut self) {
        self.session.pause();
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
