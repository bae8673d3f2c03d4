// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Input handling for the TUI
//!
//! Handles keyboard input and maps to application actions.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use super::app::{App, AppResult, InputMode};
use crate::error::Result;
use crate::output::FileConflict;

/// Wait up to `timeout` for a key and apply it.
pub fn handle_input(app: &mut App, timeout: Duration) -> Result<AppResult> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                return Ok(AppResult::Continue);
            }
            return Ok(handle_key(app, key.code, key.modifiers, Instant::now()));
        }
    }

    Ok(AppResult::Continue)
}

/// Apply one key press.
pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers, now: Instant) -> AppResult {
    // Check for Ctrl+C to quit from anywhere
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return AppResult::Quit;
    }

    match app.input_mode {
        InputMode::Normal => return handle_normal_input(app, code, now),
        InputMode::EditingFile => handle_editing_input(app, code),
        InputMode::ConfirmConflict => handle_conflict_input(app, code, now),
    }

    AppResult::Continue
}

/// Handle input in normal mode
fn handle_normal_input(app: &mut App, key: KeyCode, now: Instant) -> AppResult {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return AppResult::Quit,

        KeyCode::Char(' ') | KeyCode::Char('s') => app.toggle(now),

        KeyCode::Char('e') | KeyCode::Tab => app.start_editing(),

        KeyCode::Char('c') => app.clear_plots(now),

        KeyCode::Char('?') => {
            app.set_status(
                "Space/s: Start/Pause | e/Tab: Output file | c: Clear plots | q: Quit",
                false,
            );
        }

        _ => {}
    }

    AppResult::Continue
}

/// Handle input while typing the output file name
fn handle_editing_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.confirm_edit(),
        KeyCode::Esc => app.cancel_editing(),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => app.input_buffer.push(c),
        _ => {}
    }
}

/// Handle the overwrite/append/new-name prompt
fn handle_conflict_input(app: &mut App, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Char('o') | KeyCode::Char('O') => app.resolve_conflict(FileConflict::Overwrite, now),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Enter => {
            app.resolve_conflict(FileConflict::Append, now)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.resolve_conflict(FileConflict::Rename, now)
        }
        _ => {}
    }
}
