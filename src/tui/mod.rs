// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Terminal front end
//!
//! A single acquisition screen rendered with ratatui; crossterm handles
//! input. The event wait is bounded by the session's next tick deadline so
//! polling stays on schedule while the UI is idle.

pub mod app;
pub mod input;
pub mod ui;

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Settings;
use crate::device::Sensor;
use crate::error::{DaqError, Result};
use app::{App, AppResult};

/// Run the acquisition screen until the user quits
pub fn run_tui(settings: &Settings, sensor: Box<dyn Sensor>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| DaqError::Tui(e.to_string()))?;

    let mut app = App::new(sensor, settings);
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal
        .show_cursor()
        .map_err(|e| DaqError::Tui(e.to_string()))?;

    result
}

/// Main application loop
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| DaqError::Tui(e.to_string()))?;

        let wait = app.session.wait(Instant::now());
        match input::handle_input(app, wait)? {
            AppResult::Continue => {}
            AppResult::Quit => break,
        }

        app.on_tick(Instant::now());
    }

    Ok(())
}

/// Run a single iteration of the app loop (for testing)
#[cfg(test)]
fn run_app_iteration<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    now: Instant,
) -> Result<()> {
    terminal
        .draw(|f| ui::draw(f, app))
        .map_err(|e| DaqError::Tui(e.to_string()))?;
    app.on_tick(now);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ScriptedSensor;
    use ratatui::backend::TestBackend;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_run_app_iteration_renders_without_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(
            Box::new(ScriptedSensor::from_pairs(&[])),
            &Settings::default(),
        );

        assert!(run_app_iteration(&mut terminal, &mut app, Instant::now()).is_ok());
    }

    #[test]
    fn test_iterations_drive_acquisition() {
        let dir = TempDir::new().unwrap();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(
            Box::new(ScriptedSensor::from_pairs(&[(1.0, 2.0), (3.0, 4.0)])),
            &Settings::default(),
        );
        app.output_file = dir.path().join("run.txt").display().to_string();

        let t0 = Instant::now();
        app.toggle(t0);
        // Several redraws per interval; only due iterations poll.
        for ms in (0..=2000).step_by(250) {
            run_app_iteration(&mut terminal, &mut app, t0 + Duration::from_millis(ms)).unwrap();
        }

        assert_eq!(app.session.samples(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("run.txt")).unwrap(),
            "1.0\t2.0\n3.0\t4.0\n"
        );
    }
}
