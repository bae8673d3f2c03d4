// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! UI rendering for the TUI
//!
//! Action row on top (toggle, output file, measurement log), the three plots
//! below: deformation vs. temperature on the left, the two time series
//! stacked on the right.

use std::time::Instant;

use ratatui::{
    prelude::*,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
};

use super::app::{App, InputMode};
use crate::acquisition::{Bounds, RunState, Series};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(7), // Action row
            Constraint::Min(0),    // Plots
            Constraint::Length(3), // Status/Help
        ])
        .split(frame.area());

    draw_title(frame, chunks[0], app);
    draw_actions(frame, chunks[1], app);
    draw_plots(frame, chunks[2], app);
    draw_status(frame, chunks[3], app);

    match app.input_mode {
        InputMode::EditingFile => draw_input_popup(frame, app),
        InputMode::ConfirmConflict => draw_conflict_popup(frame, app),
        InputMode::Normal => {}
    }
}

/// Draw the title bar
fn draw_title(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let state = match session.state() {
        RunState::Running => "running",
        RunState::Paused => "paused",
    };
    let title = format!(
        "daq · {} · {} · t = {:.1} s · {} samples",
        session.sensor_name(),
        state,
        session.elapsed(Instant::now()).as_secs_f64(),
        session.samples()
    );

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let title_text = Paragraph::new(format!(" {} ", title))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    frame.render_widget(title_text, area);
}

/// Toggle button, output file field and the measurement log
fn draw_actions(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Percentage(35),
            Constraint::Min(0),
        ])
        .split(area);

    let running = app.session.is_running();
    let toggle_style = if running {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let toggle = Paragraph::new(app.toggle_label())
        .alignment(Alignment::Center)
        .style(toggle_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(toggle, chunks[0]);

    let (file_text, file_style) = if app.output_file.is_empty() {
        (
            "(press e to set)".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.output_file.clone(), Style::default().fg(Color::White))
    };
    let file = Paragraph::new(file_text)
        .style(file_style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Output file ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(file, chunks[1]);

    let log_block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let visible = log_block.inner(chunks[2]).height as usize;
    let log = app.session.log();
    let lines: Vec<Line> = log
        .entries()
        .skip(log.len().saturating_sub(visible))
        .map(|entry| {
            let style = if entry.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    entry.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.text.replace('\t', "    "), style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(log_block), chunks[2]);
}

/// The three live plots
fn draw_plots(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(columns[1]);

    let series = app.session.series();
    frame.render_widget(
        chart(
            " Deformation vs. temperature ",
            &series.deformation_vs_temperature,
            "Temperature (°C)",
            "Deformation (mm)",
            Color::Blue,
        ),
        columns[0],
    );
    frame.render_widget(
        chart(
            " Deformation vs. time ",
            &series.deformation_vs_time,
            "Time (s)",
            "Deformation (mm)",
            Color::Red,
        ),
        right[0],
    );
    frame.render_widget(
        chart(
            " Temperature vs. time ",
            &series.temperature_vs_time,
            "Time (s)",
            "Temperature (°C)",
            Color::White,
        ),
        right[1],
    );
}

fn chart<'a>(
    title: &'a str,
    series: &'a Series,
    x_title: &'a str,
    y_title: &'a str,
    color: Color,
) -> Chart<'a> {
    let Bounds { x, y } = series.bounds();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(series.points());

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(x)
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .title(y_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(y)
                .labels(axis_labels(y)),
        )
}

/// Min, mid and max labels, with precision scaled to the span.
fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let span = (bounds[1] - bounds[0]).abs();
    let precision = if span >= 100.0 {
        0
    } else if span >= 1.0 {
        1
    } else {
        3
    };
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect()
}

/// Draw the status bar
fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if let Some(ref msg) = app.status_message {
        let color = if app.status_is_error {
            Color::Red
        } else {
            Color::Green
        };
        (msg.clone(), Style::default().fg(color))
    } else {
        let help = match app.input_mode {
            InputMode::Normal => "Space: Start/Pause | e: Output file | c: Clear | q: Quit | ?: Help",
            InputMode::EditingFile => "Enter: Confirm | Esc: Cancel",
            InputMode::ConfirmConflict => "o: Overwrite | a: Append | n: New name",
        };
        (help.to_string(), Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));

    let status = Paragraph::new(format!(" {} ", text))
        .style(style)
        .block(block);

    frame.render_widget(status, area);
}

/// Draw the output file editor popup
fn draw_input_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect(50, 20, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Output file ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let input_display = format!("{}_", app.input_buffer);
    let input = Paragraph::new(input_display).style(Style::default().fg(Color::White));

    frame.render_widget(input, inner);
}

/// Draw the file-exists prompt
fn draw_conflict_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect(60, 30, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" File exists ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = vec![
        Line::from(format!("{} already exists.", app.output_file)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[o]", Style::default().fg(Color::Cyan)),
            Span::raw(" Overwrite   "),
            Span::styled("[a]", Style::default().fg(Color::Cyan)),
            Span::raw(" Append   "),
            Span::styled("[n]", Style::default().fg(Color::Cyan)),
            Span::raw(" New name"),
        ]),
    ];

    let prompt = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(prompt, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
