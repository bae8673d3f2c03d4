// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings inspection and reset

use std::path::Path;

use crate::cli::args::{OutputFormat, SettingsArgs, SettingsCommands};
use crate::config::Settings;
use crate::error::Result;

/// Execute the settings command against the file at `path`
pub fn execute(args: &SettingsArgs, settings: &Settings, path: &Path, format: &OutputFormat) -> Result<()> {
    match args.command {
        SettingsCommands::Show => print!("{}", render(settings, format)?),
        SettingsCommands::Path => println!("{}", path.display()),
        SettingsCommands::Reset => {
            Settings::default().save_to(path)?;
            tracing::info!(path = %path.display(), "settings reset");
            println!("Wrote default settings to {}", path.display());
        }
    }
    Ok(())
}

fn render(settings: &Settings, format: &OutputFormat) -> Result<String> {
    if matches!(format, OutputFormat::Json) {
        return Ok(format!("{}\n", serde_json::to_string_pretty(settings)?));
    }

    let mut out = String::new();
    out.push_str("Serial\n");
    out.push_str(&format!("  port:        {}\n", settings.serial.port));
    out.push_str(&format!("  baud rate:   {}\n", settings.serial.baud_rate));
    out.push_str(&format!("  timeout:     {} ms\n", settings.serial.timeout_ms));
    out.push_str(&format!("  command:     {:?}\n", settings.serial.command));
    out.push_str("Acquisition\n");
    out.push_str(&format!(
        "  interval:    {} ms\n",
        settings.acquisition.interval_ms
    ));
    out.push_str(&format!(
        "  simulate:    {}\n",
        settings.acquisition.simulate
    ));
    out.push_str("Calibration\n");
    out.push_str(&format!(
        "  deformation: {} * raw + {}\n",
        settings.calibration.deformation.gain, settings.calibration.deformation.offset
    ));
    out.push_str(&format!(
        "  temperature: {} * raw + {}\n",
        settings.calibration.temperature.gain, settings.calibration.temperature.offset
    ));
    out.push_str("Output\n");
    out.push_str(&format!(
        "  default:     {}\n",
        settings
            .output
            .default_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    ));
    out.push_str(&format!("  time column: {}\n", settings.output.time_column));
    out.push_str("Plot\n");
    let max_points = match settings.plot.max_points {
        0 => "unlimited".to_string(),
        n => n.to_string(),
    };
    out.push_str(&format!("  max points:  {}\n", max_points));
    Ok(out)
}
