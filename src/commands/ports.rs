// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Serial port listing command

use crate::cli::args::OutputFormat;
use crate::device::{available_ports, PortInfo};
use crate::error::Result;

/// Execute the ports command
pub fn execute(format: &OutputFormat) -> Result<()> {
    let ports = available_ports()?;
    print!("{}", render(&ports, format)?);
    Ok(())
}

fn render(ports: &[PortInfo], format: &OutputFormat) -> Result<String> {
    if matches!(format, OutputFormat::Json) {
        return Ok(format!("{}\n", serde_json::to_string_pretty(ports)?));
    }

    if ports.is_empty() {
        return Ok("No serial ports found\n".to_string());
    }

    let width = ports.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for port in ports {
        out.push_str(&format!("{:<width$}  {}\n", port.name, port.kind, width = width));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Vec<PortInfo> {
        vec![
            PortInfo {
                name: "/dev/ttyACM0".to_string(),
                kind: "USB 2341:0043 Arduino Uno".to_string(),
            },
            PortInfo {
                name: "/dev/ttyS0".to_string(),
                kind: "unknown".to_string(),
            },
        ]
    }

    #[test]
    fn test_render_text_aligned() {
        let out = render(&ports(), &OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "/dev/ttyACM0  USB 2341:0043 Arduino Uno");
        assert_eq!(lines[1], "/dev/ttyS0    unknown");
    }

    #[test]
    fn test_render_text_empty() {
        let out = render(&[], &OutputFormat::Text).unwrap();
        assert!(out.contains("No serial ports"));
    }

    #[test]
    fn test_render_json() {
        let out = render(&ports(), &OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["name"], "/dev/ttyACM0");
        assert_eq!(parsed[1]["kind"], "unknown");
    }
}
