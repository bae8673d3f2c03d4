// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for daq
//!
//! This module defines all error types used throughout the application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for daq operations
#[derive(Error, Debug)]
pub enum DaqError {
    /// Serial port could not be opened or configured
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// The device did not answer within the read timeout
    #[error("Timed out waiting for the device to answer")]
    Timeout,

    /// The device answered with something that is not a reading
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Output file already exists and no conflict resolution was given
    #[error("Output file already exists: {}", .0.display())]
    FileExists(PathBuf),

    /// Terminal rendering errors
    #[error("TUI error: {0}")]
    Tui(String),
}

/// Result type alias for daq operations
pub type Result<T> = std::result::Result<T, DaqError>;

impl DaqError {
    /// Map an IO error raised while talking to the device.
    ///
    /// Read timeouts surface as `TimedOut` (or `WouldBlock` on some
    /// platforms) and become [`DaqError::Timeout`].
    pub fn from_link_io(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => DaqError::Timeout,
            std::io::ErrorKind::UnexpectedEof => {
                DaqError::Protocol("link closed before a full reading arrived".to_string())
            }
            _ => DaqError::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daq_error_protocol() {
        let err = DaqError::Protocol("bad line".to_string());
        assert!(err.to_string().contains("Protocol error"));
        assert!(err.to_string().contains("bad line"));
    }

    #[test]
    fn test_daq_error_config() {
        let err = DaqError::Config("bad config".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_daq_error_invalid_input() {
        let err = DaqError::InvalidInput("bad input".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_daq_error_file_exists_shows_path() {
        let err = DaqError::FileExists(PathBuf::from("run1.txt"));
        assert!(err.to_string().contains("run1.txt"));
    }

    #[test]
    fn test_daq_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let daq_err: DaqError = io_err.into();
        assert!(daq_err.to_string().contains("IO error"));
    }

    #[test]
    fn test_from_link_io_timeout() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        assert!(matches!(DaqError::from_link_io(io_err), DaqError::Timeout));
    }

    #[test]
    fn test_from_link_io_eof_is_protocol() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(
            DaqError::from_link_io(io_err),
            DaqError::Protocol(_)
        ));
    }

    #[test]
    fn test_from_link_io_other_is_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert!(matches!(DaqError::from_link_io(io_err), DaqError::Io(_)));
    }

    #[test]
    fn test_daq_error_debug() {
        let err = DaqError::Timeout;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Timeout"));
    }
}
