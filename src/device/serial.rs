// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Request/response protocol over a serial port
//!
//! Each poll writes the request byte and reads [`CHANNELS`] lines of the
//! form `123.45\r\n`. There is no framing beyond the line terminator and no
//! retry: a slow board surfaces as [`DaqError::Timeout`].

use std::io::{BufRead, BufReader, Read, Write};
use std::time::Duration;

use serde::Serialize;
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPortType, StopBits};

use super::{Reading, Sensor, CHANNELS};
use crate::config::Settings;
use crate::error::{DaqError, Result};

/// Serial line parameters. Framing is fixed at 8N1 without flow control.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialLink {
    pub port: String,
    pub baud_rate: u32,
    pub timeout: Duration,
    pub command: u8,
}

impl SerialLink {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            port: settings.serial.port.clone(),
            baud_rate: settings.serial.baud_rate,
            timeout: settings.read_timeout(),
            // validated as ASCII on load
            command: settings.serial.command as u8,
        }
    }
}

/// Byte link to the board.
///
/// `discard_input` drops whatever the board sent that has not been read
/// yet. It is used to resynchronise after a failed poll.
pub trait Transport: Read + Write {
    fn discard_input(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Transport for Box<dyn serialport::SerialPort> {
    fn discard_input(&mut self) -> std::io::Result<()> {
        self.clear(ClearBuffer::Input)?;
        Ok(())
    }
}

/// A board reachable through any byte transport
pub struct SerialSensor<P: Transport> {
    name: String,
    command: u8,
    reader: BufReader<P>,
    line: Vec<u8>,
    /// Set when a poll failed part way, leaving reply bytes unread
    desynced: bool,
}

impl<P: Transport> SerialSensor<P> {
    pub fn new(name: impl Into<String>, port: P, command: u8) -> Self {
        Self {
            name: name.into(),
            command,
            reader: BufReader::new(port),
            line: Vec::new(),
            desynced: false,
        }
    }

    /// Borrow the underlying transport
    pub fn get_ref(&self) -> &P {
        self.reader.get_ref()
    }

    /// Drop the rest of a late or broken reply so the next poll starts on
    /// channel 0.
    fn resync(&mut self) -> Result<()> {
        let buffered = self.reader.buffer().len();
        self.reader.consume(buffered);
        self.reader
            .get_mut()
            .discard_input()
            .map_err(DaqError::from_link_io)?;
        tracing::debug!(
            target: "daq.device",
            buffered,
            "discarded stale input after failed poll"
        );
        self.desynced = false;
        Ok(())
    }

    fn request(&mut self) -> Result<()> {
        if self.desynced {
            self.resync()?;
        }
        let port = self.reader.get_mut();
        port.flush().map_err(DaqError::from_link_io)?;
        port
            .write_all(&[self.command])
            .map_err(DaqError::from_link_io)?;
        tracing::trace!(target: "daq.device", command = self.command, "request sent");
        port.flush().map_err(DaqError::from_link_io)?;
        Ok(())
    }

    fn read_channel(&mut self) -> Result<f64> {
        self.line.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.line)
            .map_err(DaqError::from_link_io)?;
        if n == 0 {
            return Err(DaqError::Protocol(
                "link closed before a full reading arrived".to_string(),
            ));
        }
        let text = String::from_utf8_lossy(&self.line);
        if !text.ends_with('\n') {
            return Err(DaqError::Protocol(format!("unterminated line {:?}", text)));
        }
        parse_channel(&text)
    }

    fn read_reading(&mut self) -> Result<Reading> {
        let mut values = [0.0; CHANNELS];
        for value in values.iter_mut() {
            *value = self.read_channel()?;
        }
        tracing::trace!(target: "daq.device", ?values, "raw reading");

        Ok(Reading::new(values[0], values[1]))
    }
}

impl<P: Transport> Sensor for SerialSensor<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn poll(&mut self) -> Result<Reading> {
        self.request()?;

        let reading = self.read_reading();
        if reading.is_err() {
            self.desynced = true;
        }
        reading
    }
}

/// Parse one channel line, tolerating the `\r\n` terminator and padding.
pub fn parse_channel(line: &str) -> Result<f64> {
    let text = line.trim_end_matches(['\r', '\n']).trim();
    if text.is_empty() {
        return Err(DaqError::Protocol("empty line from device".to_string()));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| DaqError::Protocol(format!("expected a number, got {:?}", text)))?;
    if !value.is_finite() {
        return Err(DaqError::Protocol(format!("non-finite value {:?}", text)));
    }
    Ok(value)
}

/// Open a real serial port and wrap it in the polling protocol.
pub fn open_serial(link: &SerialLink) -> Result<SerialSensor<Box<dyn serialport::SerialPort>>> {
    tracing::info!(port = %link.port, baud = link.baud_rate, "opening serial port");

    let port = serialport::new(&link.port, link.baud_rate)
        .timeout(link.timeout)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open()?;

    // Boards that reset on open may have printed a banner already.
    port.clear(ClearBuffer::Input)?;

    Ok(SerialSensor::new(link.port.clone(), port, link.command))
}

/// A serial port found on the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortInfo {
    pub name: String,
    pub kind: String,
}

/// Enumerate serial ports, describing USB adapters by vendor/product.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|p| PortInfo {
            name: p.port_name,
            kind: describe_port_type(&p.port_type),
        })
        .collect())
}

fn describe_port_type(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let mut kind = format!("USB {:04x}:{:04x}", usb.vid, usb.pid);
            if let Some(product) = &usb.product {
                kind.push(' ');
                kind.push_str(product);
            } else if let Some(manufacturer) = &usb.manufacturer {
                kind.push(' ');
                kind.push_str(manufacturer);
            }
            kind
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "unknown".to_string(),
    }
}
