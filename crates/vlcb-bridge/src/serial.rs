// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serial port open/configure wrapper and its error taxonomy.

use std::fmt;
use std::time::Duration;

/// Errors opening or operating the serial device. Hand-rolled `Display`/
/// `Error` impls rather than a derive macro, matching the style used
/// elsewhere in this workspace for component-boundary errors.
#[derive(Debug)]
pub enum SerialError {
    Open { device: String, source: serialport::Error },
    Write(std::io::Error),
    Read(std::io::Error),
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::Open { device, source } => {
                write!(f, "failed to open serial device {device}: {source}")
            }
            SerialError::Write(e) => write!(f, "serial write failed: {e}"),
            SerialError::Read(e) => write!(f, "serial read failed: {e}"),
        }
    }
}

impl std::error::Error for SerialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerialError::Open { source, .. } => Some(source),
            SerialError::Write(e) | SerialError::Read(e) => Some(e),
        }
    }
}

/// Baud rate the adapter speaks: 1.152 Mbaud.
pub const BAUD_RATE: u32 = 1_152_000;

/// Read timeout approximating the original `VMIN=0, VTIME=5` (0.5 s
/// inter-character timeout on a non-blocking read).
pub const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Open and configure the adapter: raw mode, 8N1, no parity, hardware flow
/// control, short read timeout. `CLOCAL`/`CREAD` are implied by opening the
/// port in the library's default (non-controlling-terminal) mode.
pub fn open(device: &str) -> Result<Box<dyn serialport::SerialPort>, SerialError> {
    serialport::new(device, BAUD_RATE)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .flow_control(serialport::FlowControl::Hardware)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(|source| SerialError::Open {
            device: device.to_string(),
            source,
        })
}
