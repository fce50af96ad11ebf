// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The wire shape of a single VLCB/CBUS frame as stored in the ring log.

use chrono::{DateTime, Utc};

/// Maximum length of a frame body, delimiters included.
///
/// The adapter's own frames run 10-30 bytes; 64 leaves headroom for
/// non-standard opcodes without letting a corrupted stream grow a slot
/// without bound.
pub const MAX_FRAME: usize = 64;

/// Direction of a frame relative to the host running the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Bus to host.
    Inbound,
    /// Host to bus.
    Outbound,
}

impl Direction {
    /// Single-character rendering used in query responses (`'i'` / `'o'`).
    pub fn as_char(self) -> char {
        match self {
            Direction::Inbound => 'i',
            Direction::Outbound => 'o',
        }
    }
}

/// An immutable, timestamped record of a frame observed on the bus.
///
/// `seq` is assigned by the ring log at append time, not by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
    pub body: Vec<u8>,
}

impl Frame {
    /// Render the `"<seq>,<timestamp>,<direction_char>,<body>"` line used by
    /// the HTTP adapter's query response body.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.seq,
            self.timestamp.to_rfc3339(),
            self.direction.as_char(),
            String::from_utf8_lossy(&self.body)
        )
    }
}
