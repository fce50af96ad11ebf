// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Startup configuration, parsed from command-line flags.

use clap::Parser;

/// VLCB/CBUS serial-to-HTTP bridge
#[derive(Parser, Debug)]
#[command(name = "vlcb-bridge")]
#[command(about = "Bridges a VLCB/CBUS serial adapter to an HTTP query API")]
#[command(version)]
pub struct Args {
    /// Serial device path
    #[arg(long, default_value = "/dev/ttyACM0")]
    pub device: String,

    /// HTTP bind address
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// HTTP port
    #[arg(long, default_value_t = 8888)]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Ring log capacity (CAP)
    #[arg(long, default_value_t = 256)]
    pub ring_capacity: usize,

    /// Ring log safe window (SAFE); must be less than ring-capacity
    #[arg(long, default_value_t = 230)]
    pub safe_window: usize,

    /// Outbound channel depth (Q); must be at least 8
    #[arg(long, default_value_t = 16)]
    pub channel_depth: usize,

    /// Maximum frames returned by a single query
    #[arg(long, default_value_t = 10)]
    pub max_batch: usize,
}

impl Args {
    /// Validate cross-field constraints the flag parser can't express alone.
    /// Mirrors the discovery server's `ServerConfig::validate` pattern: one
    /// fatal, descriptive error rather than a panic deep inside the ring log.
    pub fn validate(&self) -> Result<(), String> {
        if self.safe_window >= self.ring_capacity {
            return Err(format!(
                "safe-window ({}) must be less than ring-capacity ({})",
                self.safe_window, self.ring_capacity
            ));
        }
        if self.channel_depth < 8 {
            return Err(format!(
                "channel-depth ({}) must be at least 8",
                self.channel_depth
            ));
        }
        Ok(())
    }
}
