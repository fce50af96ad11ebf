// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary entry point; the bridge itself lives in the library crate so
//! integration tests can drive the HTTP adapter without opening a real
//! serial port.

use std::process::ExitCode;

use clap::Parser;
use vlcb_bridge::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    vlcb_bridge::run(Args::parse()).await
}
