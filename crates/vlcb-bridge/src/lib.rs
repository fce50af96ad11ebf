// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! VLCB/CBUS serial-to-HTTP bridge
//!
//! Bridges a VLCB/CBUS serial adapter to a small HTTP query API: clients
//! submit frames to transmit on the bus and page through a ring log of every
//! frame seen in either direction.
//!
//! # Endpoints
//!
//! - `GET /vlcb?send=<frame>` - submit a frame for transmission
//! - `GET /vlcb?read=<seq>&end=<seq>&format=txt|html` - page through the log

pub mod bridge;
pub mod cli;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod serial;
pub mod state;

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{error, info};

use cli::Args;
use state::AppState;
use vlcb_core::{OutboundChannel, RingLog};

pub fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Build the shared state and router for a bridge instance without binding a
/// socket or opening a serial port — the seam integration tests drive
/// directly, in place of a real adapter. The returned `Arc<AppState>` is the
/// same handle installed in the router, so a test can reach the ring and
/// outbound channel directly without a real bridge thread draining them.
pub fn build_app(
    ring_capacity: usize,
    safe_window: usize,
    max_batch: usize,
    channel_depth: usize,
) -> (axum::Router, Arc<AppState>) {
    let ring = Arc::new(RingLog::new(ring_capacity, safe_window, max_batch));
    let outbound = Arc::new(OutboundChannel::new(channel_depth));
    let state = Arc::new(AppState { ring, outbound });
    (routes::build(state.clone()), state)
}

/// Run the bridge until shut down by `SIGINT`. Opens the real serial device
/// named in `args`; not exercised by tests, which use [`build_app`] instead.
pub async fn run(args: Args) -> ExitCode {
    init_logging(&args.log_level);

    if let Err(msg) = args.validate() {
        error!("invalid configuration: {msg}");
        return ExitCode::FAILURE;
    }

    let port = match serial::open(&args.device) {
        Ok(port) => port,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let ring = Arc::new(RingLog::new(args.ring_capacity, args.safe_window, args.max_batch));
    let outbound = Arc::new(OutboundChannel::new(args.channel_depth));
    let running = Arc::new(AtomicBool::new(true));
    let shutdown = Arc::new(Notify::new());

    let bridge_handle = {
        let ring = ring.clone();
        let outbound = outbound.clone();
        let running = running.clone();
        std::thread::spawn(move || bridge::run(port, ring, outbound, running))
    };

    {
        let running = running.clone();
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("interrupt received, shutting down");
            running.store(false, Ordering::SeqCst);
            shutdown.notify_waiters();
        }) {
            error!("failed to install signal handler: {e}");
            return ExitCode::FAILURE;
        }
    }

    let state = Arc::new(AppState { ring, outbound: outbound.clone() });
    let app = routes::build(state);
    let addr = format!("{}:{}", args.bind, args.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            running.store(false, Ordering::SeqCst);
            let _ = bridge_handle.join();
            return ExitCode::FAILURE;
        }
    };

    info!("vlcb-bridge v{}", env!("CARGO_PKG_VERSION"));
    info!("serial device: {}", args.device);
    info!("http server: http://{addr}/vlcb");

    let shutdown_signal = {
        let shutdown = shutdown.clone();
        async move { shutdown.notified().await }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
    {
        error!("http server error: {e}");
    }

    running.store(false, Ordering::SeqCst);
    outbound.close();
    if bridge_handle.join().is_err() {
        error!("bridge thread panicked");
    }
    info!("shutdown complete");

    ExitCode::SUCCESS
}
