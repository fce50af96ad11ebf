// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The bridge loop: the single thread that owns the serial descriptor and is
//! the sole writer to the ring log.

use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use vlcb_core::{Direction, OutboundChannel, RecvOutcome, Reframer, RingLog, MAX_FRAME};

const POLL_SLEEP: Duration = Duration::from_millis(100);

/// Run the bridge loop until `running` is cleared. Intended to be the body
/// of a dedicated `std::thread::spawn`, independent of the HTTP server's
/// Tokio runtime, since it owns a blocking serial descriptor.
pub fn run(
    mut port: Box<dyn serialport::SerialPort>,
    ring: Arc<RingLog>,
    outbound: Arc<OutboundChannel>,
    running: Arc<AtomicBool>,
) {
    let mut reframer = Reframer::new();
    let mut read_buf = [0u8; MAX_FRAME];

    while running.load(Ordering::Relaxed) {
        drain_outbound(&mut port, &ring, &outbound);
        read_once(&mut port, &mut reframer, &ring, &mut read_buf);

        if !running.load(Ordering::Relaxed) {
            break;
        }
        std::thread::sleep(POLL_SLEEP);
    }

    debug!("bridge loop exiting");
}

fn drain_outbound(port: &mut Box<dyn serialport::SerialPort>, ring: &RingLog, outbound: &OutboundChannel) {
    loop {
        match outbound.try_recv() {
            RecvOutcome::Body(body) => match port.write_all(&body) {
                Ok(()) => {
                    ring.append(Direction::Outbound, body);
                }
                Err(e) => {
                    warn!(error = %e, "serial write failed, dropping outbound frame");
                }
            },
            RecvOutcome::Empty | RecvOutcome::Closed => break,
        }
    }
}

fn read_once(
    port: &mut Box<dyn serialport::SerialPort>,
    reframer: &mut Reframer,
    ring: &RingLog,
    buf: &mut [u8],
) {
    match port.read(buf) {
        Ok(0) => {}
        Ok(n) => {
            reframer.feed(&buf[..n], |frame| {
                ring.append(Direction::Inbound, frame);
            });
        }
        Err(e) if matches!(e.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock) => {}
        Err(e) => {
            warn!(error = %e, "serial read failed, continuing");
        }
    }
}
