// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounded FIFO from HTTP handler threads to the bridge loop's serial writer.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::sync::Mutex;

/// Outcome of [`OutboundChannel::try_send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Full,
    Closed,
}

/// Outcome of [`OutboundChannel::try_recv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecvOutcome {
    Body(Vec<u8>),
    Empty,
    Closed,
}

/// A bounded multi-producer, single-consumer queue of raw (already-validated)
/// frame bodies. Any number of HTTP handler threads send; exactly one bridge
/// thread receives. `std::sync::mpsc::sync_channel` gives FIFO ordering
/// across all senders and a bounded capacity for free; the `Sender` half is
/// cloned per caller, so it is wrapped in a `Mutex` only where a single
/// shared handle needs to be cloned from behind a shared reference.
pub struct OutboundChannel {
    tx: Mutex<Option<SyncSender<Vec<u8>>>>,
    rx: Mutex<Receiver<Vec<u8>>>,
}

impl OutboundChannel {
    /// Build a channel with bounded capacity `depth` (must be at least 8).
    pub fn new(depth: usize) -> Self {
        assert!(depth >= 8, "outbound channel depth must be at least 8");
        let (tx, rx) = mpsc::sync_channel(depth);
        OutboundChannel {
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(rx),
        }
    }

    /// Non-blocking enqueue from an HTTP handler thread.
    pub fn try_send(&self, body: Vec<u8>) -> SendOutcome {
        let guard = self.tx.lock().expect("outbound channel sender mutex poisoned");
        match guard.as_ref() {
            None => SendOutcome::Closed,
            Some(tx) => match tx.try_send(body) {
                Ok(()) => SendOutcome::Sent,
                Err(TrySendError::Full(_)) => SendOutcome::Full,
                Err(TrySendError::Disconnected(_)) => SendOutcome::Closed,
            },
        }
    }

    /// Non-blocking dequeue from the bridge thread.
    pub fn try_recv(&self) -> RecvOutcome {
        let guard = self.rx.lock().expect("outbound channel receiver mutex poisoned");
        match guard.try_recv() {
            Ok(body) => RecvOutcome::Body(body),
            Err(TryRecvError::Empty) => RecvOutcome::Empty,
            Err(TryRecvError::Disconnected) => RecvOutcome::Closed,
        }
    }

    /// Close the channel: subsequent `try_send` calls report `Closed`, and
    /// the bridge thread drains whatever was already queued before it too
    /// observes `Closed`.
    pub fn close(&self) {
        *self.tx.lock().expect("outbound channel sender mutex poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_then_recv_preserves_fifo_order() {
        let chan = OutboundChannel::new(8);
        assert_eq!(chan.try_send(b":AA;".to_vec()), SendOutcome::Sent);
        assert_eq!(chan.try_send(b":BB;".to_vec()), SendOutcome::Sent);
        assert_eq!(chan.try_recv(), RecvOutcome::Body(b":AA;".to_vec()));
        assert_eq!(chan.try_recv(), RecvOutcome::Body(b":BB;".to_vec()));
        assert_eq!(chan.try_recv(), RecvOutcome::Empty);
    }

    #[test]
    fn reports_full_at_capacity() {
        let chan = OutboundChannel::new(8);
        for _ in 0..8 {
            assert_eq!(chan.try_send(b":AA;".to_vec()), SendOutcome::Sent);
        }
        assert_eq!(chan.try_send(b":AA;".to_vec()), SendOutcome::Full);
    }

    #[test]
    fn rejects_sends_after_close() {
        let chan = OutboundChannel::new(8);
        chan.close();
        assert_eq!(chan.try_send(b":AA;".to_vec()), SendOutcome::Closed);
    }
}
