// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! A bounded, sequence-numbered, single-writer/multi-reader log of frames.
//!
//! Readers never block the writer: they snapshot `total_written` once with
//! `Acquire` ordering and derive the range of sequence numbers still inside
//! the SAFE window before touching a single slot. The writer publishes a
//! completed slot and then advances `total_written` with `Release` ordering
//! as its last step, so any reader that observes the new `total_written` is
//! guaranteed to observe the slot write that produced it. The gap
//! `CAP - SAFE` bounds how far the writer can run ahead of an in-progress
//! reader before it would overwrite a slot that reader is still copying;
//! callers choose `SAFE` with enough margin for their read latency. Each slot
//! carries its own uncontended mutex rather than a log-wide lock — the
//! teacher's shared-memory ring achieves the same isolation with raw atomics
//! over `mmap`'d bytes because it has to cross process boundaries; an
//! in-process `Vec<Frame>` has no such requirement, so per-slot mutexes give
//! the same reader/writer non-interference with safe code.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use crate::frame::{Direction, Frame};

/// Result of [`RingLog::query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub frames: Vec<Frame>,
    pub echoed_from: i64,
    pub echoed_to: i64,
    pub produced_count: i64,
}

/// Fixed-capacity cyclic store of [`Frame`]s.
///
/// `append` is called by exactly one thread (the bridge loop). `query` may be
/// called concurrently by any number of reader threads.
pub struct RingLog {
    capacity: usize,
    safe: usize,
    max_batch: usize,
    slots: Vec<Mutex<Option<Frame>>>,
    total_written: AtomicU64,
    next_write_index: AtomicUsize,
}

impl RingLog {
    /// Build a new empty log. `safe` must be strictly less than `capacity`.
    pub fn new(capacity: usize, safe: usize, max_batch: usize) -> Self {
        assert!(capacity > 0, "ring log capacity must be nonzero");
        assert!(safe < capacity, "safe window must be smaller than capacity");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Mutex::new(None));
        RingLog {
            capacity,
            safe,
            max_batch,
            slots,
            total_written: AtomicU64::new(0),
            next_write_index: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn safe_window(&self) -> usize {
        self.safe
    }

    /// Current `total_written`, i.e. the next `seq` that will be assigned.
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Acquire)
    }

    /// Append a frame observed in `direction`, stamped with the current UTC
    /// time. Returns the assigned `seq`. Single-writer only.
    pub fn append(&self, direction: Direction, body: Vec<u8>) -> u64 {
        let seq = self.total_written.load(Ordering::Relaxed);
        let idx = self.next_write_index.load(Ordering::Relaxed);
        let frame = Frame {
            seq,
            timestamp: Utc::now(),
            direction,
            body,
        };
        *self.slots[idx].lock().expect("ring slot mutex poisoned") = Some(frame);
        self.next_write_index
            .store((idx + 1) % self.capacity, Ordering::Release);
        self.total_written.store(seq + 1, Ordering::Release);
        seq
    }

    /// Page through the log. `from_seq` may be negative, meaning "that many
    /// frames back from the newest" (`W + from_seq`). See the header
    /// contract in the HTTP adapter for how `echoed_from`/`echoed_to`/
    /// `produced_count` map onto the response line.
    pub fn query(&self, from_seq: i64, to_seq: i64) -> QueryResult {
        let w = self.total_written.load(Ordering::Acquire) as i64;

        if w == 0 {
            let produced = if from_seq <= 0 { 0 } else { -from_seq };
            return QueryResult {
                frames: Vec::new(),
                echoed_from: 0,
                echoed_to: 0,
                produced_count: produced,
            };
        }

        let oldest = std::cmp::max(0, w - self.safe as i64);
        let newest = w - 1;

        let from = if from_seq < 0 { w + from_seq } else { from_seq };
        // Only the lower bound is enforced here: a `from` above `newest`
        // means the client is caught up or ahead and must fall through to
        // the early-return below, not get silently pulled back into range.
        let from = from.max(oldest);

        if from > newest {
            return QueryResult {
                frames: Vec::new(),
                echoed_from: 0,
                echoed_to: 0,
                produced_count: w - from,
            };
        }

        let mut to = if to_seq < from { newest } else { to_seq };
        to = to.clamp(from, newest);
        let max_batch = self.max_batch as i64;
        if to - from + 1 > max_batch {
            to = from + max_batch - 1;
        }

        let mut frames = Vec::with_capacity((to - from + 1) as usize);
        let mut seq = from;
        while seq <= to {
            let idx = (seq as u64 % self.capacity as u64) as usize;
            if let Some(frame) = self.slots[idx].lock().expect("ring slot mutex poisoned").clone() {
                if frame.seq as i64 == seq {
                    frames.push(frame);
                }
            }
            seq += 1;
        }

        QueryResult {
            echoed_from: from,
            echoed_to: to,
            produced_count: frames.len() as i64,
            frames,
        }
    }
}
