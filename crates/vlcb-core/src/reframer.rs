// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converts a raw byte stream from the serial adapter into a stream of
//! complete `:`...`;` frames, resyncing on every `:` so a single corrupted
//! frame can never poison the ones that follow.

use crate::frame::MAX_FRAME;

/// Byte-at-a-time reframing state machine.
///
/// Mirrors the partial-read accumulator pattern used for the TCP frame codec
/// this crate is adapted from (accumulate into a bounded buffer, emit on a
/// terminator, drop and reset on overflow), simplified to VLCB's single
/// delimiter pair instead of a length-prefixed header.
pub struct Reframer {
    pending: Vec<u8>,
    frames_emitted: u64,
    frames_dropped: u64,
}

impl Default for Reframer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reframer {
    pub fn new() -> Self {
        Reframer {
            pending: Vec::with_capacity(MAX_FRAME),
            frames_emitted: 0,
            frames_dropped: 0,
        }
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }

    /// Feed a chunk of bytes read from the adapter, invoking `on_frame` for
    /// each complete frame produced. `on_frame` receives ownership of the
    /// frame body, delimiters included.
    pub fn feed(&mut self, chunk: &[u8], mut on_frame: impl FnMut(Vec<u8>)) {
        for &b in chunk {
            match b {
                b':' => {
                    if !self.pending.is_empty() {
                        self.frames_dropped += 1;
                        tracing::warn!(
                            dropped_len = self.pending.len(),
                            "reframer resync: discarding in-progress frame"
                        );
                    }
                    self.pending.clear();
                    self.pending.push(b':');
                }
                b';' if !self.pending.is_empty() => {
                    self.pending.push(b';');
                    self.frames_emitted += 1;
                    on_frame(std::mem::take(&mut self.pending));
                    self.pending = Vec::with_capacity(MAX_FRAME);
                }
                _ if self.pending.is_empty() => {
                    // Garbage before any start-of-frame marker.
                }
                _ => {
                    self.pending.push(b);
                    if self.pending.len() > MAX_FRAME {
                        self.frames_dropped += 1;
                        tracing::warn!(max_frame = MAX_FRAME, "reframer overflow: dropping partial frame");
                        self.pending.clear();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_collect(input: &[u8]) -> Vec<Vec<u8>> {
        let mut r = Reframer::new();
        let mut out = Vec::new();
        r.feed(input, |f| out.push(f));
        out
    }

    #[test]
    fn emits_maximal_substrings_between_colon_and_semicolon() {
        let frames = feed_collect(b"garbage:AA;more:BB:CC;");
        assert_eq!(frames, vec![b":AA;".to_vec(), b":CC;".to_vec()]);
    }

    #[test]
    fn drops_in_progress_frame_on_resync() {
        let frames = feed_collect(b":BB:CC;");
        assert_eq!(frames, vec![b":CC;".to_vec()]);
    }

    #[test]
    fn ignores_garbage_before_first_start_marker() {
        let frames = feed_collect(b"xyz:AA;");
        assert_eq!(frames, vec![b":AA;".to_vec()]);
    }

    #[test]
    fn overflow_drops_partial_frame_and_resyncs() {
        let mut long = vec![b':'];
        long.extend(std::iter::repeat(b'A').take(MAX_FRAME + 4));
        long.push(b';');
        long.extend_from_slice(b":OK;");
        let frames = feed_collect(&long);
        assert_eq!(frames, vec![b":OK;".to_vec()]);
    }

    #[test]
    fn tracks_emitted_and_dropped_counters() {
        let mut r = Reframer::new();
        let mut out = Vec::new();
        r.feed(b":AA:BB;", |f| out.push(f));
        assert_eq!(r.frames_emitted(), 1);
        assert_eq!(r.frames_dropped(), 1);
    }
}
