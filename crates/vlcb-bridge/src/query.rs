// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Minimal `?key=value&...` parsing for the one route this bridge serves.
//!
//! Deliberately not `axum::extract::Query`: that extractor decodes every
//! value the same way, but only the `send` value should run through the
//! percent-decoder (`vlcb_core::urldecode`) — `read`/`end`/`format` are
//! plain ASCII tokens that never need decoding.

/// A single `key=value` pair from the raw query string, both sides still
/// exactly as they appeared on the wire.
pub struct RawParams<'a> {
    query: &'a str,
}

impl<'a> RawParams<'a> {
    pub fn parse(query: &'a str) -> Self {
        RawParams { query }
    }

    /// First value bound to `key`, undecoded.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.query.split('&').find_map(|pair| {
            let mut it = pair.splitn(2, '=');
            let k = it.next()?;
            let v = it.next().unwrap_or("");
            if k == key {
                Some(v)
            } else {
                None
            }
        })
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Parse an ASCII decimal integer (optional leading `-`). Returns `None` on
/// anything malformed rather than panicking.
pub fn parse_i64(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}
