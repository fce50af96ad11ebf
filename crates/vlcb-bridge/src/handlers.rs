// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The single `GET /vlcb` handler: parses `send`/`read`/`end`/`format`,
//! validates and enqueues or queries the ring log, and always answers with
//! HTTP 200 and `text/html` — failures are conveyed in the body text, never
//! in the status code.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};
use vlcb_core::{validate, SendOutcome, Validity};

use crate::query::{parse_i64, RawParams};
use crate::response::{render_query, wrap, Format};
use crate::state::AppState;

pub async fn vlcb(State(state): State<Arc<AppState>>, RawQuery(raw): RawQuery) -> Response {
    let query = raw.unwrap_or_default();
    let params = RawParams::parse(&query);
    let format = Format::parse(params.get("format"));

    let content = if let Some(send_value) = params.get("send") {
        handle_send(&state, send_value)
    } else if let Some(read_value) = params.get("read") {
        handle_read(&state, &params, read_value)
    } else {
        debug!("request recognised neither send nor read");
        "command not recognised".to_string()
    };

    let body = wrap(&content, format);
    (
        [(header::CONTENT_TYPE, "text/html")],
        body,
    )
        .into_response()
}

fn handle_send(state: &AppState, raw_value: &str) -> String {
    let decoded = vlcb_core::urldecode::decode(raw_value.as_bytes());
    match validate(&decoded) {
        Validity::Invalid => {
            debug!(raw = raw_value, "rejected malformed send payload");
            "Error, invalid message format".to_string()
        }
        Validity::Ok => match state.outbound.try_send(decoded) {
            SendOutcome::Sent => "Success, message sent".to_string(),
            SendOutcome::Full => {
                warn!("outbound channel full, dropping send request");
                "Error, send message failed".to_string()
            }
            SendOutcome::Closed => {
                warn!("outbound channel closed, rejecting send request");
                "Error, send message failed".to_string()
            }
        },
    }
}

fn handle_read(state: &AppState, params: &RawParams<'_>, read_value: &str) -> String {
    let from_seq = parse_i64(read_value).unwrap_or(0);
    let to_seq = params
        .get("end")
        .and_then(parse_i64)
        .unwrap_or(i64::MIN);

    let result = state.ring.query(from_seq, to_seq);
    render_query(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vlcb_core::{OutboundChannel, RingLog};

    fn state() -> AppState {
        AppState {
            ring: Arc::new(RingLog::new(35, 30, 10)),
            outbound: Arc::new(OutboundChannel::new(8)),
        }
    }

    #[test]
    fn rejects_malformed_send_payload() {
        let s = state();
        assert_eq!(handle_send(&s, ":BADMSG"), "Error, invalid message format");
    }

    #[test]
    fn accepts_and_enqueues_well_formed_send_payload() {
        let s = state();
        assert_eq!(handle_send(&s, ":SB780N0D;"), "Success, message sent");
        assert_eq!(
            s.outbound.try_recv(),
            vlcb_core::RecvOutcome::Body(b":SB780N0D;".to_vec())
        );
    }

    #[test]
    fn reports_channel_full() {
        let s = state();
        for _ in 0..8 {
            assert_eq!(handle_send(&s, ":SB780N0D;"), "Success, message sent");
        }
        assert_eq!(handle_send(&s, ":SB780N0D;"), "Error, send message failed");
    }

    #[test]
    fn read_on_empty_log_reports_zero_header() {
        let s = state();
        let params = RawParams::parse("read=0");
        assert_eq!(handle_read(&s, &params, "0"), "Read,0,0,0\n");
    }
}
