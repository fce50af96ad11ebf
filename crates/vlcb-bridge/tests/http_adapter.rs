// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end coverage of the HTTP adapter against a real bound socket,
//! exercising the ring log and outbound channel together without a serial
//! port. Ring sizing (`CAP=35, SAFE=30, MAX_BATCH=10`) matches the scenarios
//! these tests are named after.
//!
//! There is no real bridge thread here to move a sent frame from the
//! outbound channel into the ring, so `drain` below stands in for the one
//! half of `vlcb_bridge::bridge::run` that does — called explicitly between
//! a `send` and the `read` that expects to see it, rather than raced against
//! a background thread.

use std::sync::Arc;

use vlcb_bridge::state::AppState;
use vlcb_core::{Direction, RecvOutcome};

async fn spawn_server() -> (String, Arc<AppState>) {
    let (app, state) = vlcb_bridge::build_app(35, 30, 10, 8);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

/// Move every frame currently queued on the outbound channel into the ring,
/// the way the bridge thread would after writing each one to the serial
/// port.
fn drain(state: &AppState) {
    loop {
        match state.outbound.try_recv() {
            RecvOutcome::Body(body) => {
                state.ring.append(Direction::Outbound, body);
            }
            RecvOutcome::Empty | RecvOutcome::Closed => break,
        }
    }
}

#[tokio::test]
async fn empty_log_read_zero_reports_zero_header() {
    let (base, _state) = spawn_server().await;
    let resp = reqwest::get(format!("{base}/vlcb?read=0&format=txt"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert_eq!(body, "Read,0,0,0\n");
}

#[tokio::test]
async fn send_then_read_back_round_trips_the_frame() {
    let (base, state) = spawn_server().await;

    let send_resp = reqwest::get(format!("{base}/vlcb?send=:SB780N0D;&format=txt"))
        .await
        .unwrap();
    let send_body = send_resp.text().await.unwrap();
    assert_eq!(send_body, "Success, message sent");
    drain(&state);

    let read_resp = reqwest::get(format!("{base}/vlcb?read=0&format=txt"))
        .await
        .unwrap();
    let read_body = read_resp.text().await.unwrap();
    assert_eq!(read_body.lines().next(), Some("Read,0,0,1"));
    let frame_line = read_body.lines().nth(1).unwrap();
    assert!(frame_line.ends_with(",o,:SB780N0D;"));
}

#[tokio::test]
async fn send_without_terminator_is_rejected_and_not_logged() {
    let (base, _state) = spawn_server().await;

    let send_resp = reqwest::get(format!("{base}/vlcb?send=:BADMSG&format=txt"))
        .await
        .unwrap();
    assert_eq!(send_resp.text().await.unwrap(), "Error, invalid message format");

    let read_resp = reqwest::get(format!("{base}/vlcb?read=0&format=txt"))
        .await
        .unwrap();
    assert_eq!(read_resp.text().await.unwrap(), "Read,0,0,0\n");
}

#[tokio::test]
async fn read_ahead_of_newest_reports_negative_count() {
    let (base, state) = spawn_server().await;

    for _ in 0..5 {
        let resp = reqwest::get(format!("{base}/vlcb?send=:SB780N0D;&format=txt"))
            .await
            .unwrap();
        assert_eq!(resp.text().await.unwrap(), "Success, message sent");
    }
    drain(&state);

    let resp = reqwest::get(format!("{base}/vlcb?read=10&format=txt"))
        .await
        .unwrap();
    assert_eq!(resp.text().await.unwrap(), "Read,0,0,-5\n");
}

#[tokio::test]
async fn default_format_wraps_response_in_html() {
    let (base, _state) = spawn_server().await;
    let resp = reqwest::get(format!("{base}/vlcb?read=0")).await.unwrap();
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html"
    );
    let body = resp.text().await.unwrap();
    assert!(body.starts_with("<html><body>"));
    assert!(body.ends_with("</body></html>"));
}

#[tokio::test]
async fn unrecognized_request_reports_command_not_recognised() {
    let (base, _state) = spawn_server().await;
    let resp = reqwest::get(format!("{base}/vlcb?format=txt")).await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "command not recognised");
}
