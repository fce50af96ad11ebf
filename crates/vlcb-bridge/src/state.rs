// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared application state handed to every HTTP handler: a read-only handle
//! to the ring log and a sender handle to the outbound channel. Neither the
//! serial descriptor nor the reframer is reachable from here — those belong
//! exclusively to the bridge thread.

use std::sync::Arc;

use vlcb_core::{OutboundChannel, RingLog};

pub struct AppState {
    pub ring: Arc<RingLog>,
    pub outbound: Arc<OutboundChannel>,
}
