// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Core data structures for a VLCB/CBUS serial-to-HTTP bridge: frame
//! validation, URL decoding, the concurrent ring log, the outbound channel,
//! and the reframing state machine. None of this crate touches serial I/O or
//! HTTP directly — those live in the binary crate that wires these pieces to
//! `serialport` and `axum`.

pub mod channel;
pub mod frame;
pub mod ring;
pub mod reframer;
pub mod urldecode;
pub mod validate;

pub use channel::{OutboundChannel, RecvOutcome, SendOutcome};
pub use frame::{Direction, Frame, MAX_FRAME};
pub use reframer::Reframer;
pub use ring::{QueryResult, RingLog};
pub use validate::{validate, Validity};
