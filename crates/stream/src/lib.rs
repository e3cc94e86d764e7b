// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rv-stream: the live event channel.
//!
//! A persistent WebSocket to the push-notification endpoint. One
//! background task owns the connection and delivers parsed
//! [`rv_core::LiveEvent`]s over an mpsc channel, in receipt order, with
//! no cross-connection ordering guarantee. Reconnects use capped
//! exponential backoff with jitter; a ping/pong heartbeat tears down
//! connections that stop answering.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod backoff;
pub mod channel;
pub mod config;

pub use backoff::Backoff;
pub use channel::LiveChannel;
pub use config::StreamConfig;
