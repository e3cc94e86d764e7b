// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host protocol for panel communication.
//!
//! Wire format: JSON messages relayed opaquely by the panel shell.
//! Requests carry a correlation token; the matching reply carries the
//! same token back.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod bridge;
mod protocol;

pub use bridge::RequestBridge;
pub use protocol::{decode, encode, HostOp, HostPush, HostReply, HostRequest, ProtocolError};
