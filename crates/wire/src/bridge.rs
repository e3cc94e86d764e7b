// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Correlation-token bridge between outgoing requests and replies.
//!
//! The panel shell relays messages without interpreting them, so the
//! caller needs its own pending table. `issue` mints a token and hands
//! back the receiver; `resolve` routes an incoming reply to whichever
//! caller is waiting on its token. Dropping a receiver simply leaves a
//! dead entry that `resolve` clears when (if) the reply lands.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::protocol::{HostOp, HostReply, HostRequest};

#[derive(Default)]
pub struct RequestBridge {
    pending: Mutex<HashMap<String, oneshot::Sender<HostReply>>>,
}

impl RequestBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request for `op` with a fresh token and register a
    /// waiter for its reply.
    pub fn issue(&self, op: HostOp) -> (HostRequest, oneshot::Receiver<HostReply>) {
        let token = nanoid::nanoid!(12);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(token.clone(), tx);
        (HostRequest { token, op }, rx)
    }

    /// Route an incoming reply to its waiter. Returns false when no
    /// waiter is registered for the token (already resolved, aborted,
    /// or never ours).
    pub fn resolve(&self, reply: HostReply) -> bool {
        let waiter = self.pending.lock().remove(&reply.token);
        match waiter {
            Some(tx) => tx.send(reply).is_ok(),
            None => false,
        }
    }

    /// Drop every pending waiter. Each outstanding `issue` receiver
    /// completes with a recv error, which callers surface as a dropped
    /// request.
    pub fn abort_all(&self) {
        self.pending.lock().clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
