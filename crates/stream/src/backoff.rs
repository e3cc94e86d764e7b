// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconnect backoff: capped exponential plus a small jitter.
//!
//! The attempt counter resets only on a successful open, so a flapping
//! endpoint keeps climbing toward the cap instead of hammering it.

use rand::Rng;
use std::time::Duration;

const JITTER_MAX_MS: u64 = 250;

#[derive(Debug)]
pub struct Backoff {
    base_ms: u64,
    max_ms: u64,
    attempts: u32,
}

impl Backoff {
    pub fn new(base_ms: u64, max_ms: u64) -> Self {
        Self { base_ms, max_ms, attempts: 0 }
    }

    /// Pre-jitter delay for attempt `n` (1-based):
    /// `min(base * 2^(n-1), max)`.
    pub fn base_delay_ms(&self, attempt: u32) -> u64 {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        self.base_ms.saturating_mul(factor).min(self.max_ms)
    }

    /// Record a failed attempt and return how long to wait before the
    /// next one.
    pub fn next_delay(&mut self) -> Duration {
        self.attempts = self.attempts.saturating_add(1);
        let jitter = rand::thread_rng().gen_range(0..JITTER_MAX_MS);
        Duration::from_millis(self.base_delay_ms(self.attempts) + jitter)
    }

    /// Called on a successful open.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
