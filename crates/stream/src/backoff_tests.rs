// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[parameterized(
    first = { 1, 1000 },
    second = { 2, 2000 },
    third = { 3, 4000 },
    fourth = { 4, 8000 },
    capped = { 5, 15_000 },
    far_past_cap = { 30, 15_000 },
)]
fn base_delay_doubles_until_the_cap(attempt: u32, expected_ms: u64) {
    let b = Backoff::new(1000, 15_000);
    assert_eq!(b.base_delay_ms(attempt), expected_ms);
}

#[test]
fn next_delay_counts_attempts_and_reset_clears_them() {
    let mut b = Backoff::new(10, 100);
    b.next_delay();
    b.next_delay();
    assert_eq!(b.attempts(), 2);
    b.reset();
    assert_eq!(b.attempts(), 0);
    // After reset the ladder starts over at the base delay.
    let d = b.next_delay();
    assert!(d >= Duration::from_millis(10) && d < Duration::from_millis(10 + 250));
}

#[test]
fn huge_attempt_counts_do_not_overflow() {
    let b = Backoff::new(u64::MAX / 2, u64::MAX);
    assert_eq!(b.base_delay_ms(u32::MAX), u64::MAX);
}

proptest! {
    // Non-decreasing before jitter, and never above the cap.
    #[test]
    fn base_delays_are_monotonic_and_bounded(
        base in 1u64..10_000,
        max in 1u64..60_000,
        attempt in 1u32..64,
    ) {
        let b = Backoff::new(base, max);
        let d = b.base_delay_ms(attempt);
        prop_assert!(d <= max);
        prop_assert!(d <= b.base_delay_ms(attempt + 1));
    }

    #[test]
    fn jittered_delay_stays_within_the_jitter_window(seed in 0u8..8) {
        let _ = seed;
        let mut b = Backoff::new(1000, 15_000);
        let d = b.next_delay();
        prop_assert!(d >= Duration::from_millis(1000));
        prop_assert!(d < Duration::from_millis(1250));
    }
}
