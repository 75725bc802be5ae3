// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Advisory client-side rate limiting.
//!
//! Calendly reports the remaining call budget and the window reset time on every
//! response. Before each request we check the last known budget: once it drops
//! below the configured threshold, the request waits until the reset time. This
//! only smooths bursts; a 429 from the service is still surfaced like any other
//! HTTP error.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::header::HeaderMap;

#[cfg(feature = "telemetry")]
use tracing::debug;

use crate::config::RateLimitConfig;

/// Header carrying the remaining call budget.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the window reset time, in epoch seconds.
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Last known rate budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBudget {
    /// Calls left in the current window.
    pub remaining: u64,
    /// When the window resets, in epoch milliseconds.
    pub reset_at_ms: i64,
}

/// Shared rate-limit state owned by one client.
#[derive(Debug)]
pub struct RateLimiter {
    budget: Mutex<RateBudget>,
    threshold: u64,
}

impl RateLimiter {
    /// Create a limiter with an optimistic budget that resets now.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_budget(
            config.threshold,
            RateBudget {
                remaining: config.initial_remaining,
                reset_at_ms: now_ms(),
            },
        )
    }

    /// Create a limiter with an explicit starting budget.
    pub fn with_budget(threshold: u64, budget: RateBudget) -> Self {
        Self {
            budget: Mutex::new(budget),
            threshold,
        }
    }

    /// Snapshot of the current budget.
    pub fn budget(&self) -> RateBudget {
        *self.budget.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Threshold below which calls wait for the reset.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// How long a call issued at `now_ms` has to wait, if at all.
    pub fn wait_duration(&self, now_ms: i64) -> Option<Duration> {
        let budget = self.budget();
        if budget.remaining >= self.threshold {
            return None;
        }
        let wait_ms = budget.reset_at_ms.saturating_sub(now_ms);
        if wait_ms > 0 {
            Some(Duration::from_millis(wait_ms as u64))
        } else {
            None
        }
    }

    /// Wait until a call may go out.
    pub async fn acquire(&self) {
        if let Some(wait) = self.wait_duration(now_ms()) {
            #[cfg(feature = "telemetry")]
            debug!(
                wait_ms = wait.as_millis() as u64,
                remaining = self.budget().remaining,
                "Rate budget low, waiting for reset"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Overwrite the budget with whatever the service reported.
    ///
    /// Missing or unparseable headers leave the corresponding field untouched.
    pub fn update_from_headers(&self, headers: &HeaderMap) {
        let remaining = header_value::<u64>(headers, REMAINING_HEADER);
        let reset_secs = header_value::<i64>(headers, RESET_HEADER);
        self.record(remaining, reset_secs.map(|secs| secs.saturating_mul(1000)));
    }

    /// Overwrite individual budget fields.
    pub fn record(&self, remaining: Option<u64>, reset_at_ms: Option<i64>) {
        let mut budget = self.budget.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(remaining) = remaining {
            budget.remaining = remaining;
        }
        if let Some(reset_at_ms) = reset_at_ms {
            budget.reset_at_ms = reset_at_ms;
        }
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::time::Instant;

    fn limiter(remaining: u64, reset_at_ms: i64) -> RateLimiter {
        RateLimiter::with_budget(
            10,
            RateBudget {
                remaining,
                reset_at_ms,
            },
        )
    }

    #[test]
    fn test_initial_budget_is_optimistic() {
        let limiter = RateLimiter::new(RateLimitConfig::default());
        assert_eq!(limiter.budget().remaining, 1000);
        assert_eq!(limiter.threshold(), 10);
        assert_eq!(limiter.wait_duration(now_ms()), None);
    }

    #[test]
    fn test_no_wait_at_or_above_threshold() {
        let now = 1_700_000_000_000;
        assert_eq!(limiter(10, now + 60_000).wait_duration(now), None);
        assert_eq!(limiter(500, now + 60_000).wait_duration(now), None);
    }

    #[test]
    fn test_waits_exactly_until_reset() {
        let now = 1_700_000_000_000;
        assert_eq!(
            limiter(9, now + 1_500).wait_duration(now),
            Some(Duration::from_millis(1_500))
        );
        assert_eq!(
            limiter(0, now + 42).wait_duration(now),
            Some(Duration::from_millis(42))
        );
    }

    #[test]
    fn test_no_wait_when_reset_has_passed() {
        let now = 1_700_000_000_000;
        assert_eq!(limiter(0, now).wait_duration(now), None);
        assert_eq!(limiter(0, now - 5_000).wait_duration(now), None);
    }

    #[test]
    fn test_update_from_headers() {
        let limiter = limiter(1000, 0);
        let mut headers = HeaderMap::new();
        headers.insert(REMAINING_HEADER, HeaderValue::from_static("7"));
        headers.insert(RESET_HEADER, HeaderValue::from_static("1700000060"));

        limiter.update_from_headers(&headers);

        assert_eq!(
            limiter.budget(),
            RateBudget {
                remaining: 7,
                reset_at_ms: 1_700_000_060_000,
            }
        );
    }

    #[test]
    fn test_missing_headers_leave_state_untouched() {
        let limiter = limiter(3, 123);
        limiter.update_from_headers(&HeaderMap::new());
        assert_eq!(limiter.budget().remaining, 3);
        assert_eq!(limiter.budget().reset_at_ms, 123);
    }

    #[test]
    fn test_partial_and_garbage_headers() {
        let limiter = limiter(3, 123);
        let mut headers = HeaderMap::new();
        headers.insert(REMAINING_HEADER, HeaderValue::from_static("not-a-number"));
        headers.insert(RESET_HEADER, HeaderValue::from_static("200"));

        limiter.update_from_headers(&headers);

        assert_eq!(limiter.budget().remaining, 3);
        assert_eq!(limiter.budget().reset_at_ms, 200_000);
    }

    #[tokio::test]
    async fn test_acquire_without_wait() {
        let limiter = limiter(50, now_ms() + 60_000);
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_acquire_waits_for_reset() {
        let limiter = limiter(2, now_ms() + 200);
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(150));
    }
}
