//! Rate Limiting Infrastructure
//!
//! Fixed-window counters keyed by arbitrary strings (`ip:…`, `email:…`).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::to_delta;

/// Rate limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, 60)
    }

    pub fn per_hour(max_requests: u32) -> Self {
        Self::new(max_requests, 60 * 60)
    }
}

/// Snapshot of one key's window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCounter {
    pub window_start: DateTime<Utc>,
    pub count: u32,
}

/// Request admission
pub trait RateLimiter: Send + Sync {
    /// Count one request against `key`; `true` while within the limit.
    fn allow(&self, key: &str, config: &RateLimitConfig, now: DateTime<Utc>) -> bool;

    /// Evaluate checks in order, stopping at the first rejection.
    ///
    /// Checks after a rejection are not counted.
    fn allow_all(&self, checks: &[(String, RateLimitConfig)], now: DateTime<Utc>) -> bool {
        checks
            .iter()
            .all(|(key, config)| self.allow(key, config, now))
    }
}

/// In-process fixed-window limiter.
///
/// A single mutex serializes every call. Counters are never evicted.
#[derive(Debug, Default)]
pub struct FixedWindowRateLimiter {
    counters: Mutex<HashMap<String, WindowCounter>>,
}

impl FixedWindowRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current window for `key`, if it has ever been counted
    pub fn counter(&self, key: &str) -> Option<WindowCounter> {
        self.counters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .copied()
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn allow(&self, key: &str, config: &RateLimitConfig, now: DateTime<Utc>) -> bool {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let window = to_delta(config.window);

        let counter = counters.entry(key.to_string()).or_insert(WindowCounter {
            window_start: now,
            count: 0,
        });
        if now - counter.window_start >= window {
            counter.window_start = now;
            counter.count = 0;
        }

        counter.count = counter.count.saturating_add(1);
        counter.count <= config.max_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_limit_then_reset_after_window() {
        let limiter = FixedWindowRateLimiter::new();
        let config = RateLimitConfig::per_minute(5);

        for i in 1..=5 {
            assert!(limiter.allow("ip:1.2.3.4", &config, t0()), "call {i}");
        }
        assert!(!limiter.allow("ip:1.2.3.4", &config, t0()));

        let later = t0() + TimeDelta::seconds(60);
        assert!(limiter.allow("ip:1.2.3.4", &config, later));
        assert_eq!(limiter.counter("ip:1.2.3.4").unwrap().count, 1);
    }

    #[test]
    fn test_window_not_elapsed_keeps_counting() {
        let limiter = FixedWindowRateLimiter::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(limiter.allow("k", &config, t0()));
        assert!(!limiter.allow("k", &config, t0() + TimeDelta::seconds(59)));
        assert_eq!(limiter.counter("k").unwrap().window_start, t0());
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = FixedWindowRateLimiter::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(limiter.allow("a", &config, t0()));
        assert!(limiter.allow("b", &config, t0()));
        assert!(!limiter.allow("a", &config, t0()));
    }

    #[test]
    fn test_allow_all_short_circuits() {
        let limiter = FixedWindowRateLimiter::new();
        let tight = RateLimitConfig::new(1, 60);
        let loose = RateLimitConfig::new(100, 60);
        let checks = vec![
            ("ip:x".to_string(), tight),
            ("email:a@x.com".to_string(), loose),
        ];

        assert!(limiter.allow_all(&checks, t0()));
        assert!(!limiter.allow_all(&checks, t0()));

        assert_eq!(limiter.counter("ip:x").unwrap().count, 2);
        // second call stopped at the ip check
        assert_eq!(limiter.counter("email:a@x.com").unwrap().count, 1);
    }

    #[test]
    fn test_concurrent_callers_share_one_counter() {
        let limiter = std::sync::Arc::new(FixedWindowRateLimiter::new());
        let config = RateLimitConfig::new(10, 60);
        let now = t0();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || limiter.allow("shared", &config, now))
            })
            .collect();

        let allowed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(allowed, 10);
        assert_eq!(limiter.counter("shared").unwrap().count, 20);
    }
}
