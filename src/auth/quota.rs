//! Fixed-window request quota tracking.
//!
//! # Responsibilities
//! - Count requests per identity within a fixed window
//! - Roll the window forward once it has elapsed
//! - Report how long a rejected caller must wait
//!
//! # Design Decisions
//! - One `QuotaWindow` per identity, created lazily on first request
//! - The whole check-and-increment runs under the DashMap entry guard,
//!   so concurrent requests for the same identity serialize and can
//!   never over-admit, while different identities only contend on
//!   their shard

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::RateLimitConfig;

/// Outcome of a quota admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Limited { retry_after_secs: u64 },
}

/// Per-identity request counter for the current window.
#[derive(Debug)]
struct QuotaWindow {
    count: u32,
    window_reset_at: Instant,
}

/// Fixed-window counting rate limiter keyed by identity id.
pub struct QuotaTracker {
    windows: DashMap<String, QuotaWindow>,
    window: Duration,
    max_requests: u32,
}

impl QuotaTracker {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            window: Duration::from_millis(config.window_ms),
            max_requests: config.max_requests,
        }
    }

    /// Admit or reject one request for the given identity.
    ///
    /// The count increment and window-reset check execute as a single
    /// atomic unit per identity; two concurrent calls can never both
    /// observe `count == max - 1` and both pass.
    pub fn admit(&self, identity_id: &str) -> Admission {
        let now = Instant::now();

        let mut entry = self
            .windows
            .entry(identity_id.to_string())
            .or_insert_with(|| QuotaWindow {
                count: 0,
                window_reset_at: now + self.window,
            });

        if now > entry.window_reset_at {
            entry.count = 0;
            entry.window_reset_at = now + self.window;
        }

        entry.count += 1;

        if entry.count > self.max_requests {
            let remaining = entry.window_reset_at.saturating_duration_since(now);
            let retry_after_secs = (remaining.as_millis().div_ceil(1000) as u64).max(1);
            Admission::Limited { retry_after_secs }
        } else {
            Admission::Allowed
        }
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn tracker(window_ms: u64, max_requests: u32) -> QuotaTracker {
        QuotaTracker::new(&RateLimitConfig {
            window_ms,
            max_requests,
        })
    }

    #[test]
    fn test_admits_up_to_max_then_rejects() {
        let tracker = tracker(60_000, 5);

        for _ in 0..5 {
            assert_eq!(tracker.admit("user-1"), Admission::Allowed);
        }

        match tracker.admit("user-1") {
            Admission::Limited { retry_after_secs } => {
                assert!(retry_after_secs >= 1);
                assert!(retry_after_secs <= 60);
            }
            Admission::Allowed => panic!("6th request should be rejected"),
        }
    }

    #[test]
    fn test_identities_are_independent() {
        let tracker = tracker(60_000, 1);

        assert_eq!(tracker.admit("user-1"), Admission::Allowed);
        assert_eq!(tracker.admit("user-2"), Admission::Allowed);
        assert!(matches!(tracker.admit("user-1"), Admission::Limited { .. }));
        assert_eq!(tracker.tracked_identities(), 2);
    }

    #[test]
    fn test_window_rollover_resets_counter() {
        let tracker = tracker(50, 2);

        assert_eq!(tracker.admit("user-1"), Admission::Allowed);
        assert_eq!(tracker.admit("user-1"), Admission::Allowed);
        assert!(matches!(tracker.admit("user-1"), Admission::Limited { .. }));

        std::thread::sleep(Duration::from_millis(80));

        assert_eq!(tracker.admit("user-1"), Admission::Allowed);
        assert_eq!(tracker.admit("user-1"), Admission::Allowed);
        assert!(matches!(tracker.admit("user-1"), Admission::Limited { .. }));
    }

    #[test]
    fn test_concurrent_admits_never_over_admit() {
        let tracker = Arc::new(tracker(60_000, 50));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let tracker = tracker.clone();
            handles.push(std::thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..25 {
                    if tracker.admit("shared-user") == Admission::Allowed {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        // 200 attempts against a budget of 50: exactly 50 admissions
        assert_eq!(total, 50);
    }
}
