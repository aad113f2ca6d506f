//! In-process fixed-window rate limiter.
//!
//! The first request for a key opens a window; up to `max_requests` are
//! admitted until it closes. A request at or after the window end opens a
//! fresh window.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::ports::{RateLimitDenied, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter};

use super::config::RateLimitConfig;

/// Fixed-window counter keyed by `RateLimitKey`.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    config: RateLimitConfig,
    windows: HashMap<RateLimitKey, WindowState>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone, Copy)]
struct WindowState {
    /// Requests admitted in the current window.
    count: u32,
    /// When the current window closes.
    ends_at: Instant,
}

impl FixedWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: HashMap::new(),
        }
    }

    /// Create a rate limiter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn check_at(&mut self, key: &RateLimitKey, now: Instant) -> RateLimitResult {
        let limit = self.config.max_requests;
        let window = self.config.window();

        let state = self
            .windows
            .entry(key.clone())
            .or_insert_with(|| WindowState {
                count: 0,
                ends_at: now + window,
            });

        if now >= state.ends_at {
            state.count = 0;
            state.ends_at = now + window;
        }

        let remaining_time = state.ends_at.saturating_duration_since(now);

        if state.count >= limit {
            tracing::debug!(%key, retry_after = ?remaining_time, "rate limit denied");
            return RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after: remaining_time.max(Duration::from_millis(1)),
            });
        }

        state.count += 1;
        RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(state.count),
            resets_in: remaining_time,
        })
    }

    fn time_until_reset_at(&self, key: &RateLimitKey, now: Instant) -> Duration {
        self.windows
            .get(key)
            .map(|state| state.ends_at.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    fn reset(&mut self, key: &RateLimitKey) {
        self.windows.remove(key);
    }

    fn clear(&mut self) {
        self.windows.clear();
    }
}
