//! RateLimiter: fixed-window request counting per client key.
//!
//! Each key owns a [`RateWindow`]. A `check` that lands after the window has
//! expired starts a new window; otherwise it increments the count, and once
//! the count passes the limit every further call in that window fails.
//!
//! # Concurrency
//!
//! Windows live in a [`DashMap`], so calls for different keys hit different
//! shards and calls for the same key are serialised by the shard guard.
//!
//! # Capacity
//!
//! At most `max_keys` windows are tracked. Every `check` stamps its key with a
//! global tick; when a new key pushes the map over capacity, the key with the
//! oldest stamp is evicted.

use crate::config::Config;
use crate::error::RateLimitExceeded;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// RateWindow
// ---------------------------------------------------------------------------

/// Bookkeeping for one client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub started: Instant,
    pub count: u32,
    pub limit: u32,
    pub interval: Duration,
}

impl RateWindow {
    pub fn new(now: Instant, limit: u32, interval: Duration) -> Self {
        Self {
            started: now,
            count: 0,
            limit,
            interval,
        }
    }

    /// Count one request at `now` against `limit`.
    pub fn record(&mut self, now: Instant, limit: u32) -> Result<RateStatus, RateLimitExceeded> {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.interval {
            self.started = now;
            self.count = 0;
        }
        self.limit = limit;
        self.count = self.count.saturating_add(1);

        if self.count > limit {
            let retry_after = self
                .interval
                .saturating_sub(now.saturating_duration_since(self.started));
            return Err(RateLimitExceeded { limit, retry_after });
        }
        Ok(RateStatus {
            limit,
            remaining: limit - self.count,
        })
    }
}

/// Outcome of an accepted `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateStatus {
    pub limit: u32,
    /// Requests still allowed in the current window.
    pub remaining: u32,
}

// ---------------------------------------------------------------------------
// RateLimiter
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Slot {
    window: RateWindow,
    last_seen: u64,
}

#[derive(Debug)]
pub struct RateLimiter {
    windows: DashMap<String, Slot>,
    interval: Duration,
    max_keys: usize,
    tick: AtomicU64,
}

impl RateLimiter {
    pub fn new(interval: Duration, max_keys: usize) -> Self {
        Self {
            windows: DashMap::new(),
            interval,
            max_keys: max_keys.max(1),
            tick: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rate_limit.interval(), config.rate_limit.max_keys)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Count one request for `key` against `limit`.
    pub fn check(&self, limit: u32, key: &str) -> Result<RateStatus, RateLimitExceeded> {
        let now = Instant::now();
        let stamp = self.tick.fetch_add(1, Ordering::Relaxed);

        if let Some(mut slot) = self.windows.get_mut(key) {
            slot.last_seen = stamp;
            return self.report(key, slot.window.record(now, limit));
        }

        let mut inserted = false;
        let outcome = {
            let mut slot = self.windows.entry(key.to_string()).or_insert_with(|| {
                inserted = true;
                Slot {
                    window: RateWindow::new(now, limit, self.interval),
                    last_seen: stamp,
                }
            });
            slot.last_seen = stamp;
            slot.window.record(now, limit)
        };

        if inserted && self.windows.len() > self.max_keys {
            self.evict_oldest(key);
        }
        self.report(key, outcome)
    }

    /// Snapshot of the window held for `key`.
    pub fn window(&self, key: &str) -> Option<RateWindow> {
        self.windows.get(key).map(|slot| slot.window)
    }

    /// Number of client keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    fn report(
        &self,
        key: &str,
        outcome: Result<RateStatus, RateLimitExceeded>,
    ) -> Result<RateStatus, RateLimitExceeded> {
        if let Err(err) = &outcome {
            tracing::warn!(
                key,
                limit = err.limit,
                retry_after_ms = err.retry_after.as_millis() as u64,
                "rate limit exceeded"
            );
        }
        outcome
    }

    fn evict_oldest(&self, keep: &str) {
        while self.windows.len() > self.max_keys {
            let oldest = self
                .windows
                .iter()
                .filter(|slot| slot.key() != keep)
                .min_by_key(|slot| slot.last_seen)
                .map(|slot| slot.key().clone());
            let Some(oldest) = oldest else { break };
            self.windows.remove(&oldest);
            tracing::debug!(key = %oldest, "rate limiter: evicted least recently used key");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
