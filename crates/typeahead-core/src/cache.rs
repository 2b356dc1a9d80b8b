//! ResponseCache: bounded, time-boxed memo of ranked results.
//!
//! Keyed by the normalised query text. An entry older than the TTL is a miss
//! and is dropped on lookup; inserting past capacity evicts the entry that was
//! used least recently. A capacity of zero disables the cache.

use crate::config::Config;
use crate::types::ResultSet;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct CacheSlot {
    value: ResultSet,
    stored: Instant,
    last_used: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    slots: HashMap<String, CacheSlot>,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Hit/miss counters, for logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug)]
pub struct ResponseCache {
    state: Mutex<CacheState>,
    capacity: usize,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity,
            ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache.capacity, config.cache.ttl())
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0 && !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<ResultSet> {
        if !self.is_enabled() {
            return None;
        }
        let now = Instant::now();
        let mut state = self.state.lock();
        let tick = state.next_tick();

        let fresh = state
            .slots
            .get(key)
            .map(|slot| now.saturating_duration_since(slot.stored) < self.ttl);
        match fresh {
            None => {
                state.misses += 1;
                None
            }
            Some(false) => {
                state.slots.remove(key);
                state.misses += 1;
                None
            }
            Some(true) => {
                state.hits += 1;
                let slot = state.slots.get_mut(key)?;
                slot.last_used = tick;
                Some(slot.value.clone())
            }
        }
    }

    pub fn put(&self, key: impl Into<String>, value: ResultSet) {
        if !self.is_enabled() {
            return;
        }
        let now = Instant::now();
        let mut state = self.state.lock();
        let tick = state.next_tick();
        state.slots.insert(
            key.into(),
            CacheSlot {
                value,
                stored: now,
                last_used: tick,
            },
        );

        while state.slots.len() > self.capacity {
            let oldest = state
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    state.slots.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.slots.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
