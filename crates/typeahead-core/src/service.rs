//! SearchService: the request pipeline shared by the HTTP handler and the CLI.
//!
//! `handle` sanitises the raw input, charges the caller's rate window, and
//! then either returns the default suggestions or runs the engine (through
//! the response cache). Rate limiting always happens before any matching
//! work, including for empty queries and cache hits.

use crate::cache::ResponseCache;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::{SearchEngine, SearchOptions};
use crate::error::SearchError;
use crate::limiter::RateLimiter;
use crate::sanitize::{Query, QueryText};
use crate::types::{ResultSet, ResultType, SearchResponse};
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

#[derive(Debug)]
pub struct SearchService {
    engine: SearchEngine,
    limiter: RateLimiter,
    cache: ResponseCache,
    rate_limit_count: u32,
}

impl SearchService {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        tracing::info!(
            entries = catalog.len(),
            max_results = config.search.max_results,
            rate_limit = config.rate_limit.count,
            interval_ms = config.rate_limit.interval_ms,
            cache_capacity = config.cache.capacity,
            "search service ready"
        );
        Self {
            engine: SearchEngine::new(catalog, SearchOptions::from(config)),
            limiter: RateLimiter::from_config(config),
            cache: ResponseCache::from_config(config),
            rate_limit_count: config.rate_limit.count,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Run one request for `client_key`.
    pub fn handle(&self, raw: Option<&str>, client_key: &str) -> Result<SearchResponse, SearchError> {
        let query = Query::parse(raw);
        self.limiter.check(self.rate_limit_count, client_key)?;

        let text = match query {
            Query::Empty => {
                return Ok(SearchResponse {
                    results: ResultSet::new(
                        ResultType::Suggestions,
                        self.engine.suggestions(),
                        self.engine.options().max_results,
                    ),
                    time: 0.0,
                });
            }
            Query::Text(text) => text,
        };

        let started = Instant::now();
        let results = match self.cache.get(text.as_str()) {
            Some(hit) => hit,
            None => {
                let fresh = self.run_engine(&text)?;
                self.cache.put(text.as_str(), fresh.clone());
                fresh
            }
        };
        let elapsed = started.elapsed();

        tracing::debug!(
            query = text.as_str(),
            items = results.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "search handled"
        );
        Ok(SearchResponse {
            results,
            time: elapsed.as_secs_f64(),
        })
    }

    fn run_engine(&self, text: &QueryText) -> Result<ResultSet, SearchError> {
        let cap = self.engine.options().max_results;
        guarded(text, || {
            self.engine
                .search(text)
                .map(|matches| ResultSet::from_matches(&matches, cap))
        })
    }
}

/// Run `search`, turning a panic into a generic [`SearchError::Internal`].
fn guarded<F>(text: &QueryText, search: F) -> Result<ResultSet, SearchError>
where
    F: FnOnce() -> Result<ResultSet, SearchError>,
{
    match panic::catch_unwind(AssertUnwindSafe(search)) {
        Ok(Ok(results)) => Ok(results),
        Ok(Err(err)) => {
            tracing::error!(query = text.as_str(), error = %err, "search failed");
            Err(err)
        }
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(query = text.as_str(), %detail, "search panicked");
            Err(SearchError::internal("search panicked"))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
