//! typeahead-core: the matching, ranking and rate-limiting engine.
//!
//! This crate owns everything that happens to a search request between the
//! HTTP layer and the response body. The server crate only parses requests,
//! extracts the caller identity and maps [`SearchError`] to status codes.
//!
//! # Architecture
//!
//! ```text
//! SearchService ──► RateLimiter::check
//!       │
//!       ├──► (empty query) Catalog::head
//!       │
//!       └──► ResponseCache ──► Matcher::classify ──► ranker::rank ──► ranker::assemble
//! ```
//!
//! The [`Catalog`] is immutable and shared by reference-counted handle; the
//! [`RateLimiter`] and [`ResponseCache`] are the only state mutated across
//! concurrent requests.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod limiter;
pub mod matcher;
pub mod ranker;
pub mod sanitize;
pub mod service;
pub mod types;

pub use cache::ResponseCache;
pub use catalog::{Catalog, CatalogEntry};
pub use config::Config;
pub use engine::{SearchEngine, SearchOptions};
pub use error::{CatalogError, ConfigError, RateLimitExceeded, SearchError};
pub use limiter::{RateLimiter, RateStatus, RateWindow};
pub use matcher::{Classification, Matcher};
pub use sanitize::{escape_html, Query, QueryText};
pub use service::SearchService;
pub use types::{MatchResult, MatchTier, ResultSet, ResultType, SearchResponse, TieBreak};
