//! typeahead: search-as-you-type suggestions over a fixed label catalog.
//!
//! This crate re-exports `typeahead-core` at its root and the HTTP layer as
//! [`server`], so integration tests, benches and the binary share one import
//! path.
//!
//! # Architecture
//!
//! ```text
//! HTTP (typeahead-server) ──► SearchService ──► RateLimiter
//!                                   │
//!                                   └──► ResponseCache ──► SearchEngine ──► Catalog
//! ```

pub use typeahead_core::*;
pub use typeahead_server as server;
