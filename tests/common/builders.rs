//! Builders for configs, services and routers used across harnesses.

use std::sync::Arc;
use typeahead::server::{self, AppState};
use typeahead::{Catalog, Config, SearchEngine, SearchOptions, SearchService};

/// Fluent wrapper over [`Config::defaults`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            config: Config::defaults(),
        }
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rate_limit(mut self, count: u32, interval_ms: u64) -> Self {
        self.config.rate_limit.count = count;
        self.config.rate_limit.interval_ms = interval_ms;
        self
    }

    pub fn max_keys(mut self, max_keys: usize) -> Self {
        self.config.rate_limit.max_keys = max_keys;
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.config.search.max_results = max_results;
        self
    }

    pub fn no_cache(mut self) -> Self {
        self.config.cache.capacity = 0;
        self
    }

    pub fn origins(mut self, origins: &[&str]) -> Self {
        self.config.server.allowed_origins = origins.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Engine over `catalog` with the default options.
pub fn engine_for(catalog: Catalog) -> SearchEngine {
    SearchEngine::new(catalog, SearchOptions::default())
}

/// Run `raw` through `engine` and return the display strings.
pub fn search_items(engine: &SearchEngine, raw: &str) -> Vec<String> {
    let query = typeahead::Query::parse(Some(raw));
    match query.text() {
        Some(text) => engine
            .search(text)
            .expect("search must not fail")
            .iter()
            .map(|m| m.display().to_string())
            .collect(),
        None => engine.suggestions(),
    }
}

pub fn service(catalog: Catalog, config: &Config) -> Arc<SearchService> {
    Arc::new(SearchService::new(catalog, config))
}

/// Router over the built-in catalog.
pub fn app(config: &Config) -> axum::Router {
    let service = SearchService::new(Catalog::builtin(), config);
    server::router(AppState::new(service, config))
}
