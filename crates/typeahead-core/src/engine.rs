//! SearchEngine: classify → rank → assemble over one catalog.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::SearchError;
use crate::matcher::Matcher;
use crate::ranker;
use crate::sanitize::QueryText;
use crate::types::MatchResult;

/// Knobs that shape a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Result cap, also the fuzzy candidate cap.
    pub max_results: usize,
    /// Largest edit distance accepted for a fuzzy candidate.
    pub fuzzy_max_distance: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 8,
            fuzzy_max_distance: 2,
        }
    }
}

impl From<&Config> for SearchOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_results: config.search.max_results,
            fuzzy_max_distance: config.search.fuzzy_max_distance,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Catalog,
    options: SearchOptions,
}

impl SearchEngine {
    pub fn new(catalog: Catalog, options: SearchOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Default list for an empty query: the head of the catalog.
    pub fn suggestions(&self) -> Vec<String> {
        self.catalog.head(self.options.max_results)
    }

    /// Ranked, deduplicated, capped matches for `query`.
    pub fn search(&self, query: &QueryText) -> Result<Vec<MatchResult<'_>>, SearchError> {
        let matcher = Matcher::new(
            query,
            self.options.fuzzy_max_distance,
            self.options.max_results,
        )?;
        let classes = matcher.classify(&self.catalog);
        let ranked = ranker::rank(&classes.literal, &matcher);
        let results = ranker::assemble(ranked, &classes.fuzzy, self.options.max_results);

        tracing::debug!(
            query = query.as_str(),
            literal = classes.literal.len(),
            fuzzy = classes.fuzzy.len(),
            returned = results.len(),
            top_tier = ?results.first().map(|m| m.tier),
            "engine: search complete"
        );
        Ok(results)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
