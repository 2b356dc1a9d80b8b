//! Matcher: splits the catalog into literal and fuzzy candidates for a query.
//!
//! # Literal candidates
//!
//! The query tokens are joined into a case-insensitive alternation
//! (`tok1|tok2|...`). An entry is literal when the alternation matches it, or
//! when it contains the whole query (the only way a separator-only query such
//! as `-` can match). The tier of a literal candidate is decided later by the
//! ranker.
//!
//! # Fuzzy candidates
//!
//! An entry that is not literal is a fuzzy candidate when its folded text is
//! within `max_distance` edits of the query. Every qualifying entry is
//! collected; only the `fuzzy_cap` alphabetically smallest are kept.

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::SearchError;
use crate::fuzzy::levenshtein_within;
use crate::ranker::alphabetical;
use crate::sanitize::QueryText;
use regex::{Regex, RegexBuilder};

/// Literal candidates in catalog order; fuzzy candidates in alphabetical
/// order.
#[derive(Debug, Default, Clone)]
pub struct Classification<'c> {
    pub literal: Vec<&'c CatalogEntry>,
    pub fuzzy: Vec<&'c CatalogEntry>,
}

/// A query compiled for matching.
#[derive(Debug, Clone)]
pub struct Matcher<'q> {
    query: &'q QueryText,
    pattern: Option<Regex>,
    max_distance: usize,
    fuzzy_cap: usize,
}

impl<'q> Matcher<'q> {
    /// Compile the token alternation for `query`.
    ///
    /// Fails only if the regex engine rejects the pattern (for example a
    /// query long enough to exceed its size limit).
    pub fn new(
        query: &'q QueryText,
        max_distance: usize,
        fuzzy_cap: usize,
    ) -> Result<Self, SearchError> {
        let pattern = if query.tokens().is_empty() {
            None
        } else {
            let alternation = query
                .tokens()
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Some(RegexBuilder::new(&alternation).case_insensitive(true).build()?)
        };
        Ok(Self {
            query,
            pattern,
            max_distance,
            fuzzy_cap,
        })
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Character offset of the earliest token match in `folded`, if any.
    pub fn token_position(&self, folded: &str) -> Option<usize> {
        let found = self.pattern.as_ref()?.find(folded)?;
        Some(folded[..found.start()].chars().count())
    }

    /// Whether `entry` is a literal candidate.
    pub fn is_literal(&self, entry: &CatalogEntry) -> bool {
        let folded = entry.folded();
        self.pattern.as_ref().is_some_and(|p| p.is_match(folded))
            || folded.contains(self.query.as_str())
    }

    /// Whether `entry` is within the edit-distance bound of the query.
    pub fn is_fuzzy(&self, entry: &CatalogEntry) -> bool {
        levenshtein_within(entry.folded(), self.query.as_str(), self.max_distance)
    }

    /// Scan the whole catalog once.
    pub fn classify<'c>(&self, catalog: &'c Catalog) -> Classification<'c> {
        let mut out = Classification::default();
        for entry in catalog {
            if self.is_literal(entry) {
                out.literal.push(entry);
            } else if self.is_fuzzy(entry) {
                out.fuzzy.push(entry);
            }
        }
        out.fuzzy.sort_by(|a, b| alphabetical(a, b));
        out.fuzzy.truncate(self.fuzzy_cap);
        tracing::trace!(
            query = self.query(),
            literal = out.literal.len(),
            fuzzy = out.fuzzy.len(),
            "matcher: catalog classified"
        );
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
