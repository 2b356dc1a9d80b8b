//! Core types shared by the engine, the service and the HTTP layer.
//!
//! [`MatchTier`] and [`MatchResult`] describe how a single catalog entry
//! matched a query; [`ResultSet`] and [`SearchResponse`] are what leaves the
//! engine.

use crate::catalog::CatalogEntry;
use serde::{Deserialize, Serialize};

/// Match class of a result. Variant order is result order: every
/// `ExactPrefix` result precedes every `Contains` result, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Entry starts with the whole query.
    ExactPrefix,
    /// Entry contains the whole query somewhere after index 0.
    Contains,
    /// Entry contains at least one query token.
    TokenMatch,
    /// Entry is within the configured edit distance of the query.
    Fuzzy,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::ExactPrefix => write!(f, "exact-prefix"),
            MatchTier::Contains => write!(f, "contains"),
            MatchTier::TokenMatch => write!(f, "token"),
            MatchTier::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Ordering key inside a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Folded text, then display text.
    Alphabetical,
    /// Character offset of the earliest token match in the folded entry.
    Position(usize),
}

/// One ranked catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'c> {
    pub entry: &'c CatalogEntry,
    pub tier: MatchTier,
    pub key: TieBreak,
}

impl<'c> MatchResult<'c> {
    pub fn new(entry: &'c CatalogEntry, tier: MatchTier, key: TieBreak) -> Self {
        Self { entry, tier, key }
    }

    pub fn display(&self) -> &'c str {
        self.entry.display()
    }
}

/// Which path produced a [`ResultSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Default list returned for an empty query.
    Suggestions,
    /// Ranked matches for a non-empty query.
    Results,
}

/// Deduplicated, ordered, capped list of display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(rename = "type")]
    pub kind: ResultType,
    pub items: Vec<String>,
}

impl ResultSet {
    /// Build a set of `kind`, truncating `items` to `cap`.
    pub fn new(kind: ResultType, mut items: Vec<String>, cap: usize) -> Self {
        items.truncate(cap);
        Self { kind, items }
    }

    pub fn from_matches(matches: &[MatchResult<'_>], cap: usize) -> Self {
        let items = matches.iter().map(|m| m.display().to_string()).collect();
        Self::new(ResultType::Results, items, cap)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Response body: `{"type": ..., "items": [...], "time": seconds}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub results: ResultSet,
    /// Elapsed matching time in seconds; `0.0` on the suggestions path.
    pub time: f64,
}

impl SearchResponse {
    pub fn kind(&self) -> ResultType {
        self.results.kind
    }

    pub fn items(&self) -> &[String] {
        &self.results.items
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
