//! Ranker: deterministic multi-tier ordering of matched entries.
//!
//! Literal candidates are sorted alphabetically, then peeled off in three
//! passes:
//!
//! 1. **ExactPrefix**: the folded entry starts with the whole query.
//! 2. **Contains**: the folded entry contains the whole query.
//! 3. **TokenMatch**: the token alternation matches; ordered by the offset of
//!    the earliest match, alphabetical on ties.
//!
//! Anything left after the three passes keeps its alphabetical position at
//! the end of the literal block. [`assemble`] then appends fuzzy candidates
//! alphabetically, drops duplicates and applies the cap.
//!
//! The result depends only on the catalog and the query.

use crate::catalog::CatalogEntry;
use crate::matcher::Matcher;
use crate::types::{MatchResult, MatchTier, TieBreak};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Alphabetical order: folded text, then display text.
pub fn alphabetical(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    a.folded()
        .cmp(b.folded())
        .then_with(|| a.display().cmp(b.display()))
}

/// Order the literal candidates into the ExactPrefix, Contains and
/// TokenMatch tiers.
pub fn rank<'c>(literal: &[&'c CatalogEntry], matcher: &Matcher<'_>) -> Vec<MatchResult<'c>> {
    let query = matcher.query();
    let mut remaining: Vec<&'c CatalogEntry> = literal.to_vec();
    remaining.sort_by(|a, b| alphabetical(a, b));

    let mut ranked = Vec::with_capacity(remaining.len());

    let (prefix, rest): (Vec<_>, Vec<_>) = remaining
        .into_iter()
        .partition(|e| e.folded().starts_with(query));
    ranked.extend(
        prefix
            .into_iter()
            .map(|e| MatchResult::new(e, MatchTier::ExactPrefix, TieBreak::Alphabetical)),
    );

    let (contains, rest): (Vec<_>, Vec<_>) =
        rest.into_iter().partition(|e| e.folded().contains(query));
    ranked.extend(
        contains
            .into_iter()
            .map(|e| MatchResult::new(e, MatchTier::Contains, TieBreak::Alphabetical)),
    );

    let mut tokens = Vec::new();
    let mut leftover = Vec::new();
    for entry in rest {
        match matcher.token_position(entry.folded()) {
            Some(pos) => tokens.push(MatchResult::new(
                entry,
                MatchTier::TokenMatch,
                TieBreak::Position(pos),
            )),
            None => leftover.push(entry),
        }
    }
    // Stable: equal offsets keep their alphabetical order.
    tokens.sort_by_key(|m| match m.key {
        TieBreak::Position(pos) => pos,
        TieBreak::Alphabetical => usize::MAX,
    });
    ranked.extend(tokens);

    if !leftover.is_empty() {
        tracing::debug!(
            query,
            count = leftover.len(),
            "ranker: literal entries matched no pass"
        );
    }
    ranked.extend(
        leftover
            .into_iter()
            .map(|e| MatchResult::new(e, MatchTier::TokenMatch, TieBreak::Alphabetical)),
    );

    ranked
}

/// Append fuzzy candidates to the ranked literal block, deduplicate, and cap.
pub fn assemble<'c>(
    ranked: Vec<MatchResult<'c>>,
    fuzzy: &[&'c CatalogEntry],
    cap: usize,
) -> Vec<MatchResult<'c>> {
    let mut fuzzy: Vec<&'c CatalogEntry> = fuzzy.to_vec();
    fuzzy.sort_by(|a, b| alphabetical(a, b));

    let mut seen: HashSet<&'c str> = HashSet::with_capacity(cap);
    let mut out = Vec::with_capacity(cap.min(ranked.len() + fuzzy.len()));

    let fuzzy = fuzzy
        .into_iter()
        .map(|e| MatchResult::new(e, MatchTier::Fuzzy, TieBreak::Alphabetical));
    for result in ranked.into_iter().chain(fuzzy) {
        if out.len() == cap {
            break;
        }
        if seen.insert(result.display()) {
            out.push(result);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
