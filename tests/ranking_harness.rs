#![allow(unused)]
//! Ranking integration harness.
//!
//! # What this covers
//!
//! - **Concrete scenarios**: the `"gi"` catalog, the empty query, tier layout
//!   for `"owl"`, multi-token queries and misspellings against the built-in
//!   catalog.
//! - **Property: cap**: no query returns more than `max_results` items.
//! - **Property: tier order**: ExactPrefix, Contains, TokenMatch and Fuzzy
//!   results never interleave.
//! - **Property: determinism**: the same catalog and query always produce the
//!   same list.
//! - **Property: exact first**: an entry equal to the query precedes every
//!   entry that merely contains it.
//!
//! # What this does NOT cover
//!
//! - Rate limiting (see limiter_harness)
//! - HTTP status mapping and CORS (see http_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test ranking_harness
//! PROPTEST_CASES=2000 cargo test --test ranking_harness
//! ```

mod common;
use common::*;
use proptest::prelude::*;
use rstest::rstest;
use typeahead::{Catalog, MatchTier, Query, ResultType, SearchEngine, SearchOptions, SearchService};

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn gi_returns_prefix_matches_alphabetically() {
    let engine = engine_for(gi_catalog());
    assert_items!(search_items(&engine, "gi"), ["Gila monster", "Giraffe"]);
}

#[test]
fn gi_is_case_insensitive() {
    let engine = engine_for(gi_catalog());
    assert_eq!(search_items(&engine, "GI"), search_items(&engine, "gi"));
    assert_eq!(search_items(&engine, "  gi  "), search_items(&engine, "gi"));
}

#[test]
fn empty_query_yields_catalog_head() {
    let service = SearchService::new(Catalog::builtin(), &ConfigBuilder::new().build());
    let first = service.handle(Some("   "), "a").unwrap();
    let second = service.handle(None, "b").unwrap();

    assert_eq!(first.kind(), ResultType::Suggestions);
    assert_eq!(first.time, 0.0);
    assert_eq!(first.items(), Catalog::builtin().head(8).as_slice());
    assert_eq!(first.items()[0], "Wallaby, tammar");
    assert_eq!(first, second);
}

#[test]
fn owl_layout_follows_tiers() {
    let catalog = owl_catalog();
    let engine = engine_for(catalog);
    let text = Query::parse(Some("owl")).text().cloned().unwrap();
    let results = engine.search(&text).unwrap();

    assert_tier_order!(results);
    assert_eq!(results[0].display(), "Owl, burrowing");
    assert_eq!(results[1].display(), "Owl, great horned");
    assert_eq!(first_of_tier(&results, MatchTier::Contains), Some(2));
    // "ewe" is two edits from "owl".
    assert_eq!(results.last().map(|m| (m.display(), m.tier)), Some(("Ewe", MatchTier::Fuzzy)));
}

#[test]
fn multi_token_query_ranks_by_first_token_offset() {
    let engine = engine_for(deer_catalog());
    let items = search_items(&engine, "red deer");
    assert_eq!(items[0], "Red deer");
    // Every entry with "red" or "deer" somewhere is present.
    for label in ["Deer, red", "Swamp deer", "Deer, mule", "Red kangaroo", "Fox, north american red"] {
        assert!(items.contains(&label.to_string()), "{label} missing from {items:?}");
    }
}

#[test]
fn misspelling_reaches_fuzzy_tier() {
    let engine = SearchEngine::new(Catalog::builtin(), SearchOptions::default());
    let text = Query::parse(Some("Cheetha")).text().cloned().unwrap();
    let results = engine.search(&text).unwrap();
    assert!(
        results
            .iter()
            .any(|m| m.display() == "Cheetah" && m.tier == MatchTier::Fuzzy),
        "{:?}",
        describe(&results)
    );
}

#[test]
fn markup_in_query_is_matched_escaped() {
    let engine = engine_for(catalog_of(&["Burchell's gonolek", "Gonolek, burchell's"]));
    // The escaped apostrophe never matches the label text; the tokens still do.
    let items = search_items(&engine, "burchell's");
    assert_eq!(items.len(), 2);
}

#[rstest]
#[case("dove", "Dove, galapagos")]
#[case("GALAPAGOS", "Galapagos albatross")]
#[case("sea lion", "Sea lion, california")]
#[case("alpaka", "Alpaca")]
fn catalog_file_is_searchable(#[case] raw: &str, #[case] first: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.txt");
    std::fs::write(
        &path,
        "# custom labels\nDove, galapagos\nGalapagos albatross\nSea lion, california\n\nAlpaca\n",
    )
    .unwrap();

    let engine = engine_for(Catalog::load(&path).unwrap());
    assert_eq!(engine.catalog().len(), 4);
    assert_eq!(search_items(&engine, raw)[0], first);
}

#[test]
fn nothing_matches_nonsense() {
    let engine = SearchEngine::new(Catalog::builtin(), SearchOptions::default());
    assert!(search_items(&engine, "xqzxqzxqz").is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}( [a-z]{1,8})?", 1..40)
}

fn engine_with(labels: &[String], max_results: usize) -> Option<SearchEngine> {
    let catalog = Catalog::from_lines(labels.iter()).ok()?;
    Some(SearchEngine::new(
        catalog,
        SearchOptions {
            max_results,
            fuzzy_max_distance: 2,
        },
    ))
}

proptest! {
    #[test]
    fn never_exceeds_cap(labels in labels(), query in "[a-z ]{1,6}", cap in 1usize..12) {
        let engine = engine_with(&labels, cap).unwrap();
        if let Some(text) = Query::parse(Some(&query)).text() {
            let results = engine.search(text).unwrap();
            prop_assert!(results.len() <= cap);
        }
    }

    #[test]
    fn tiers_never_interleave(labels in labels(), query in "[a-z]{1,4}( [a-z]{1,4})?") {
        let engine = engine_with(&labels, 8).unwrap();
        let text = Query::parse(Some(&query)).text().cloned().unwrap();
        let results = engine.search(&text).unwrap();
        for pair in results.windows(2) {
            prop_assert!(pair[0].tier <= pair[1].tier, "{:?}", describe(&results));
        }
    }

    #[test]
    fn ranking_is_deterministic(labels in labels(), query in "[a-z]{1,5}") {
        let engine = engine_with(&labels, 8).unwrap();
        let first = search_items(&engine, &query);
        for _ in 0..3 {
            prop_assert_eq!(&search_items(&engine, &query), &first);
        }
        // A fresh engine over the same labels agrees too.
        let again = engine_with(&labels, 8).unwrap();
        prop_assert_eq!(search_items(&again, &query), first);
    }

    #[test]
    fn exact_entry_precedes_substring_matches(
        labels in labels(),
        pick in any::<prop::sample::Index>(),
    ) {
        let engine = engine_with(&labels, 8).unwrap();
        let exact = pick.get(engine.catalog().entries()).display().to_string();
        let items = search_items(&engine, &exact);

        let exact_at = items.iter().position(|i| *i == exact);
        prop_assert!(exact_at.is_some(), "{exact:?} missing from {items:?}");
        let exact_at = exact_at.unwrap();
        for (at, item) in items.iter().enumerate() {
            if *item != exact && item.contains(exact.as_str()) && !item.starts_with(exact.as_str()) {
                prop_assert!(exact_at < at, "{exact:?} after {item:?} in {items:?}");
            }
        }
    }

    #[test]
    fn results_are_unique_catalog_members(labels in labels(), query in "[a-z]{1,5}") {
        let engine = engine_with(&labels, 8).unwrap();
        let items = search_items(&engine, &query);
        let mut seen = std::collections::HashSet::new();
        for item in &items {
            prop_assert!(seen.insert(item.clone()), "duplicate {item:?}");
            prop_assert!(engine.catalog().iter().any(|e| e.display() == item.as_str()));
        }
    }
}
