//! Assertion macros for ranking and response invariants.

use typeahead::{MatchResult, MatchTier};

/// Assert that tiers never interleave: the sequence of tiers is sorted.
#[macro_export]
macro_rules! assert_tier_order {
    ($results:expr) => {{
        let results: &[typeahead::MatchResult<'_>] = &$results;
        for pair in results.windows(2) {
            if pair[0].tier > pair[1].tier {
                panic!(
                    "assert_tier_order! failed: {:?} ({}) ranked before {:?} ({})\n  full: {:?}",
                    pair[0].display(),
                    pair[0].tier,
                    pair[1].display(),
                    pair[1].tier,
                    $crate::common::describe(results)
                );
            }
        }
    }};
}

/// Assert the exact item list, with a readable diff.
#[macro_export]
macro_rules! assert_items {
    ($actual:expr, [$($item:expr),* $(,)?]) => {{
        let expected: Vec<String> = vec![$($item.to_string()),*];
        pretty_assertions::assert_eq!($actual, expected);
    }};
}

/// `display (tier)` pairs, for failure messages.
pub fn describe(results: &[MatchResult<'_>]) -> Vec<String> {
    results
        .iter()
        .map(|m| format!("{} ({})", m.display(), m.tier))
        .collect()
}

/// Index of the first result in `tier`, if any.
pub fn first_of_tier(results: &[MatchResult<'_>], tier: MatchTier) -> Option<usize> {
    results.iter().position(|m| m.tier == tier)
}
