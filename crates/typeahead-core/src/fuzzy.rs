//! Levenshtein edit distance over Unicode scalar values.
//!
//! Insert, delete and substitute each cost one. [`levenshtein_within`] is the
//! hot-path variant used by the matcher: it gives up as soon as the answer is
//! known to exceed the bound.

/// Exact edit distance between `a` and `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, bc) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != *bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b_chars.len()]
}

/// Is the edit distance between `a` and `b` at most `max`?
///
/// Exits early when the length difference alone exceeds `max`, and when every
/// cell of a DP row does.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a.chars().count();
    if a_len.abs_diff(b_chars.len()) > max {
        return false;
    }

    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];
        for (j, bc) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != *bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
            row_min = row_min.min(row[j + 1]);
        }
        if row_min > max {
            return false;
        }
    }
    row[b_chars.len()] <= max
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
