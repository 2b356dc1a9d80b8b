//! Input sanitisation and query normalisation.
//!
//! Raw user input is trimmed, HTML-escaped and lowercased before it reaches
//! the matcher. The escaped form is what gets matched, so a query containing
//! `'` is compared as `&#x27;`.

/// Escape the characters that are unsafe to echo into markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&grave;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// A sanitised query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// The user has typed nothing (or only whitespace).
    Empty,
    /// Non-blank input, escaped and folded.
    Text(QueryText),
}

impl Query {
    /// Normalise raw input: trim, escape, lowercase.
    pub fn parse(raw: Option<&str>) -> Query {
        match raw.map(str::trim) {
            None | Some("") => Query::Empty,
            Some(text) => Query::Text(QueryText::new(&escape_html(text).to_lowercase())),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Query::Empty)
    }

    pub fn text(&self) -> Option<&QueryText> {
        match self {
            Query::Empty => None,
            Query::Text(text) => Some(text),
        }
    }
}

/// Non-empty, folded query text together with its word tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText {
    folded: String,
    tokens: Vec<String>,
}

impl QueryText {
    /// Wrap already-folded text. Tokens are maximal runs of word characters.
    pub fn new(folded: &str) -> Self {
        let tokens = folded
            .split(|c: char| !is_word_char(c))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            folded: folded.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
