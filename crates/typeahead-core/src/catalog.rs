//! Catalog: the fixed, ordered list of labels the engine searches over.
//!
//! A [`Catalog`] is built once at startup and never mutated; clones share the
//! same backing slice. [`Catalog::builtin`] returns the embedded animal-name
//! list, initialised on first use.

use crate::error::CatalogError;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.txt");

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_lines(BUILTIN_CATALOG.lines()).expect("embedded catalog must not be empty")
});

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

/// One label, with its lowercase form precomputed for matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    display: Box<str>,
    folded: Box<str>,
}

impl CatalogEntry {
    pub fn new(display: &str) -> Self {
        Self {
            display: display.into(),
            folded: display.to_lowercase().into(),
        }
    }

    /// The label as it is shown to users.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The label lowercased; all matching runs against this.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<[CatalogEntry]>,
}

impl Catalog {
    /// The process-wide built-in catalog.
    pub fn builtin() -> Catalog {
        BUILTIN.clone()
    }

    /// Build a catalog from lines of text.
    ///
    /// Lines are trimmed; blank lines and lines starting with `#` are skipped.
    /// Duplicate labels keep their first position.
    pub fn from_lines<I, S>(lines: I) -> Result<Catalog, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for line in lines {
            let label = line.as_ref().trim();
            if label.is_empty() || label.starts_with('#') {
                continue;
            }
            if !seen.insert(label.to_string()) {
                tracing::debug!(label, "catalog: duplicate label skipped");
                continue;
            }
            entries.push(CatalogEntry::new(label));
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Catalog {
            entries: entries.into(),
        })
    }

    /// Read a catalog file with one label per line.
    pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Catalog::from_lines(text.lines())?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// The first `n` labels in catalog order.
    pub fn head(&self, n: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(n)
            .map(|e| e.display().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
