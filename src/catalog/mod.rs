//! In-memory catalog store.
//!
//! One store per scan: locale → flattened key → entry. Built once by the
//! active library adapter's catalog loader and read-only for the rest of
//! the scan. Key collisions between source files merge last-write-wins;
//! this is intentional and documented, not silently corrected.

pub mod json;
pub mod properties;

use std::collections::HashMap;

/// One catalog entry: the translated value plus where it was defined,
/// so catalog-side findings can point at the right file and line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub value: String,
    pub file_path: String,
    pub line: usize,
}

/// All entries for a single locale, keyed by flattened key.
#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    pub locale: String,
    pub entries: HashMap<String, CatalogEntry>,
}

impl LocaleCatalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry; an existing entry for the key is overwritten
    /// (last write wins).
    pub fn insert(&mut self, key: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(key.into(), entry);
    }
}

/// Catalogs for every configured locale.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    pub by_locale: HashMap<String, LocaleCatalog>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(&self, locale: &str) -> Option<&LocaleCatalog> {
        self.by_locale.get(locale)
    }

    pub fn locale_mut(&mut self, locale: &str) -> &mut LocaleCatalog {
        self.by_locale
            .entry(locale.to_string())
            .or_insert_with(|| LocaleCatalog::new(locale))
    }

    /// True when no locale holds any entry (e.g. catalog loading degraded).
    pub fn is_empty(&self) -> bool {
        self.by_locale.values().all(|catalog| catalog.is_empty())
    }
}

/// A warning produced while loading catalog files. Loading degrades
/// locally: the affected locale/namespace contributes nothing, the scan
/// continues.
#[derive(Debug, Clone)]
pub struct CatalogWarning {
    pub file_path: String,
    pub error: String,
}

/// Result of loading all catalogs for a scan.
#[derive(Debug, Default)]
pub struct CatalogLoadResult {
    pub store: CatalogStore,
    pub warnings: Vec<CatalogWarning>,
}
