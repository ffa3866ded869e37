//! In-memory catalog with marketplace-style strict search.
//!
//! [`StaticCatalog`] behaves like the storefront search this engine was
//! built to work around: a query matches only names containing it verbatim
//! (case-insensitive, but accent- and number-sensitive, no synonyms). It
//! backs the CLI and makes the whole pipeline testable offline.

use std::path::Path;

use crate::error::SearchError;
use crate::fetcher::CandidateFetcher;
use crate::types::CandidateRecord;

/// A fixed list of records searched by strict substring match.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<CandidateRecord>,
}

impl StaticCatalog {
    /// Create a catalog from records, kept in the given order.
    pub fn new(records: Vec<CandidateRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Catalog`] if the JSON is not an array of
    /// objects.
    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let records: Vec<CandidateRecord> = serde_json::from_str(json)
            .map_err(|e| SearchError::Catalog(format!("invalid catalog JSON: {e}")))?;
        Ok(Self::new(records))
    }

    /// Load a JSON array of records from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Catalog`] if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, SearchError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Catalog(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose name contains `query`, in catalog order, at most `limit`.
    pub fn lookup(&self, query: &str, limit: usize) -> Vec<CandidateRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl CandidateFetcher for StaticCatalog {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateRecord>, SearchError> {
        let records = self.lookup(query, limit);
        tracing::trace!(query, count = records.len(), "static catalog lookup");
        Ok(records)
    }
}
