//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls fuzzy expansion, the acceptance and early-stop
//! thresholds, and how hard the catalog is probed. The defaults reproduce
//! the tuning of the marketplace deployment this engine was built for.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Upper bound for relevance scores.
pub const MAX_SCORE: f64 = 100.0;

/// Configuration for a catalog search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Expand the term into variants and filter by relevance. When `false`
    /// only the raw term is queried and results are returned unfiltered,
    /// in catalog order.
    pub fuzzy: bool,
    /// Maximum number of variants generated, and therefore the maximum
    /// number of catalog fetches per search.
    pub max_variants: usize,
    /// Candidates scoring below this are discarded.
    pub min_score: f64,
    /// Candidates scoring at least this count towards the early stop.
    pub confident_score: f64,
    /// Number of records requested from the catalog per variant. `None`
    /// requests as many as the caller's result limit.
    pub per_variant_limit: Option<usize>,
    /// Per-fetch timeout in milliseconds. Set to 0 to disable.
    pub fetch_timeout_ms: u64,
    /// Time-to-live of [`crate::CachedFetcher`] entries in seconds, applied
    /// by [`crate::CachedFetcher::from_config`]. Set to 0 to disable.
    pub cache_ttl_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy: true,
            max_variants: 10,
            min_score: 30.0,
            confident_score: 40.0,
            per_variant_limit: None,
            fetch_timeout_ms: 0,
            cache_ttl_seconds: 600,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_variants` must be greater than 0
    /// - `min_score` and `confident_score` must lie within `[0, 100]`
    /// - `min_score` must be <= `confident_score`
    /// - `per_variant_limit`, when set, must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_variants == 0 {
            return Err(SearchError::Config(
                "max_variants must be greater than 0".into(),
            ));
        }
        for (name, value) in [
            ("min_score", self.min_score),
            ("confident_score", self.confident_score),
        ] {
            if !(0.0..=MAX_SCORE).contains(&value) {
                return Err(SearchError::Config(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if self.min_score > self.confident_score {
            return Err(SearchError::Config(
                "min_score must be <= confident_score".into(),
            ));
        }
        if self.per_variant_limit == Some(0) {
            return Err(SearchError::Config(
                "per_variant_limit must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Number of records to request per variant for a given result limit.
    pub fn fetch_limit(&self, result_limit: usize) -> usize {
        self.per_variant_limit.unwrap_or(result_limit)
    }
}
