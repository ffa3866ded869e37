//! Error types for the scout-search crate.
//!
//! Only fetching and configuration can fail. Variant generation and
//! relevance scoring are infallible, and an empty result set is a normal
//! outcome rather than an error.

/// Errors that can occur around a catalog search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The catalog fetcher failed for one query.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A catalog fetch did not complete within the configured timeout.
    #[error("fetch timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A catalog source could not be loaded or decoded.
    #[error("catalog error: {0}")]
    Catalog(String),
}

/// Convenience type alias for scout-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
