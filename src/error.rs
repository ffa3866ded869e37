//! Error types for the catalog-scout application.

use scout_search::SearchError;

/// Top-level error type for the application layer.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// Configuration or vocabulary file error.
    #[error("config error: {0}")]
    Config(String),

    /// Search engine error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Result rendering error.
    #[error("output error: {0}")]
    Output(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScoutError>;
