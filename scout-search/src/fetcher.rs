//! Trait definition for the catalog a search probes.
//!
//! The engine never talks to a marketplace itself. Callers supply a
//! [`CandidateFetcher`] that runs one strict query against their catalog
//! (an HTML scraper, a database, an in-memory list) and returns raw
//! records.

use std::future::Future;

use crate::error::SearchError;
use crate::types::CandidateRecord;

/// Runs one textual query against an external catalog.
///
/// Implementations may be slow, may fail and may return nothing. The
/// orchestrator calls [`fetch`](CandidateFetcher::fetch) at most once per
/// variant and treats any error as an empty answer for that variant. It
/// never retries.
///
/// All implementations must be `Send + Sync` so one fetcher can serve
/// concurrent searches.
pub trait CandidateFetcher: Send + Sync {
    /// Fetch up to `limit` candidate records matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when the catalog cannot be queried. The
    /// orchestrator logs the error and moves on to the next variant.
    fn fetch(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CandidateRecord>, SearchError>> + Send;
}

impl<T: CandidateFetcher> CandidateFetcher for &T {
    fn fetch(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CandidateRecord>, SearchError>> + Send {
        (**self).fetch(query, limit)
    }
}

/// Adapts a synchronous closure into a [`CandidateFetcher`].
///
/// Built with [`fetch_fn`].
#[derive(Debug, Clone)]
pub struct FnFetcher<F> {
    f: F,
}

/// Wrap `f(query, limit)` as a fetcher.
///
/// # Examples
///
/// ```
/// use scout_search::{fetch_fn, CandidateRecord};
///
/// let fetcher = fetch_fn(|query: &str, _limit: usize| {
///     Ok(vec![CandidateRecord::new(format!("{query} premium"))])
/// });
/// # let _ = fetcher;
/// ```
pub fn fetch_fn<F>(f: F) -> FnFetcher<F>
where
    F: Fn(&str, usize) -> Result<Vec<CandidateRecord>, SearchError> + Send + Sync,
{
    FnFetcher { f }
}

impl<F> CandidateFetcher for FnFetcher<F>
where
    F: Fn(&str, usize) -> Result<Vec<CandidateRecord>, SearchError> + Send + Sync,
{
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateRecord>, SearchError> {
        (self.f)(query, limit)
    }
}
