//! Caching decorator for catalog fetchers.
//!
//! The engine itself keeps no state between searches. Callers who issue
//! the same variant queries repeatedly can wrap their fetcher in
//! [`CachedFetcher`], which memoises successful answers keyed by the exact
//! (query, limit) pair. Uses [`moka`] for async-friendly caching with TTL
//! and automatic eviction.

use std::time::Duration;

use moka::future::Cache;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fetcher::CandidateFetcher;
use crate::types::CandidateRecord;

/// Maximum number of cached fetch answers.
const MAX_CACHE_ENTRIES: u64 = 1_000;

/// Cache key: the query exactly as sent (the catalog is strict, so
/// `Perruque` and `perruque` may differ) and the requested limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    limit: usize,
}

impl CacheKey {
    /// Build the key for one fetch.
    pub fn new(query: &str, limit: usize) -> Self {
        Self {
            query: query.to_owned(),
            limit,
        }
    }
}

/// A fetcher that remembers successful answers for a while.
///
/// Failures are not cached, so a flaky variant is retried by the next
/// search. A TTL of zero disables caching entirely.
pub struct CachedFetcher<F> {
    inner: F,
    cache: Option<Cache<CacheKey, Vec<CandidateRecord>>>,
}

impl<F: CandidateFetcher> CachedFetcher<F> {
    /// Wrap `inner`, caching answers for `ttl_seconds`.
    pub fn new(inner: F, ttl_seconds: u64) -> Self {
        let cache = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner, cache }
    }

    /// Wrap `inner` with the TTL from `config.cache_ttl_seconds`.
    pub fn from_config(inner: F, config: &SearchConfig) -> Self {
        Self::new(inner, config.cache_ttl_seconds)
    }

    /// Whether answers are being remembered at all.
    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// The wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Drop every cached answer.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

impl<F: CandidateFetcher> CandidateFetcher for CachedFetcher<F> {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateRecord>, SearchError> {
        let Some(cache) = &self.cache else {
            return self.inner.fetch(query, limit).await;
        };

        let key = CacheKey::new(query, limit);
        if let Some(records) = cache.get(&key).await {
            tracing::trace!(query, "fetch cache hit");
            return Ok(records);
        }

        let records = self.inner.fetch(query, limit).await?;
        cache.insert(key, records.clone()).await;
        Ok(records)
    }
}
