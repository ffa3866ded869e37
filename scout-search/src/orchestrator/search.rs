//! Core search orchestrator: sequential variant probing, dedup, score, rank.
//!
//! Walks the variant list in priority order, fetching each variant from the
//! caller's catalog, scores every newly seen candidate against the original
//! term, and stops as soon as enough confident matches have been collected.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::fetcher::CandidateFetcher;
use crate::types::{CandidateRecord, ScoredCandidate, SearchReport};
use crate::variants::{AccentFolder, Inflector, VariantGenerator};
use crate::vocabulary::Vocabulary;

use super::dedup::{identity, SeenIdentities};
use super::scoring::RelevanceScorer;

/// A configured search engine over any [`CandidateFetcher`].
///
/// Holds no per-search state: one instance can serve concurrent searches
/// from many tasks.
///
/// # Examples
///
/// ```
/// use scout_search::{fetch_fn, CandidateRecord, CatalogSearch, SearchConfig};
///
/// # async fn example() -> scout_search::Result<()> {
/// let engine = CatalogSearch::new(SearchConfig::default())?;
/// let catalog = fetch_fn(|query: &str, _limit: usize| {
///     Ok(vec![CandidateRecord::new(format!("{query} lisse 24 pouces"))])
/// });
/// let records = engine.search("perruque", &catalog, 5).await;
/// assert_eq!(records[0].name, "perruque lisse 24 pouces");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    config: SearchConfig,
    generator: VariantGenerator,
    scorer: RelevanceScorer,
}

impl Default for CatalogSearch {
    fn default() -> Self {
        Self::build(SearchConfig::default(), Arc::new(Vocabulary::default()))
    }
}

impl CatalogSearch {
    /// Create an engine with the bundled vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_vocabulary(config, Vocabulary::default())
    }

    /// Create an engine with a custom vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn with_vocabulary(config: SearchConfig, vocabulary: Vocabulary) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Arc::new(vocabulary)))
    }

    fn build(config: SearchConfig, vocabulary: Arc<Vocabulary>) -> Self {
        let generator = VariantGenerator::with_shared_vocabulary(Arc::clone(&vocabulary))
            .with_max_variants(config.max_variants);
        let scorer =
            RelevanceScorer::with_shared_vocabulary(vocabulary).with_max_variants(config.max_variants);
        Self {
            config,
            generator,
            scorer,
        }
    }

    /// Replace the accent folding strategy for both variant generation and
    /// scoring.
    pub fn with_folder(mut self, folder: impl AccentFolder + 'static) -> Self {
        let folder: Arc<dyn AccentFolder> = Arc::new(folder);
        self.generator = self.generator.with_shared_folder(Arc::clone(&folder));
        self.scorer = self.scorer.with_shared_folder(folder);
        self
    }

    /// Replace the singular/plural strategy.
    pub fn with_inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.generator = self.generator.with_inflector(inflector);
        self
    }

    /// The validated configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The queries this engine would send for `term`, in order.
    ///
    /// Exact mode sends only the trimmed term.
    pub fn variants(&self, term: &str) -> Vec<String> {
        if self.config.fuzzy {
            self.generator.generate(term)
        } else {
            vec![term.trim().to_owned()]
        }
    }

    /// Relevance of `candidate` to `term` given the variants tried.
    pub fn score(&self, candidate: &CandidateRecord, term: &str, variants: &[String]) -> f64 {
        self.scorer.score(candidate, term, variants)
    }

    /// Ranked, de-duplicated records relevant to `term`, at most
    /// `result_limit`.
    ///
    /// Never fails: fetch errors are logged and skipped, and finding
    /// nothing yields an empty list.
    pub async fn search<F: CandidateFetcher>(
        &self,
        term: &str,
        fetcher: &F,
        result_limit: usize,
    ) -> Vec<CandidateRecord> {
        self.search_detailed(term, fetcher, result_limit)
            .await
            .into_records()
    }

    /// Like [`search`](Self::search), but keeps scores, provenance and
    /// per-variant diagnostics.
    ///
    /// # Pipeline
    ///
    /// 1. Blank term or zero limit: return immediately, nothing fetched
    /// 2. Generate variants (or only the term in exact mode)
    /// 3. Fetch variants one at a time; a failed fetch counts as empty
    /// 4. Score each newly seen identity once; keep it if it clears
    ///    `min_score` (exact mode keeps everything)
    /// 5. Stop once `result_limit` kept candidates reach `confident_score`
    /// 6. Stable sort by score (fuzzy mode only), truncate
    pub async fn search_detailed<F: CandidateFetcher>(
        &self,
        term: &str,
        fetcher: &F,
        result_limit: usize,
    ) -> SearchReport {
        let mut report = SearchReport::default();
        if term.trim().is_empty() || result_limit == 0 {
            return report;
        }

        let variants = self.variants(term);
        let fetch_limit = self.config.fetch_limit(result_limit);
        let mut seen = SeenIdentities::default();
        let mut kept: Vec<ScoredCandidate> = Vec::new();

        for (index, variant) in variants.iter().enumerate() {
            tracing::debug!(index, variant = %variant, "fetching variant");
            report.variants_fetched += 1;

            let records = match self.fetch_variant(fetcher, variant, fetch_limit).await {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(index, error = %err, "variant fetch failed");
                    report.failed_variants.push(variant.clone());
                    continue;
                }
            };
            tracing::debug!(index, count = records.len(), "variant returned candidates");

            for record in records {
                if !seen.insert(identity(&record)) {
                    tracing::trace!(name = %record.name, "duplicate candidate skipped");
                    continue;
                }
                let score = self.scorer.score(&record, term, &variants);
                if self.config.fuzzy && score < self.config.min_score {
                    tracing::trace!(name = %record.name, score, "candidate rejected");
                    continue;
                }
                tracing::trace!(name = %record.name, score, "candidate kept");
                kept.push(ScoredCandidate {
                    record,
                    score,
                    variant: variant.clone(),
                    variant_index: index,
                });
            }

            let confident = kept
                .iter()
                .filter(|c| c.score >= self.config.confident_score)
                .count();
            if confident >= result_limit {
                report.stopped_early = index + 1 < variants.len();
                if report.stopped_early {
                    tracing::debug!(
                        fetched = index + 1,
                        total = variants.len(),
                        confident,
                        "enough confident matches, stopping early"
                    );
                }
                break;
            }
        }

        if self.config.fuzzy {
            kept.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        }
        kept.truncate(result_limit);

        tracing::debug!(
            count = kept.len(),
            fetched = report.variants_fetched,
            failed = report.failed_variants.len(),
            "search complete"
        );

        report.variants = variants;
        report.candidates = kept;
        report
    }

    /// Fetch one variant, enforcing the configured timeout.
    async fn fetch_variant<F: CandidateFetcher>(
        &self,
        fetcher: &F,
        variant: &str,
        limit: usize,
    ) -> Result<Vec<CandidateRecord>> {
        let timeout_ms = self.config.fetch_timeout_ms;
        if timeout_ms == 0 {
            return fetcher.fetch(variant, limit).await;
        }
        tokio::time::timeout(Duration::from_millis(timeout_ms), fetcher.fetch(variant, limit))
            .await
            .map_err(|_| SearchError::Timeout(format!("no answer within {timeout_ms}ms")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::fetch_fn;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn engine(config: SearchConfig) -> CatalogSearch {
        CatalogSearch::new(config).expect("valid config")
    }

    /// Answers every query with the same fixed records.
    fn fixed_catalog(names: &[&str]) -> impl CandidateFetcher {
        let records: Vec<CandidateRecord> = names.iter().map(|n| CandidateRecord::new(*n)).collect();
        fetch_fn(move |_: &str, limit: usize| Ok(records.iter().take(limit).cloned().collect()))
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SearchConfig {
            max_variants: 0,
            ..Default::default()
        };
        let err = CatalogSearch::new(config).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn default_engine_uses_default_config() {
        assert_eq!(CatalogSearch::default().config(), &SearchConfig::default());
    }

    #[test]
    fn exact_mode_sends_only_the_term() {
        let config = SearchConfig {
            fuzzy: false,
            ..Default::default()
        };
        assert_eq!(engine(config).variants("  Perruques "), vec!["Perruques"]);
    }

    #[test]
    fn fuzzy_mode_respects_variant_cap() {
        let config = SearchConfig {
            max_variants: 3,
            ..Default::default()
        };
        assert_eq!(engine(config).variants("perruque").len(), 3);
    }

    #[tokio::test]
    async fn blank_term_fetches_nothing() {
        let calls = AtomicUsize::new(0);
        let catalog = fetch_fn(|_: &str, _: usize| {
            calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(vec![CandidateRecord::new("Perruque")])
        });
        let report = CatalogSearch::default().search_detailed("   ", &catalog, 10).await;
        assert_eq!(report, SearchReport::default());
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_limit_fetches_nothing() {
        let calls = AtomicUsize::new(0);
        let catalog = fetch_fn(|_: &str, _: usize| {
            calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(vec![CandidateRecord::new("Perruque")])
        });
        let records = CatalogSearch::default().search("perruque", &catalog, 0).await;
        assert!(records.is_empty());
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn irrelevant_candidates_are_filtered() {
        let catalog = fixed_catalog(&["Perruque Lisse", "Casserole inox 5L"]);
        let records = CatalogSearch::default().search("perruque", &catalog, 10).await;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Perruque Lisse"]);
    }

    #[tokio::test]
    async fn results_are_ranked_by_score() {
        let catalog = fixed_catalog(&["Lot de 3 perruques bouclées", "Perruque Lisse"]);
        let report = CatalogSearch::default().search_detailed("perruque", &catalog, 10).await;
        assert_eq!(report.candidates[0].record.name, "Perruque Lisse");
        assert!(report.candidates[0].score >= report.candidates[1].score);
    }

    #[tokio::test]
    async fn equal_scores_keep_discovery_order() {
        let catalog = fixed_catalog(&["Perruque Lisse", "Perruque Bouclée"]);
        let records = CatalogSearch::default().search("perruque", &catalog, 10).await;
        assert_eq!(records[0].name, "Perruque Lisse");
        assert_eq!(records[1].name, "Perruque Bouclée");
    }

    #[tokio::test]
    async fn confident_matches_stop_iteration() {
        let calls = AtomicUsize::new(0);
        let catalog = fetch_fn(|_: &str, _: usize| {
            calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(vec![CandidateRecord::new("Perruque Lisse")])
        });
        let report = CatalogSearch::default().search_detailed("perruque", &catalog, 1).await;
        assert!(report.stopped_early);
        assert_eq!(report.variants_fetched, 1);
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausting_variants_is_not_an_early_stop() {
        let catalog = fixed_catalog(&[]);
        let report = CatalogSearch::default().search_detailed("perruque", &catalog, 5).await;
        assert!(!report.stopped_early);
        assert_eq!(report.variants_fetched, report.variants.len());
        assert!(report.candidates.is_empty());
    }

    #[tokio::test]
    async fn provenance_records_first_variant() {
        let catalog = fetch_fn(|query: &str, _: usize| {
            if query == "perruques" {
                Ok(vec![CandidateRecord::new("Perruques bouclées")])
            } else {
                Ok(Vec::new())
            }
        });
        let report = CatalogSearch::default().search_detailed("perruque", &catalog, 5).await;
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].variant, "perruques");
        assert_eq!(report.candidates[0].variant_index, 1);
    }

    #[tokio::test]
    async fn per_variant_limit_overrides_result_limit() {
        let config = SearchConfig {
            per_variant_limit: Some(3),
            ..Default::default()
        };
        let seen_limit = AtomicUsize::new(0);
        let catalog = fetch_fn(|_: &str, limit: usize| {
            seen_limit.store(limit, AtomicOrdering::SeqCst);
            Ok(Vec::new())
        });
        engine(config).search("perruque", &catalog, 20).await;
        assert_eq!(seen_limit.load(AtomicOrdering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failed_variants_are_reported() {
        let catalog = fetch_fn(|query: &str, _: usize| {
            if query == "perruque" {
                Err(SearchError::Fetch("503".into()))
            } else {
                Ok(vec![CandidateRecord::new("Perruques bouclées")])
            }
        });
        let report = CatalogSearch::default().search_detailed("perruque", &catalog, 1).await;
        assert_eq!(report.failed_variants, vec!["perruque"]);
        assert_eq!(report.candidates.len(), 1);
    }

    #[tokio::test]
    async fn exact_mode_keeps_catalog_order_unfiltered() {
        let config = SearchConfig {
            fuzzy: false,
            ..Default::default()
        };
        let catalog = fixed_catalog(&["Casserole inox", "Perruque Lisse"]);
        let report = engine(config).search_detailed("perruque", &catalog, 10).await;
        let names: Vec<&str> = report
            .candidates
            .iter()
            .map(|c| c.record.name.as_str())
            .collect();
        assert_eq!(names, vec!["Casserole inox", "Perruque Lisse"]);
        assert_eq!(report.variants, vec!["perruque"]);
        assert!(report.candidates[0].score.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn results_are_truncated_to_limit() {
        let catalog = fixed_catalog(&["Perruque A", "Perruque B", "Perruque C"]);
        let records = CatalogSearch::default().search("perruque", &catalog, 2).await;
        assert_eq!(records.len(), 2);
    }
}
