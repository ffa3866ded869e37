//! # scout-search
//!
//! Fuzzy search over retail catalogs whose own search is strict.
//!
//! Marketplace search boxes typically match only exact substrings: no
//! accent folding, no singular/plural tolerance, no synonyms. This crate
//! turns one user query into a handful of reformulated probes, sends them
//! to the catalog through a caller-supplied [`CandidateFetcher`], and merges
//! what comes back into one ranked, de-duplicated list.
//!
//! ## Design
//!
//! - [`VariantGenerator`] derives ordered query variants (case, accents,
//!   inflection, hyphenation, sub-words, synonyms, articles)
//! - [`RelevanceScorer`] rates each candidate against the original term
//! - Candidates are de-duplicated by canonical link, else display name
//! - [`CatalogSearch`] probes variants in order and stops early once enough
//!   confident matches exist
//! - The synonym table, deny-list and articles live in a [`Vocabulary`]
//!   value; the bundled default targets French-language retail
//!
//! ## Privacy
//!
//! - No network access of its own: the fetcher decides what leaves the
//!   process
//! - Query text is logged only at debug and trace level

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod types;
pub mod variants;
pub mod vocabulary;

pub use cache::CachedFetcher;
pub use catalog::StaticCatalog;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use fetcher::{fetch_fn, CandidateFetcher, FnFetcher};
pub use orchestrator::dedup::identity;
pub use orchestrator::scoring::{MatchSignals, RelevanceScorer};
pub use orchestrator::search::CatalogSearch;
pub use types::{CandidateRecord, ScoredCandidate, SearchReport};
pub use variants::{AccentFolder, DiacriticFolder, FrenchInflector, Inflector, VariantGenerator};
pub use vocabulary::{SynonymGroup, Vocabulary};

/// Generate query variants for `term` with the bundled vocabulary.
///
/// # Examples
///
/// ```
/// let variants = scout_search::generate_variants("Perruque");
/// assert_eq!(variants[0], "Perruque");
/// assert!(variants.contains(&"perruques".to_string()));
/// assert!(variants.contains(&"cheveux".to_string()));
/// ```
pub fn generate_variants(term: &str) -> Vec<String> {
    VariantGenerator::default().generate(term)
}

/// Score `candidate` against `term` with the bundled vocabulary.
///
/// `variants` are the variants tried for `term`, typically the output of
/// [`generate_variants`].
pub fn score(candidate: &CandidateRecord, term: &str, variants: &[String]) -> f64 {
    RelevanceScorer::default().score(candidate, term, variants)
}

/// Search `fetcher` for `term` with the default configuration.
///
/// Convenience wrapper around [`CatalogSearch::search`] using
/// [`SearchConfig::default()`] and the bundled vocabulary.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let catalog = scout_search::StaticCatalog::from_json_str(
///     r#"[{"nom": "Perruques bouclées"}, {"nom": "Casserole inox"}]"#,
/// )
/// .expect("valid catalog");
/// let records = scout_search::search("perruque", &catalog, 10).await;
/// for record in &records {
///     println!("{}", record.name);
/// }
/// # }
/// ```
pub async fn search<F: CandidateFetcher>(
    term: &str,
    fetcher: &F,
    result_limit: usize,
) -> Vec<CandidateRecord> {
    CatalogSearch::default()
        .search(term, fetcher, result_limit)
        .await
}
