//! Query variant generation.
//!
//! The catalog only does exact substring search, so one user term is
//! reformulated into a short, ordered list of alternative queries. Faithful
//! variants come first because the orchestrator may stop before reaching
//! the looser ones.

pub mod folding;
pub mod inflection;

use std::collections::HashSet;
use std::sync::Arc;

use crate::vocabulary::Vocabulary;

pub use folding::{AccentFolder, DiacriticFolder, TableFolder};
pub use inflection::{FrenchInflector, Inflector};

/// Default cap on the number of variants (and catalog fetches) per term.
pub const DEFAULT_MAX_VARIANTS: usize = 10;

/// Variants shorter than this are dropped.
const MIN_VARIANT_CHARS: usize = 2;

/// Words of a multi-word term must be longer than this to become variants.
const MIN_SUBWORD_CHARS: usize = 4;

/// Produces ordered query variants for a search term.
///
/// Cheap to clone; the vocabulary and strategies are shared.
#[derive(Debug, Clone)]
pub struct VariantGenerator {
    vocabulary: Arc<Vocabulary>,
    folder: Arc<dyn AccentFolder>,
    inflector: Arc<dyn Inflector>,
    max_variants: usize,
}

impl Default for VariantGenerator {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

impl VariantGenerator {
    /// Create a generator over `vocabulary` with the default French
    /// strategies.
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_shared_vocabulary(Arc::new(vocabulary))
    }

    pub(crate) fn with_shared_vocabulary(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            folder: Arc::new(DiacriticFolder),
            inflector: Arc::new(FrenchInflector),
            max_variants: DEFAULT_MAX_VARIANTS,
        }
    }

    /// Replace the accent folding strategy.
    pub fn with_folder(self, folder: impl AccentFolder + 'static) -> Self {
        self.with_shared_folder(Arc::new(folder))
    }

    pub(crate) fn with_shared_folder(mut self, folder: Arc<dyn AccentFolder>) -> Self {
        self.folder = folder;
        self
    }

    /// Replace the singular/plural strategy.
    pub fn with_inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.inflector = Arc::new(inflector);
        self
    }

    /// Change the variant cap. Values below 1 are raised to 1.
    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.max_variants = max_variants.max(1);
        self
    }

    /// The accent folding strategy in use.
    pub fn folder(&self) -> &Arc<dyn AccentFolder> {
        &self.folder
    }

    /// Generate the ordered, de-duplicated variant list for `term`.
    ///
    /// Never empty: a term too short to expand is returned as `[term]`.
    pub fn generate(&self, term: &str) -> Vec<String> {
        let original = term.trim();
        if original.chars().count() < MIN_VARIANT_CHARS {
            return vec![term.to_owned()];
        }
        let lower = original.to_lowercase();

        let mut candidates = vec![original.to_owned(), lower.clone()];
        candidates.push(self.folder.fold(&lower));

        if let Some(toggled) = self.inflector.toggle(&lower) {
            candidates.push(toggled);
        }

        if lower.contains('-') {
            candidates.push(lower.replace('-', " "));
        } else if lower.contains(char::is_whitespace) {
            candidates.push(lower.split_whitespace().collect::<Vec<_>>().join("-"));
        }

        let words: Vec<&str> = lower.split_whitespace().collect();
        if words.len() > 1 {
            candidates.extend(
                words
                    .iter()
                    .filter(|w| w.chars().count() >= MIN_SUBWORD_CHARS)
                    .map(|w| (*w).to_owned()),
            );
        }

        candidates.extend(self.synonym_variants(&lower));
        candidates.extend(self.article_variants(&lower));

        self.finalize(candidates)
    }

    /// Synonyms of every vocabulary group the term mentions, in either
    /// direction: the canonical term pulls in its synonyms, and a synonym
    /// pulls in the canonical term plus its siblings.
    fn synonym_variants(&self, lower: &str) -> Vec<String> {
        let term_stems = self.stems(lower);
        let mut out = Vec::new();

        for group in &self.vocabulary.synonyms {
            if self.contains_phrase(&term_stems, &group.canonical) {
                out.extend(group.synonyms.iter().cloned());
            }
            for synonym in &group.synonyms {
                if self.contains_phrase(&term_stems, synonym) {
                    out.push(group.canonical.clone());
                    out.extend(group.synonyms.iter().filter(|s| *s != synonym).cloned());
                }
            }
        }
        out
    }

    /// Strip a leading article, or offer the term with each article.
    fn article_variants(&self, lower: &str) -> Vec<String> {
        for article in &self.vocabulary.articles {
            let stripped = lower
                .strip_prefix(article.as_str())
                .filter(|rest| rest.starts_with(char::is_whitespace))
                .map(str::trim);
            if let Some(rest) = stripped {
                return vec![rest.to_owned()];
            }
        }
        self.vocabulary
            .articles
            .iter()
            .map(|article| format!("{article} {lower}"))
            .collect()
    }

    /// Trim, drop short entries, de-duplicate case-insensitively keeping
    /// first-seen order, and cap the length.
    fn finalize(&self, candidates: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut variants = Vec::with_capacity(self.max_variants);
        for candidate in candidates {
            let variant = candidate.trim();
            if variant.chars().count() < MIN_VARIANT_CHARS {
                continue;
            }
            if seen.insert(variant.to_lowercase()) {
                variants.push(variant.to_owned());
                if variants.len() == self.max_variants {
                    break;
                }
            }
        }
        variants
    }

    /// Lower-cased, folded, number-independent tokens of `text`.
    pub(crate) fn stems(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|word| {
                let folded = self.folder.fold(&word.to_lowercase());
                self.inflector.stem(&folded)
            })
            .collect()
    }

    /// Whether `phrase` occurs as a run of whole tokens in `haystack`.
    fn contains_phrase(&self, haystack: &[String], phrase: &str) -> bool {
        let needle = self.stems(phrase);
        !needle.is_empty()
            && needle.len() <= haystack.len()
            && haystack.windows(needle.len()).any(|window| window == needle.as_slice())
    }
}
