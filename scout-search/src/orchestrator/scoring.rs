//! Relevance scoring of catalog candidates against the original term.
//!
//! Catalog engines pad weak result pages with popular, unrelated items
//! (phones, headphones, TVs). The scorer rejects candidates that share
//! nothing with the term and punishes deny-listed vocabulary, then ranks
//! what is left by how closely the display name matches.
//!
//! # Scoring
//!
//! | signal                                         | points |
//! |------------------------------------------------|--------|
//! | exact term is a substring of the name          | +60    |
//! | otherwise, a tried variant is a substring      | +50    |
//! | name starts with the term                      | +25    |
//! | otherwise, name starts with the matched variant| +20    |
//! | otherwise, term within the first 30 characters | +15    |
//! | term or matched variant in the category        | +10    |
//! | term occurs as standalone word(s)              | +15    |
//! | every word of the term occurs in the name      | +10    |
//! | deny-listed word in the name                   | −40    |
//!
//! The result is clamped to `[0, 100]`.

use std::sync::Arc;

use crate::config::MAX_SCORE;
use crate::types::CandidateRecord;
use crate::variants::{AccentFolder, DiacriticFolder, DEFAULT_MAX_VARIANTS};
use crate::vocabulary::Vocabulary;

const EXACT_MATCH_POINTS: f64 = 60.0;
const VARIANT_MATCH_POINTS: f64 = 50.0;
const STARTS_WITH_TERM_POINTS: f64 = 25.0;
const STARTS_WITH_VARIANT_POINTS: f64 = 20.0;
const EARLY_TERM_POINTS: f64 = 15.0;
const CATEGORY_POINTS: f64 = 10.0;
const STANDALONE_TERM_POINTS: f64 = 15.0;
const ALL_WORDS_POINTS: f64 = 10.0;
const DENYLIST_PENALTY: f64 = 40.0;

/// Names are searched for the term within this many leading characters.
const EARLY_TERM_WINDOW_CHARS: usize = 30;

/// The named predicates a score is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSignals {
    /// The lower-cased term is a substring of the lower-cased name.
    pub has_exact_match: bool,
    /// First tried variant found in the name, lower-cased.
    pub matched_variant: Option<String>,
    /// Every whitespace-separated word of the term occurs in the name.
    pub all_words_present: bool,
    /// The term's words occur as consecutive whole words of the name.
    pub has_standalone_term: bool,
    /// The name contains a deny-listed word and the term does not.
    pub has_denylist_hit: bool,
}

impl MatchSignals {
    /// Whether the variant path matched.
    pub fn has_variant_match(&self) -> bool {
        self.matched_variant.is_some()
    }

    /// Whether the term or one of its variants occurs in the name.
    pub fn has_term_or_variant(&self) -> bool {
        self.has_exact_match || self.has_variant_match()
    }

    /// Nothing ties the candidate to the term.
    pub fn is_unrelated(&self) -> bool {
        !self.has_term_or_variant() && !self.all_words_present
    }
}

/// A display name in the two spellings matching is done against.
struct NameView {
    lower: String,
    folded: String,
}

impl NameView {
    fn new(name: &str, folder: &dyn AccentFolder) -> Self {
        let lower = name.to_lowercase();
        let folded = folder.fold(&lower);
        Self { lower, folded }
    }

    /// Substring match, falling back to the accent-folded spellings.
    fn contains(&self, needle: &str, folder: &dyn AccentFolder) -> bool {
        self.lower.contains(needle) || self.folded.contains(&folder.fold(needle))
    }

    fn starts_with(&self, needle: &str, folder: &dyn AccentFolder) -> bool {
        self.lower.starts_with(needle) || self.folded.starts_with(&folder.fold(needle))
    }
}

/// Scores candidates against a term and the variants tried for it.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    vocabulary: Arc<Vocabulary>,
    folder: Arc<dyn AccentFolder>,
    max_variants: usize,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

impl RelevanceScorer {
    /// Create a scorer using `vocabulary`'s deny-list.
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_shared_vocabulary(Arc::new(vocabulary))
    }

    pub(crate) fn with_shared_vocabulary(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            folder: Arc::new(DiacriticFolder),
            max_variants: DEFAULT_MAX_VARIANTS,
        }
    }

    pub(crate) fn with_shared_folder(mut self, folder: Arc<dyn AccentFolder>) -> Self {
        self.folder = folder;
        self
    }

    /// Only the first `max_variants` tried variants are considered.
    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.max_variants = max_variants.max(1);
        self
    }

    /// Relevance of `candidate` to `term`, in `[0, 100]`.
    ///
    /// Never fails: a missing name or category reads as empty.
    pub fn score(&self, candidate: &CandidateRecord, term: &str, variants: &[String]) -> f64 {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return 0.0;
        }
        let folder = self.folder.as_ref();
        let name = NameView::new(&candidate.name, folder);
        let signals = self.evaluate(&name, &term, variants);

        if signals.is_unrelated() {
            return 0.0;
        }
        if signals.has_denylist_hit && !signals.has_term_or_variant() {
            return 0.0;
        }

        let mut score = 0.0;

        if signals.has_exact_match {
            score += EXACT_MATCH_POINTS;
        } else if signals.has_variant_match() {
            score += VARIANT_MATCH_POINTS;
        }

        let matched = signals.matched_variant.as_deref();
        if name.lower.starts_with(&term) {
            score += STARTS_WITH_TERM_POINTS;
        } else if matched.is_some_and(|v| name.starts_with(v, folder)) {
            score += STARTS_WITH_VARIANT_POINTS;
        } else if leading_chars(&name.lower, EARLY_TERM_WINDOW_CHARS).contains(&term) {
            score += EARLY_TERM_POINTS;
        }

        let category = NameView::new(candidate.category_or_empty(), folder);
        if category.lower.contains(&term) || matched.is_some_and(|v| category.contains(v, folder))
        {
            score += CATEGORY_POINTS;
        }

        if signals.has_standalone_term {
            score += STANDALONE_TERM_POINTS;
        }
        if signals.all_words_present {
            score += ALL_WORDS_POINTS;
        }
        if signals.has_denylist_hit {
            score -= DENYLIST_PENALTY;
        }

        score.clamp(0.0, MAX_SCORE)
    }

    /// Evaluate each predicate independently, for inspection and testing.
    pub fn signals(&self, candidate: &CandidateRecord, term: &str, variants: &[String]) -> MatchSignals {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return MatchSignals::default();
        }
        let name = NameView::new(&candidate.name, self.folder.as_ref());
        self.evaluate(&name, &term, variants)
    }

    fn evaluate(&self, name: &NameView, term: &str, variants: &[String]) -> MatchSignals {
        let folder = self.folder.as_ref();
        let term_words: Vec<&str> = term.split_whitespace().collect();

        MatchSignals {
            has_exact_match: name.lower.contains(term),
            matched_variant: variants
                .iter()
                .take(self.max_variants)
                .map(|v| v.trim().to_lowercase())
                .find(|v| !v.is_empty() && name.contains(v, folder)),
            all_words_present: term_words.iter().all(|w| name.contains(w, folder)),
            has_standalone_term: contains_word_run(&name.lower, &term_words),
            has_denylist_hit: self.has_denylist_hit(name, term),
        }
    }

    /// Deny-listed vocabulary in the name. Skipped entirely when the term
    /// itself uses deny-listed words: a search for "telephone" wants
    /// telephones. Only whole words of the term count, so "casquette" is
    /// not a search for a "casque".
    fn has_denylist_hit(&self, name: &NameView, term: &str) -> bool {
        let folder = self.folder.as_ref();
        let folded_term = folder.fold(term);
        let deny_terms = || {
            self.vocabulary
                .deny_list
                .iter()
                .map(|t| folder.fold(&t.trim().to_lowercase()))
                .filter(|t| !t.is_empty())
        };
        if deny_terms().any(|t| {
            let words: Vec<&str> = t.split_whitespace().collect();
            contains_word_run(&folded_term, &words)
        }) {
            return false;
        }
        deny_terms().any(|t| name.folded.contains(&t))
    }
}

/// The first `n` characters of `text`.
fn leading_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Whether `words` occur as consecutive whole words in `text`.
/// Surrounding punctuation is ignored (`"perruque,"` is the word `perruque`).
fn contains_word_run(text: &str, words: &[&str]) -> bool {
    let clean = |w: &str| w.trim_matches(|c: char| !c.is_alphanumeric()).to_owned();
    let needle: Vec<String> = words.iter().map(|w| clean(w)).filter(|w| !w.is_empty()).collect();
    let haystack: Vec<String> = text
        .split_whitespace()
        .map(clean)
        .filter(|w| !w.is_empty())
        .collect();
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::VariantGenerator;

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::default()
    }

    fn variants(term: &str) -> Vec<String> {
        VariantGenerator::default().generate(term)
    }

    fn score(name: &str, term: &str) -> f64 {
        scorer().score(&CandidateRecord::new(name), term, &variants(term))
    }

    #[test]
    fn unrelated_name_scores_zero() {
        assert!(score("Sac à main en cuir", "perruque").abs() < f64::EPSILON);
        assert!(score("Ventilateur sur pied", "chaussure de sport").abs() < f64::EPSILON);
    }

    #[test]
    fn partial_word_overlap_is_rejected() {
        // "pot" is present but "fleur" is not, and no variant matches.
        assert!(score("Pot en plastique", "pot de fleur").abs() < f64::EPSILON);
    }

    #[test]
    fn name_starting_with_term_scores_at_least_85() {
        for (name, term) in [
            ("Perruque lisse 24 pouces", "perruque"),
            ("montre connectée étanche", "montre"),
            ("Robe de soirée longue", "robe de soirée"),
        ] {
            let s = score(name, term);
            assert!(s >= 85.0, "{name:?} / {term:?} scored {s}");
        }
    }

    #[test]
    fn exact_leading_standalone_match_is_capped_at_100() {
        // 60 + 25 + 15 + 10 = 110 before clamping.
        assert!((score("Perruque Bresilienne", "perruque") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn telephone_scenario_scores_high() {
        // 60 exact + 15 early + 15 standalone + 10 all words; deny-list skipped
        // because the term is itself electronics vocabulary.
        let s = score("Samsung Telephone 128GB", "telephone");
        assert!(s >= 85.0, "scored {s}");
    }

    #[test]
    fn deny_listed_noise_scores_zero() {
        assert!(score("Samsung Smartphone X", "perruque").abs() < f64::EPSILON);
    }

    #[test]
    fn deny_list_penalises_matching_items() {
        // 60 exact + 15 early + 15 standalone + 10 all words, −40 for the
        // deny-listed "enceinte"/"bluetooth".
        let s = score("Enceinte Perruque bluetooth", "perruque");
        assert!((s - 60.0).abs() < f64::EPSILON, "scored {s}");
    }

    #[test]
    fn deny_word_inside_a_term_word_keeps_the_penalty() {
        // "casquette" contains "casque" but is not a headphones search:
        // 60 exact + 25 starts with + 15 standalone + 10 all words, −40.
        let name = "Casquette écouteurs bluetooth intégrés";
        let s = score(name, "casquette");
        assert!((s - 70.0).abs() < f64::EPSILON, "scored {s}");
        let control = score("Perruque écouteurs bluetooth intégrés", "perruque");
        assert!((s - control).abs() < f64::EPSILON, "{s} != {control}");

        let signals = scorer().signals(
            &CandidateRecord::new(name),
            "casquette",
            &variants("casquette"),
        );
        assert!(signals.has_denylist_hit);
    }

    #[test]
    fn deny_word_in_a_multi_word_term_skips_the_penalty() {
        let s = score("Casque bluetooth sans fil", "casque bluetooth");
        assert!(s >= 85.0, "scored {s}");
    }

    #[test]
    fn synonym_variant_match_scores_moderately() {
        // "cheveux" is a configured synonym of "perruque": 50 for the variant,
        // no positional bonus.
        let s = score("Extension Cheveux Naturels", "perruque");
        assert!((s - 50.0).abs() < f64::EPSILON, "scored {s}");
    }

    #[test]
    fn variant_at_start_of_name_earns_bonus() {
        // 50 variant + 20 starts with the variant.
        let s = score("Cheveux bouclés 20 pouces", "perruque");
        assert!((s - 70.0).abs() < f64::EPSILON, "scored {s}");
    }

    #[test]
    fn term_within_first_30_chars_earns_bonus() {
        let near = score("Lot de 3 perruques", "perruque");
        let far = score("Ensemble coiffure africaine complet avec perruques", "perruque");
        assert!(near > far, "{near} <= {far}");
    }

    #[test]
    fn category_match_earns_bonus() {
        let term = "perruque";
        let plain = CandidateRecord::new("Lot de perruques");
        let categorised = plain.clone().with_category("Perruques & Postiches");
        let v = variants(term);
        let delta = scorer().score(&categorised, term, &v) - scorer().score(&plain, term, &v);
        assert!((delta - 10.0).abs() < f64::EPSILON, "delta {delta}");
    }

    #[test]
    fn accented_name_matches_unaccented_term_through_variants() {
        let s = score("Téléviseur LED 32 pouces", "televiseur");
        assert!(s >= 50.0, "scored {s}");
    }

    #[test]
    fn scattered_words_alone_stay_below_acceptance() {
        // All words present but never contiguously: only the word bonus applies.
        let s = scorer().score(
            &CandidateRecord::new("Robe longue pour soirée"),
            "robe soirée",
            &["robe soirée".to_owned()],
        );
        assert!((s - 10.0).abs() < f64::EPSILON, "scored {s}");
    }

    #[test]
    fn only_first_ten_variants_are_considered() {
        let mut tried: Vec<String> = (0..10).map(|i| format!("zz{i}")).collect();
        tried.push("cheveux".to_owned());
        let s = scorer().score(&CandidateRecord::new("Cheveux naturels"), "perruque", &tried);
        assert!(s.abs() < f64::EPSILON);
    }

    #[test]
    fn blank_term_scores_zero() {
        assert!(scorer()
            .score(&CandidateRecord::new("Perruque"), "   ", &[])
            .abs()
            < f64::EPSILON);
    }

    #[test]
    fn missing_name_scores_zero() {
        assert!(score("", "perruque").abs() < f64::EPSILON);
    }

    #[test]
    fn signals_are_independently_observable() {
        let candidate = CandidateRecord::new("Extension Cheveux, Naturels");
        let signals = scorer().signals(&candidate, "perruque", &variants("perruque"));
        assert!(!signals.has_exact_match);
        assert_eq!(signals.matched_variant.as_deref(), Some("cheveux"));
        assert!(!signals.all_words_present);
        assert!(!signals.has_standalone_term);
        assert!(!signals.has_denylist_hit);
        assert!(!signals.is_unrelated());
    }

    #[test]
    fn standalone_word_ignores_punctuation() {
        assert!(contains_word_run("perruque, lisse", &["perruque"]));
        assert!(contains_word_run("robe de soirée (rouge)", &["soirée"]));
        assert!(!contains_word_run("perruques lisses", &["perruque"]));
    }

    #[test]
    fn custom_deny_list_is_honoured() {
        let vocab = Vocabulary {
            deny_list: vec!["tracteur".into()],
            ..Vocabulary::empty()
        };
        let scorer = RelevanceScorer::new(vocab);
        let tried = vec!["perruque".to_owned()];
        let noise = CandidateRecord::new("Tracteur jouet");
        assert!(scorer.score(&noise, "perruque", &tried).abs() < f64::EPSILON);
        // Electronics vocabulary is no longer penalised.
        let phone = CandidateRecord::new("Perruque Samsung");
        assert!(scorer.score(&phone, "perruque", &tried) >= 85.0);
    }

    #[test]
    fn leading_chars_respects_char_boundaries() {
        assert_eq!(leading_chars("éàü", 2), "éà");
        assert_eq!(leading_chars("abc", 10), "abc");
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = score("Perruque frontale lace", "perruque");
        let b = score("Perruque frontale lace", "perruque");
        assert!((a - b).abs() < f64::EPSILON);
    }
}
