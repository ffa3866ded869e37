//! Singular/plural heuristics.
//!
//! Catalog search does not match `perruques` against `perruque`. These
//! suffix rules toggle between the two forms; they are not a morphological
//! analyser and are expected to be wrong on irregular words.

use std::fmt;

/// Strategy for toggling grammatical number.
pub trait Inflector: Send + Sync + fmt::Debug {
    /// The singular form if `word` looks plural, otherwise `None`.
    fn singular(&self, word: &str) -> Option<String>;

    /// The plural form if `word` looks singular and is not invariable.
    fn plural(&self, word: &str) -> Option<String>;

    /// The opposite number of `word`, when one can be formed.
    fn toggle(&self, word: &str) -> Option<String> {
        self.singular(word).or_else(|| self.plural(word))
    }

    /// Number-independent form used for phrase comparison.
    fn stem(&self, word: &str) -> String {
        self.singular(word).unwrap_or_else(|| word.to_owned())
    }
}

/// Suffix rules for French nouns.
///
/// - `-s` plurals strip the `s` (`perruques` → `perruque`)
/// - `-aux`/`-eux` plurals strip the `x` (`cheveux` → `cheveu`)
/// - `-al` pluralises to `-aux`, `-au`/`-eu` take an `x`, others take `s`
/// - words already ending in `s`, `x` or `z` are treated as invariable
#[derive(Debug, Default, Clone, Copy)]
pub struct FrenchInflector;

/// Words this short are left alone (`as`, `os`, `tv`...).
const MIN_INFLECTABLE_CHARS: usize = 3;

impl Inflector for FrenchInflector {
    fn singular(&self, word: &str) -> Option<String> {
        if word.chars().count() < MIN_INFLECTABLE_CHARS {
            return None;
        }
        if word.ends_with("aux") || word.ends_with("eux") {
            return Some(word[..word.len() - 1].to_owned());
        }
        if word.ends_with('s') {
            return Some(word[..word.len() - 1].to_owned());
        }
        None
    }

    fn plural(&self, word: &str) -> Option<String> {
        if word.chars().count() < MIN_INFLECTABLE_CHARS
            || word.ends_with(['s', 'x', 'z'])
        {
            return None;
        }
        if word.ends_with("au") || word.ends_with("eu") {
            return Some(format!("{word}x"));
        }
        if let Some(stem) = word.strip_suffix("al") {
            return Some(format!("{stem}aux"));
        }
        Some(format!("{word}s"))
    }
}
