//! Diacritic folding strategies.
//!
//! Catalog search is accent-sensitive, so `téléphone` and `telephone` are
//! different queries. Folding produces the unaccented spelling.

use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strategy for removing diacritics from text.
pub trait AccentFolder: Send + Sync + fmt::Debug {
    /// Return `text` with diacritics removed. Case is preserved.
    fn fold(&self, text: &str) -> String;
}

/// Canonical decomposition (NFD) with combining marks dropped.
///
/// Letters that have no decomposition (`œ`, `æ`, `ß`, `ø`...) go through
/// the same replacement table as [`TableFolder`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DiacriticFolder;

impl AccentFolder for DiacriticFolder {
    fn fold(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.nfd() {
            if is_combining_mark(c) {
                continue;
            }
            match table_fold(c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        out
    }
}

/// Character replacement table only, without Unicode decomposition.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableFolder;

impl AccentFolder for TableFolder {
    fn fold(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match table_fold(c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        out
    }
}

fn table_fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ç' => "c",
        'Ç' => "C",
        'ñ' => "n",
        'Ñ' => "N",
        'œ' => "oe",
        'Œ' => "OE",
        'æ' => "ae",
        'Æ' => "AE",
        'ß' => "ss",
        _ => return None,
    };
    Some(folded)
}
