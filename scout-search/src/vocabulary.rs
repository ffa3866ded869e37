//! Domain vocabulary: synonym groups, deny-list and leading articles.
//!
//! The vocabulary is plain configuration data handed to the variant
//! generator and the relevance scorer, so deployments (and tests) can swap
//! in their own word lists. [`Vocabulary::french_retail`] is the bundled
//! default, tuned for French-language marketplaces in Senegal.

use serde::{Deserialize, Serialize};

/// A canonical term and the words shoppers use for the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    /// The canonical term, e.g. `perruque`.
    pub canonical: String,
    /// Related vocabulary in priority order.
    pub synonyms: Vec<String>,
}

impl SynonymGroup {
    /// Build a group from string slices.
    pub fn new(canonical: &str, synonyms: &[&str]) -> Self {
        Self {
            canonical: canonical.to_owned(),
            synonyms: synonyms.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// Word lists used for query expansion and noise suppression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Synonym groups, consulted in order.
    pub synonyms: Vec<SynonymGroup>,
    /// Terms marking a product as belonging to an unrelated category
    /// (consumer electronics by default).
    pub deny_list: Vec<String>,
    /// Leading function words toggled on and off the term.
    pub articles: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::french_retail()
    }
}

impl Vocabulary {
    /// A vocabulary with no synonyms, no deny-list and no articles.
    pub fn empty() -> Self {
        Self {
            synonyms: Vec::new(),
            deny_list: Vec::new(),
            articles: Vec::new(),
        }
    }

    /// French retail vocabulary used by the Senegalese marketplace tooling.
    pub fn french_retail() -> Self {
        Self {
            synonyms: vec![
                SynonymGroup::new("telephone", &["smartphone", "mobile", "portable"]),
                SynonymGroup::new("ordi", &["ordinateur", "laptop", "pc", "portable"]),
                SynonymGroup::new("tv", &["television", "ecran", "téléviseur"]),
                SynonymGroup::new("frigo", &["refrigerateur", "frigidaire"]),
                SynonymGroup::new(
                    "perruque",
                    &[
                        "cheveux",
                        "postiche",
                        "toupet",
                        "cheveux postiches",
                        "extension cheveux",
                        "wig",
                        "hair extension",
                        "cheveux naturels",
                        "cheveux synthétiques",
                        "perruque cheveux",
                        "postiche cheveux",
                        "extension",
                        "mèches",
                        "tresses",
                        "cheveux humains",
                        "cheveux brésiliens",
                        "cheveux indiens",
                    ],
                ),
                SynonymGroup::new("vetement", &["habit", "tenue", "habillement", "vêtement"]),
                SynonymGroup::new("chaussure", &["soulier", "basket", "sneaker"]),
                SynonymGroup::new("maquillage", &["cosmetique", "beaute", "makeup"]),
                SynonymGroup::new("parfum", &["fragrance", "eau de toilette", "eau de parfum"]),
            ],
            deny_list: [
                "telephone",
                "smartphone",
                "laptop",
                "ordinateur",
                "tv",
                "television",
                "casque",
                "ecouteur",
                "sony",
                "samsung",
                "apple",
                "iphone",
                "ipad",
                "enceinte",
                "bluetooth",
                "ecran",
                "moniteur",
                "clavier",
                "souris",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
            articles: ["le", "la", "les", "un", "une", "des"]
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}
