//! Core types for catalog candidates and search diagnostics.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A record returned by the catalog for one query.
///
/// Only the display name is required. The category and canonical link are
/// read when present; every other field is carried through untouched in
/// [`CandidateRecord::payload`]. French field names used by the marketplace
/// scrapers (`nom`, `categorie`, `lien`) are accepted as aliases.
///
/// Serialization always uses the canonical keys `name`, `category` and
/// `link`, so a record read as `{"nom": ..}` is written as `{"name": ..}`.
/// Payload keys are written back as read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Display name shown in the catalog listing.
    #[serde(default, alias = "nom", alias = "title", deserialize_with = "null_as_empty")]
    pub name: String,
    /// Catalog category, if the source exposes one.
    #[serde(
        default,
        alias = "categorie",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    /// Canonical product page.
    #[serde(
        default,
        alias = "lien",
        alias = "url",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
    /// Opaque fields (price, brand, image, rating...).
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl CandidateRecord {
    /// Create a record with only a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the canonical link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach an opaque payload field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// The category, or `""` when absent.
    pub fn category_or_empty(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A candidate annotated with its relevance and provenance.
///
/// Exists only inside a search; [`crate::CatalogSearch::search`] strips the
/// annotation before handing records back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// The untouched catalog record.
    pub record: CandidateRecord,
    /// Relevance in `[0, 100]`.
    pub score: f64,
    /// The variant whose fetch first surfaced this record.
    pub variant: String,
    /// Position of that variant in the generated list.
    pub variant_index: usize,
}

/// Outcome of one search, with the diagnostics the plain result list drops.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchReport {
    /// Every variant generated for the term, in priority order.
    pub variants: Vec<String>,
    /// Number of variants actually sent to the catalog.
    pub variants_fetched: usize,
    /// Variants whose fetch failed or timed out.
    pub failed_variants: Vec<String>,
    /// Whether iteration ended on the confidence threshold rather than on
    /// exhausting the variants.
    pub stopped_early: bool,
    /// Kept candidates, ranked and truncated to the result limit.
    pub candidates: Vec<ScoredCandidate>,
}

impl SearchReport {
    /// Drop the scoring annotation and return the ranked records.
    pub fn into_records(self) -> Vec<CandidateRecord> {
        self.candidates.into_iter().map(|c| c.record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let record = CandidateRecord::new("Perruque Lisse 24 pouces")
            .with_link("https://shop.example/p/1")
            .with_category("Beauté")
            .with_field("prix", 15000);
        assert_eq!(record.name, "Perruque Lisse 24 pouces");
        assert_eq!(record.link.as_deref(), Some("https://shop.example/p/1"));
        assert_eq!(record.category_or_empty(), "Beauté");
        assert_eq!(record.payload.get("prix"), Some(&Value::from(15000)));
    }

    #[test]
    fn french_aliases_are_accepted() {
        let record: CandidateRecord = serde_json::from_str(
            r#"{"nom": "Extension Cheveux", "categorie": "Beauté", "lien": "https://x.sn/1", "prix": "9 900 FCFA"}"#,
        )
        .expect("deserialize");
        assert_eq!(record.name, "Extension Cheveux");
        assert_eq!(record.category.as_deref(), Some("Beauté"));
        assert_eq!(record.link.as_deref(), Some("https://x.sn/1"));
        assert_eq!(
            record.payload.get("prix"),
            Some(&Value::from("9 900 FCFA"))
        );
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let record: CandidateRecord =
            serde_json::from_str(r#"{"nom": null, "marque": "Generic"}"#).expect("deserialize");
        assert_eq!(record.name, "");
        assert_eq!(record.category_or_empty(), "");
        assert!(record.link.is_none());
        assert_eq!(record.payload.len(), 1);
    }

    #[test]
    fn payload_is_passed_through_on_serialize() {
        let record = CandidateRecord::new("Casque").with_field("note", 4.5);
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["name"], "Casque");
        assert_eq!(json["note"], 4.5);
        assert!(json.get("link").is_none());
    }

    #[test]
    fn aliased_keys_are_written_canonically() {
        let record: CandidateRecord =
            serde_json::from_str(r#"{"nom":"Perruque","lien":"https://x.sn/1","prix":1}"#)
                .expect("deserialize");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"name": "Perruque", "link": "https://x.sn/1", "prix": 1})
        );
    }

    #[test]
    fn report_into_records_strips_scores() {
        let report = SearchReport {
            candidates: vec![ScoredCandidate {
                record: CandidateRecord::new("Perruque"),
                score: 95.0,
                variant: "perruque".into(),
                variant_index: 0,
            }],
            ..Default::default()
        };
        let records = report.into_records();
        assert_eq!(records, vec![CandidateRecord::new("Perruque")]);
    }
}
