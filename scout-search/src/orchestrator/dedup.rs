//! Cross-variant de-duplication.
//!
//! Different variants often surface the same product. Each candidate gets
//! an identity key (canonical link, else display name) and only the first
//! occurrence is processed.

use std::collections::HashSet;

use crate::types::CandidateRecord;

use super::url_normalize::canonical_link;

/// Stable identity of a candidate.
///
/// Prefers the canonicalised link and falls back to the trimmed display
/// name. An empty key means the record carries neither; such records are
/// never treated as duplicates.
pub fn identity(candidate: &CandidateRecord) -> String {
    let link = candidate.link.as_deref().map(canonical_link).unwrap_or_default();
    if !link.is_empty() {
        return link;
    }
    candidate.name.trim().to_owned()
}

/// Identities already processed during one search.
#[derive(Debug, Default)]
pub struct SeenIdentities {
    keys: HashSet<String>,
}

impl SeenIdentities {
    /// Record `key`, returning `true` if the candidate should be processed.
    ///
    /// Empty keys always return `true` and are not recorded.
    pub fn insert(&mut self, key: String) -> bool {
        if key.is_empty() {
            return true;
        }
        self.keys.insert(key)
    }

    /// Number of distinct identities recorded.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
