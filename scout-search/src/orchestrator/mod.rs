//! Search orchestrator: variant probing, dedup, scoring, ranking.
//!
//! This module walks the variant list against a catalog fetcher,
//! deduplicates candidates by canonical link, scores them against the
//! original term, and returns a ranked, truncated result set.

pub mod dedup;
pub mod scoring;
pub mod search;
pub mod url_normalize;
