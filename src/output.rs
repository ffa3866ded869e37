//! JSON-lines rendering of search results.

use scout_search::{CandidateRecord, ScoredCandidate, SearchReport};
use serde::Serialize;

use crate::error::{Result, ScoutError};

/// One line of `--explain` output.
#[derive(Debug, Serialize)]
struct ExplainLine<'a> {
    rank: usize,
    score: f64,
    variant: &'a str,
    variant_index: usize,
    record: &'a CandidateRecord,
}

/// Summary line closing `--explain` output.
#[derive(Debug, Serialize)]
struct ExplainSummary<'a> {
    variants: &'a [String],
    variants_fetched: usize,
    failed_variants: &'a [String],
    stopped_early: bool,
    results: usize,
}

/// Render each record as one compact JSON object per line.
///
/// # Errors
///
/// Returns [`ScoutError::Output`] if a record payload cannot be serialized.
pub fn record_lines(records: &[CandidateRecord]) -> Result<Vec<String>> {
    records.iter().map(to_line).collect()
}

/// Render a report: one line per ranked candidate with its score and
/// provenance, then a summary line.
///
/// # Errors
///
/// Returns [`ScoutError::Output`] if a record payload cannot be serialized.
pub fn explain_lines(report: &SearchReport) -> Result<Vec<String>> {
    let mut lines = report
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| to_line(&explain_line(i + 1, c)))
        .collect::<Result<Vec<_>>>()?;
    lines.push(to_line(&ExplainSummary {
        variants: &report.variants,
        variants_fetched: report.variants_fetched,
        failed_variants: &report.failed_variants,
        stopped_early: report.stopped_early,
        results: report.candidates.len(),
    })?);
    Ok(lines)
}

fn explain_line(rank: usize, candidate: &ScoredCandidate) -> ExplainLine<'_> {
    ExplainLine {
        rank,
        score: candidate.score,
        variant: &candidate.variant,
        variant_index: candidate.variant_index,
        record: &candidate.record,
    }
}

fn to_line<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ScoutError::Output(e.to_string()))
}
