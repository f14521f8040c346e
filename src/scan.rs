//! Scan engine: runs every catalog rule over a text and aggregates findings.
//!
//! Pure function of (catalog, text, filename). Outer loop over rules in
//! catalog order, inner loop over all non-overlapping matches in occurrence
//! order; this ordering is observable and kept stable for reproducible
//! output. No deduplication across rules: overlapping matches from two rules
//! produce two findings.

use crate::catalog::Catalog;
use crate::models::{Finding, ScanResult, SeverityCounts, Summary};
use serde_json::Value as Json;

/// Label applied to findings when the caller supplies no filename.
pub const DEFAULT_FILENAME: &str = "snippet.js";

/// Snippet window, in characters, around a match start.
const SNIPPET_BEFORE: usize = 60;
const SNIPPET_AFTER: usize = 120;

#[derive(Debug, thiserror::Error)]
/// The engine's only error kind. Given a valid string and a constructed
/// catalog, `scan` always succeeds.
pub enum ScanError {
    #[error("'code' is required and must be a string")]
    InvalidInput,
}

/// Scan `text` against every rule in the catalog.
///
/// Offsets and snippet bounds are measured in characters, not bytes, so
/// multibyte input keeps slicing consistent with the reported `index`.
pub fn scan(catalog: &Catalog, text: &str, filename: Option<&str>) -> ScanResult {
    let label = filename.unwrap_or(DEFAULT_FILENAME);
    // Byte offset of each character start, for byte->char conversion and
    // snippet windowing.
    let char_starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();

    let mut findings: Vec<Finding> = Vec::new();
    for rule in catalog.iter() {
        for m in rule.pattern.find_iter(text) {
            // Match starts are char boundaries, so this is an exact lookup.
            let index = char_starts.partition_point(|&b| b < m.start());
            findings.push(Finding {
                rule_id: rule.id.clone(),
                severity: rule.severity,
                message: rule.message.clone(),
                filename: label.to_string(),
                index,
                snippet: snippet_window(text, &char_starts, index).to_string(),
            });
        }
    }

    let summary = summarize(&findings);
    ScanResult { summary, findings }
}

/// Transport-boundary adapter: validate a `{ code, filename? }` body and
/// delegate to [`scan`]. Absent or non-string `code` is rejected before the
/// scan starts.
pub fn scan_request(catalog: &Catalog, body: &Json) -> Result<ScanResult, ScanError> {
    let code = body
        .get("code")
        .and_then(Json::as_str)
        .ok_or(ScanError::InvalidInput)?;
    let filename = body.get("filename").and_then(Json::as_str);
    Ok(scan(catalog, code, filename))
}

/// Recompute the summary from a finalized finding list.
pub fn summarize(findings: &[Finding]) -> Summary {
    let mut by_severity = SeverityCounts::default();
    for f in findings {
        by_severity.bump(f.severity);
    }
    Summary {
        total_findings: findings.len(),
        by_severity,
    }
}

/// The character window `[index-60, index+120)` clamped to the text.
fn snippet_window<'a>(text: &'a str, char_starts: &[usize], index: usize) -> &'a str {
    if char_starts.is_empty() {
        return "";
    }
    let start = index.saturating_sub(SNIPPET_BEFORE);
    let end = (index + SNIPPET_AFTER).min(char_starts.len());
    let lo = char_starts[start];
    let hi = if end == char_starts.len() {
        text.len()
    } else {
        char_starts[end]
    };
    &text[lo..hi]
}
