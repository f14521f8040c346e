//! Shared data models for scan output.

use crate::catalog::{RuleId, Severity};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// One reported occurrence of a rule match in the scanned text.
///
/// `index` is a zero-based character offset; `snippet` is the character
/// window `[index-60, index+120)` clamped to the text. Fields are copied
/// from the triggering rule at scan time and never mutated afterwards.
pub struct Finding {
    pub rule_id: RuleId,
    pub severity: Severity,
    pub message: String,
    pub filename: String,
    pub index: usize,
    pub snippet: String,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Finding counts per severity. All three keys are always serialized, even
/// when a count is zero.
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Aggregate counts recomputed fresh on every scan.
pub struct Summary {
    pub total_findings: usize,
    pub by_severity: SeverityCounts,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// Complete, immutable output of one scan invocation.
pub struct ScanResult {
    pub summary: Summary,
    pub findings: Vec<Finding>,
}
