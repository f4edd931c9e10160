//! Run reports
//!
//! [`RunReport`] accumulates classifications while the corpus is consumed.
//! Once the corpus is exhausted it is finalized against the allowlist into a
//! [`FinalReport`], which decides the run's success and renders the output.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::time::Duration;

use crate::allowlist::{Allowlist, AllowlistMode, Reconciliation};
use crate::capabilities::UnmappedFeatures;
use crate::classify::Classification;
use crate::corpus::TestRecord;

/// Pass/fail counts for one corpus chapter (`language`, `built-ins`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterResult {
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl ChapterResult {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Incremental results of a run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub passed: usize,
    /// Failing tests that are on the allowlist
    pub expected_failures: usize,
    pub skipped: usize,
    /// Every failing id with the reason it failed
    pub failures: BTreeMap<String, String>,
    /// Allowlisted ids that ran and passed
    pub passed_allowlisted: BTreeSet<String>,
    pub chapters: BTreeMap<String, ChapterResult>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tests that reached the subject
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    /// Record the classification of one test
    pub fn add_result(&mut self, record: &TestRecord, classification: Classification, allowlisted: bool) {
        let chapter = record.chapter().to_string();
        let entry = self
            .chapters
            .entry(chapter.clone())
            .or_insert_with(|| ChapterResult {
                name: chapter,
                ..Default::default()
            });
        entry.total += 1;

        match classification {
            Classification::Pass => {
                entry.passed += 1;
                self.passed += 1;
                if allowlisted {
                    self.passed_allowlisted.insert(record.id.clone());
                }
            }
            Classification::Fail { reason } => {
                entry.failed += 1;
                if allowlisted {
                    self.expected_failures += 1;
                }
                self.failures.insert(record.id.clone(), reason);
            }
        }
    }

    pub fn add_skip(&mut self) {
        self.skipped += 1;
    }

    /// Overall pass rate as a percentage of tests run
    pub fn pass_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.passed as f64 / total as f64 * 100.0
        }
    }

    pub fn failing_ids(&self) -> BTreeSet<String> {
        self.failures.keys().cloned().collect()
    }

    /// Compare against the allowlist and close the report
    pub fn finalize(self, allowlist: &Allowlist, unmapped: UnmappedFeatures, mode: AllowlistMode) -> FinalReport {
        let reconciliation = allowlist.reconcile(&self.failing_ids(), &self.passed_allowlisted);
        FinalReport {
            run: self,
            reconciliation,
            unmapped_features: unmapped.into_sorted_vec(),
            mode,
        }
    }
}

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary with sorted listings
    #[default]
    Text,
    /// JSON for CI
    Json,
}

/// Completed run, reconciled against the allowlist
#[derive(Debug, Clone)]
pub struct FinalReport {
    pub run: RunReport,
    pub reconciliation: Reconciliation,
    /// Sorted, each feature once
    pub unmapped_features: Vec<String>,
    pub mode: AllowlistMode,
}

impl FinalReport {
    /// Whether the process should exit successfully.
    ///
    /// Unmapped features fail the run in either mode. Otherwise report mode
    /// fails on any allowlist drift and update mode always succeeds.
    pub fn success(&self) -> bool {
        if !self.unmapped_features.is_empty() {
            return false;
        }
        match self.mode {
            AllowlistMode::Report => !self.reconciliation.has_drift(),
            AllowlistMode::Update => true,
        }
    }

    /// The allowlist that exactly matches this run's failures
    pub fn updated_allowlist(&self) -> Allowlist {
        self.run.failures.keys().cloned().collect()
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.format_summary(),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(&self.to_json()).unwrap_or_default();
                out.push('\n');
                out
            }
        }
    }

    /// Human-readable report
    pub fn format_summary(&self) -> String {
        let run = &self.run;
        let rec = &self.reconciliation;
        let mut s = String::new();

        s.push_str("\n=== test262 Parser Conformance ===\n\n");
        let _ = writeln!(
            s,
            "Tests: {} | Pass: {} | Fail: {} (allowlisted: {}) | Skipped: {}",
            run.total(),
            run.passed,
            run.failures.len(),
            run.expected_failures,
            run.skipped
        );
        let _ = writeln!(s, "Pass Rate: {:.1}%", run.pass_rate());
        let _ = writeln!(s, "Time: {:?}\n", run.elapsed);

        if !run.chapters.is_empty() {
            s.push_str("Per-Chapter Results:\n");
            let _ = writeln!(s, "{:<30} {:>6} {:>6} {:>6} {:>7}", "Chapter", "Total", "Pass", "Fail", "Rate");
            s.push_str(&"-".repeat(59));
            s.push('\n');
            for chapter in run.chapters.values() {
                let _ = writeln!(
                    s,
                    "{:<30} {:>6} {:>6} {:>6} {:>6.1}%",
                    chapter.name,
                    chapter.total,
                    chapter.passed,
                    chapter.failed,
                    chapter.pass_rate()
                );
            }
            s.push('\n');
        }

        match self.mode {
            AllowlistMode::Update => {
                let _ = writeln!(
                    s,
                    "Allowlist updated: {} entries ({} added, {} removed)",
                    run.failures.len(),
                    rec.newly_failing.len(),
                    rec.newly_fixed.len()
                );
            }
            AllowlistMode::Report => {
                if !rec.newly_failing.is_empty() {
                    let _ = writeln!(s, "{} tests failed that are not in the allowlist:", rec.newly_failing.len());
                    for id in &rec.newly_failing {
                        let reason = run.failures.get(id).map(String::as_str).unwrap_or("");
                        let _ = writeln!(s, "   {}: {}", id, reason);
                    }
                    s.push('\n');
                }
                if !rec.newly_fixed.is_empty() {
                    let _ = writeln!(
                        s,
                        "{} allowlisted tests did not fail and should be removed:",
                        rec.newly_fixed.len()
                    );
                    for id in &rec.newly_fixed {
                        if rec.unrecognized.binary_search(id).is_ok() {
                            let _ = writeln!(s, "   {} (not run)", id);
                        } else {
                            let _ = writeln!(s, "   {}", id);
                        }
                    }
                    s.push('\n');
                }
                if !rec.has_drift() {
                    s.push_str("All failures are in the allowlist.\n");
                }
            }
        }

        if !self.unmapped_features.is_empty() {
            s.push_str("\nThe following features are not currently mapped or ignored:\n");
            for feature in &self.unmapped_features {
                let _ = writeln!(s, "   {}", feature);
            }
        }

        s
    }

    /// Export as JSON
    pub fn to_json(&self) -> serde_json::Value {
        let chapters: serde_json::Map<String, serde_json::Value> = self
            .run
            .chapters
            .iter()
            .map(|(name, ch)| {
                (
                    name.clone(),
                    serde_json::json!({
                        "total": ch.total,
                        "passed": ch.passed,
                        "failed": ch.failed,
                        "pass_rate": ch.pass_rate(),
                    }),
                )
            })
            .collect();

        let mode = match self.mode {
            AllowlistMode::Report => "report",
            AllowlistMode::Update => "update",
        };

        serde_json::json!({
            "mode": mode,
            "success": self.success(),
            "total": self.run.total(),
            "passed": self.run.passed,
            "failed": self.run.failures.len(),
            "expected_failures": self.run.expected_failures,
            "skipped": self.run.skipped,
            "pass_rate": self.run.pass_rate(),
            "total_time_ms": self.run.elapsed.as_millis() as u64,
            "chapters": chapters,
            "allowlist": self.reconciliation,
            "failures": self.run.failures,
            "unmapped_features": self.unmapped_features,
        })
    }
}
