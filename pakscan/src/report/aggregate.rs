//! Risk aggregation.
//!
//! The total is the plain sum of every completed detector's capped
//! score. The total itself is deliberately uncapped: many modest,
//! independent signals should still surface as very high combined
//! risk. Detectors that did not run are recorded with an explicit
//! status and contribute zero, never silently omitted.

use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::ScanPolicy;
use crate::detectors::{DetectorKind, DetectorResult, Finding};

/// Final risk tier, mapped from the total by a monotonic threshold
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Maps a total score through the policy's threshold table.
    #[must_use]
    pub fn from_total(total: u32, policy: &ScanPolicy) -> RiskTier {
        if total >= policy.tier_high {
            RiskTier::High
        } else if total >= policy.tier_medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        };
        f.write_str(name)
    }
}

/// How one detector's slot in the report came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorStatus {
    /// The detector ran to completion.
    Completed,
    /// The detector does not apply to this target.
    NotApplicable,
    /// The detector's external tool is not installed.
    ToolUnavailable,
}

/// One detector's slot in the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorReport {
    /// Why the score is (or is not) meaningful.
    pub status: DetectorStatus,
    /// Capped sub-score; zero unless completed.
    pub score: u32,
    /// Findings in emission order.
    pub findings: Vec<Finding>,
}

impl DetectorReport {
    #[must_use]
    pub fn completed(result: DetectorResult) -> Self {
        Self {
            status: DetectorStatus::Completed,
            score: result.score,
            findings: result.findings,
        }
    }

    #[must_use]
    pub fn not_applicable() -> Self {
        Self {
            status: DetectorStatus::NotApplicable,
            score: 0,
            findings: Vec::new(),
        }
    }

    #[must_use]
    pub fn tool_unavailable() -> Self {
        Self {
            status: DetectorStatus::ToolUnavailable,
            score: 0,
            findings: Vec::new(),
        }
    }
}

/// The complete persisted scan result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    /// Target identifier as given on the command line.
    pub target: String,
    /// Local wall-clock time the report was produced.
    pub generated_at: String,
    /// Every detector, keyed by stable name; always all six.
    pub detectors: BTreeMap<String, DetectorReport>,
    /// Files the secrets walk read.
    pub files_scanned: usize,
    /// Files skipped as unreadable or oversized.
    pub files_skipped: usize,
    /// Uncapped sum of completed sub-scores.
    pub total: u32,
    /// Tier mapped from the total.
    pub tier: RiskTier,
}

impl RiskReport {
    /// Findings across all detectors, in report order.
    #[must_use]
    pub fn all_findings(&self) -> Vec<&Finding> {
        DetectorKind::ALL
            .iter()
            .filter_map(|kind| self.detectors.get(kind.name()))
            .flat_map(|report| report.findings.iter())
            .collect()
    }
}

/// Accumulates detector outcomes and finishes into a [`RiskReport`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    target: String,
    detectors: BTreeMap<String, DetectorReport>,
    files_scanned: usize,
    files_skipped: usize,
}

impl ReportBuilder {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Records one detector's slot.
    pub fn record(&mut self, kind: DetectorKind, report: DetectorReport) {
        self.detectors.insert(kind.name().to_owned(), report);
    }

    /// Records the secrets walk's file statistics.
    pub fn set_file_stats(&mut self, scanned: usize, skipped: usize) {
        self.files_scanned = scanned;
        self.files_skipped = skipped;
    }

    /// Sums completed scores and maps the tier. Detectors never
    /// recorded default to not-applicable so the report always carries
    /// all six slots.
    #[must_use]
    pub fn finish(mut self, policy: &ScanPolicy) -> RiskReport {
        for kind in DetectorKind::ALL {
            self.detectors
                .entry(kind.name().to_owned())
                .or_insert_with(DetectorReport::not_applicable);
        }

        let total = self
            .detectors
            .values()
            .filter(|d| d.status == DetectorStatus::Completed)
            .map(|d| d.score)
            .sum();

        RiskReport {
            target: self.target,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            detectors: self.detectors,
            files_scanned: self.files_scanned,
            files_skipped: self.files_skipped,
            total,
            tier: RiskTier::from_total(total, policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::FindingKind;

    #[test]
    fn test_tier_thresholds() {
        let policy = ScanPolicy::default();
        assert_eq!(RiskTier::from_total(0, &policy), RiskTier::Low);
        assert_eq!(RiskTier::from_total(3, &policy), RiskTier::Low);
        assert_eq!(RiskTier::from_total(4, &policy), RiskTier::Medium);
        assert_eq!(RiskTier::from_total(6, &policy), RiskTier::Medium);
        assert_eq!(RiskTier::from_total(7, &policy), RiskTier::High);
        assert_eq!(RiskTier::from_total(40, &policy), RiskTier::High);
    }

    #[test]
    fn test_total_is_exact_sum_of_completed_scores() {
        let policy = ScanPolicy::default();
        let mut builder = ReportBuilder::new("fixture");
        builder.record(
            DetectorKind::Secrets,
            DetectorReport::completed(DetectorResult::new(3, Vec::new())),
        );
        builder.record(
            DetectorKind::Dependencies,
            DetectorReport::completed(DetectorResult::new(4, Vec::new())),
        );
        builder.record(DetectorKind::Signature, DetectorReport::not_applicable());

        let report = builder.finish(&policy);
        assert_eq!(report.total, 7);
        assert_eq!(report.tier, RiskTier::High);
    }

    #[test]
    fn test_every_detector_always_present() {
        let policy = ScanPolicy::default();
        let report = ReportBuilder::new("fixture").finish(&policy);

        assert_eq!(report.detectors.len(), DetectorKind::ALL.len());
        for kind in DetectorKind::ALL {
            let slot = &report.detectors[kind.name()];
            assert_eq!(slot.status, DetectorStatus::NotApplicable);
            assert_eq!(slot.score, 0);
        }
        assert_eq!(report.total, 0);
        assert_eq!(report.tier, RiskTier::Low);
    }

    #[test]
    fn test_skipped_detectors_do_not_score() {
        let policy = ScanPolicy::default();
        let mut builder = ReportBuilder::new("fixture");
        builder.record(
            DetectorKind::Signature,
            DetectorReport::completed(DetectorResult::new(
                0,
                vec![crate::detectors::Finding::new(
                    DetectorKind::Signature,
                    FindingKind::SignatureUnverified,
                )],
            )),
        );
        builder.record(DetectorKind::StaticAnalysis, DetectorReport::tool_unavailable());

        let report = builder.finish(&policy);
        assert_eq!(report.total, 0);
        assert_eq!(report.all_findings().len(), 1);
    }

    #[test]
    fn test_custom_thresholds_shift_tiers() {
        let policy = ScanPolicy {
            tier_medium: 1,
            tier_high: 2,
            ..ScanPolicy::default()
        };
        assert_eq!(RiskTier::from_total(1, &policy), RiskTier::Medium);
        assert_eq!(RiskTier::from_total(2, &policy), RiskTier::High);
    }
}
