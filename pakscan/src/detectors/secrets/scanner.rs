use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::config::ScanPolicy;
use crate::constants::{get_secret_signatures, token_candidate_re, SecretSignature};
use crate::detectors::{DetectorKind, DetectorResult, Finding, FindingKind, CAP_DETECTOR};
use crate::utils::{normalize_display_path, redact};

use super::entropy::is_secret_candidate;
use super::walker::walk_text_files;

/// Per-file outcome counters, aggregated across the walk. Skips are
/// deliberate (unreadable/oversized/binary files in a best-effort
/// scan) but counted explicitly rather than silently swallowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Files whose content was scanned.
    pub scanned: usize,
    /// Files skipped because they could not be read.
    pub skipped: usize,
}

/// Full-tree secrets scan: pattern table plus entropy heuristic.
pub struct SecretsDetector<'a> {
    policy: &'a ScanPolicy,
    signatures: &'a [SecretSignature],
    candidate_re: regex::Regex,
}

impl<'a> SecretsDetector<'a> {
    /// Creates a detector using the built-in credential signature
    /// table. The entropy-candidate extraction regex honors the
    /// policy's minimum token length.
    #[must_use]
    pub fn new(policy: &'a ScanPolicy) -> Self {
        Self {
            policy,
            signatures: get_secret_signatures(),
            candidate_re: token_candidate_re(policy.min_token_length),
        }
    }

    /// Overrides the signature table (test seam for alternate
    /// reference sets).
    #[must_use]
    pub fn with_signatures(mut self, signatures: &'a [SecretSignature]) -> Self {
        self.signatures = signatures;
        self
    }

    /// Scans every surviving file under the root. Read-only; the only
    /// output is the finding list and counters.
    #[must_use]
    pub fn scan(&self, root: &Path) -> (DetectorResult, FileStats) {
        let mut paths: Vec<_> = walk_text_files(root, self.policy).collect();
        paths.sort();

        let per_file: Vec<Option<Vec<Finding>>> = paths
            .par_iter()
            .map(|path| {
                if crate::CANCELLED.load(std::sync::atomic::Ordering::Relaxed) {
                    return None;
                }
                let bytes = std::fs::read(path).ok()?;
                let content = String::from_utf8_lossy(&bytes);
                let location = path
                    .strip_prefix(root)
                    .map_or_else(|_| normalize_display_path(path), normalize_display_path);
                Some(self.scan_content(&content, &location))
            })
            .collect();

        let mut stats = FileStats::default();
        let mut findings = Vec::new();
        for outcome in per_file {
            match outcome {
                Some(file_findings) => {
                    stats.scanned += 1;
                    findings.extend(file_findings);
                }
                None => stats.skipped += 1,
            }
        }

        let score = score_secret_findings(&findings);
        (DetectorResult::new(score, findings), stats)
    }

    /// Scans one decoded file content. Pattern matches are emitted
    /// first; entropy candidates already covered by a pattern match in
    /// the same file are suppressed so they are not double counted.
    fn scan_content(&self, content: &str, location: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut matched_values: Vec<&str> = Vec::new();

        for signature in self.signatures {
            for m in signature.regex.find_iter(content) {
                matched_values.push(m.as_str());
                findings.push(
                    Finding::new(DetectorKind::Secrets, signature.kind.clone())
                        .at(location)
                        .with_evidence(redact(m.as_str())),
                );
            }
        }

        for candidate in self.candidate_re.find_iter(content) {
            let token = candidate.as_str();
            if !is_secret_candidate(
                token,
                self.policy.entropy_threshold,
                self.policy.min_token_length,
            ) {
                continue;
            }
            let covered = matched_values
                .iter()
                .any(|value| token.contains(*value) || value.contains(token));
            if covered {
                continue;
            }
            findings.push(
                Finding::new(DetectorKind::Secrets, FindingKind::HighEntropyToken)
                    .at(location)
                    .with_evidence(redact(token)),
            );
        }

        findings
    }
}

/// Deterministic, order-independent scoring rule: 3 points if any hard
/// pattern finding exists, 1 if any entropy-only finding exists,
/// capped at the detector bound.
#[must_use]
pub fn score_secret_findings(findings: &[Finding]) -> u32 {
    let has_pattern = findings.iter().any(|f| f.kind.is_credential_pattern());
    let has_entropy = findings
        .iter()
        .any(|f| f.kind == FindingKind::HighEntropyToken);

    let mut score = 0;
    if has_pattern {
        score += 3;
    }
    if has_entropy {
        score += 1;
    }
    score.min(CAP_DETECTOR)
}
