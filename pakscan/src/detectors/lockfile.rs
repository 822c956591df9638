//! Dependency-graph and install-script risk.
//!
//! Two inspections merge into one detector score: lockfile entries are
//! classified by resolution-URL scheme and integrity presence, and the
//! manifest's script map is checked for lifecycle hooks and
//! dangerous-command signatures. A single script may yield several
//! findings, one per matched capability, since breadth of capability is
//! what the score measures.

use crate::config::ScanPolicy;
use crate::constants::get_command_signatures;
use crate::manifest::{DependencyEntry, Lockfile, Manifest, ParseOutcome};

use super::{DetectorKind, DetectorResult, Finding, FindingKind, CAP_DETECTOR};

/// Scores dependency findings from the fixed rule table: +2 for any
/// script finding, +1 for any risky resolution URL, +1 for any missing
/// integrity, +1 when no lockfile exists, capped.
#[must_use]
pub fn score_dependency_findings(findings: &[Finding]) -> u32 {
    let mut score = 0;
    if findings.iter().any(|f| {
        matches!(
            f.kind,
            FindingKind::LifecycleScript | FindingKind::DangerousCommand { .. }
        )
    }) {
        score += 2;
    }
    if findings
        .iter()
        .any(|f| matches!(f.kind, FindingKind::GitDependency | FindingKind::UrlDependency))
    {
        score += 1;
    }
    if findings
        .iter()
        .any(|f| f.kind == FindingKind::MissingIntegrity)
    {
        score += 1;
    }
    if findings.iter().any(|f| f.kind == FindingKind::NoLockfile) {
        score += 1;
    }
    score.min(CAP_DETECTOR)
}

/// Lockfile-entry and install-script detector.
pub struct DependenciesDetector<'a> {
    policy: &'a ScanPolicy,
}

impl<'a> DependenciesDetector<'a> {
    #[must_use]
    pub fn new(policy: &'a ScanPolicy) -> Self {
        Self { policy }
    }

    /// Inspects the lockfile entries and the manifest's script map.
    #[must_use]
    pub fn inspect(
        &self,
        manifest: &ParseOutcome<Manifest>,
        lockfile: &ParseOutcome<Lockfile>,
    ) -> DetectorResult {
        let mut findings = Vec::new();

        match lockfile.as_parsed() {
            Some(lockfile) => {
                for entry in &lockfile.entries {
                    classify_entry(entry, &mut findings);
                }
            }
            // A lockfile that fails to parse, or a file with no
            // recognizable lockfile structure, gives the same signal
            // as one that was never committed: resolutions are
            // unpinned.
            None => findings.push(Finding::new(
                DetectorKind::Dependencies,
                FindingKind::NoLockfile,
            )),
        }

        if let Some(manifest) = manifest.as_parsed() {
            self.classify_scripts(manifest, &mut findings);
        }

        let score = score_dependency_findings(&findings);
        DetectorResult::new(score, findings)
    }

    /// Flags lifecycle-key scripts, and scans every script body against
    /// the dangerous-command signature table.
    fn classify_scripts(&self, manifest: &Manifest, findings: &mut Vec<Finding>) {
        for (key, command) in &manifest.scripts {
            if self.policy.lifecycle_keys.contains(key.as_str()) {
                findings.push(
                    Finding::new(DetectorKind::Dependencies, FindingKind::LifecycleScript)
                        .at(key.clone())
                        .with_evidence(command.clone()),
                );
            }
            for signature in get_command_signatures() {
                if signature.regex.is_match(command) {
                    findings.push(
                        Finding::new(
                            DetectorKind::Dependencies,
                            FindingKind::DangerousCommand {
                                category: signature.category,
                            },
                        )
                        .at(key.clone()),
                    );
                }
            }
        }
    }
}

/// Classifies one lock entry. Git/ssh schemes win over plain http(s);
/// registry tarballs (`.tgz`) are the expected shape and are not
/// flagged.
fn classify_entry(entry: &DependencyEntry, findings: &mut Vec<Finding>) {
    if let Some(url) = entry.resolved.as_deref() {
        let url = url.to_lowercase();
        if url.starts_with("git+") || url.starts_with("git://") || url.starts_with("ssh://") {
            findings.push(
                Finding::new(DetectorKind::Dependencies, FindingKind::GitDependency)
                    .at(entry.name.clone())
                    .with_evidence(url.clone()),
            );
        } else if (url.starts_with("http://") || url.starts_with("https://"))
            && !url.contains(".tgz")
        {
            findings.push(
                Finding::new(DetectorKind::Dependencies, FindingKind::UrlDependency)
                    .at(entry.name.clone())
                    .with_evidence(url.clone()),
            );
        }
    }
    if !entry.has_integrity {
        findings.push(
            Finding::new(DetectorKind::Dependencies, FindingKind::MissingIntegrity)
                .at(entry.name.clone()),
        );
    }
}
