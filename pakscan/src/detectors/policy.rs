//! License and dependency-count policy.
//!
//! Purely manifest-driven. The license check is two-armed and mutually
//! exclusive: a declared license on the deny-list is a hard policy hit,
//! no declared license at all is a softer unknown. A declared license
//! outside the deny-list is clean.

use crate::config::ScanPolicy;
use crate::manifest::{Manifest, ParseOutcome};

use super::{DetectorKind, DetectorResult, Finding, FindingKind, CAP_DETECTOR};

/// Scores policy findings: +2 denied license, +1 unknown license,
/// +1 oversized dependency set, capped.
#[must_use]
pub fn score_policy_findings(findings: &[Finding]) -> u32 {
    let mut score = 0;
    if findings
        .iter()
        .any(|f| matches!(f.kind, FindingKind::DisallowedLicense { .. }))
    {
        score += 2;
    }
    if findings
        .iter()
        .any(|f| f.kind == FindingKind::UnknownLicense)
    {
        score += 1;
    }
    if findings
        .iter()
        .any(|f| matches!(f.kind, FindingKind::ManyDirectDependencies { .. }))
    {
        score += 1;
    }
    score.min(CAP_DETECTOR)
}

/// License deny-list and dependency-count detector.
pub struct PolicyDetector<'a> {
    policy: &'a ScanPolicy,
}

impl<'a> PolicyDetector<'a> {
    #[must_use]
    pub fn new(policy: &'a ScanPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn inspect(&self, manifest: &ParseOutcome<Manifest>) -> DetectorResult {
        let Some(manifest) = manifest.as_parsed() else {
            let finding = Finding::new(DetectorKind::Policy, FindingKind::ManifestMissing);
            return DetectorResult::new(0, vec![finding]);
        };

        let mut findings = Vec::new();

        match manifest.license.as_deref() {
            Some(license) => {
                let denied = self
                    .policy
                    .deny_licenses
                    .iter()
                    .any(|deny| deny.eq_ignore_ascii_case(license));
                if denied {
                    findings.push(Finding::new(
                        DetectorKind::Policy,
                        FindingKind::DisallowedLicense {
                            license: license.to_owned(),
                        },
                    ));
                }
            }
            None => findings.push(Finding::new(DetectorKind::Policy, FindingKind::UnknownLicense)),
        }

        if manifest.dependency_count > self.policy.max_direct_dependencies {
            findings.push(Finding::new(
                DetectorKind::Policy,
                FindingKind::ManyDirectDependencies {
                    count: manifest.dependency_count,
                },
            ));
        }

        let score = score_policy_findings(&findings);
        DetectorResult::new(score, findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn manifest(value: Value) -> ParseOutcome<Manifest> {
        ParseOutcome::Parsed(Manifest::from_value(&value))
    }

    fn deps(n: usize) -> Value {
        let map: serde_json::Map<String, Value> = (0..n)
            .map(|i| (format!("dep-{i}"), json!("1.0.0")))
            .collect();
        Value::Object(map)
    }

    #[test]
    fn test_denied_license_scores_two() {
        let policy = ScanPolicy::default();
        let result = PolicyDetector::new(&policy)
            .inspect(&manifest(json!({"name": "x", "license": "GPL-3.0"})));
        assert!(matches!(
            result.findings[0].kind,
            FindingKind::DisallowedLicense { ref license } if license == "GPL-3.0"
        ));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_object_license_form_recognized() {
        let policy = ScanPolicy::default();
        let result = PolicyDetector::new(&policy).inspect(&manifest(json!({
            "name": "x",
            "license": {"type": "AGPL-3.0"}
        })));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_unknown_license_scores_one_not_both() {
        let policy = ScanPolicy::default();
        let result = PolicyDetector::new(&policy).inspect(&manifest(json!({"name": "x"})));
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].kind, FindingKind::UnknownLicense);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_permissive_license_clean() {
        let policy = ScanPolicy::default();
        let result =
            PolicyDetector::new(&policy).inspect(&manifest(json!({"name": "x", "license": "MIT"})));
        assert!(result.findings.is_empty());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_many_dependencies_counted_as_union() {
        let policy = ScanPolicy::default();
        let result = PolicyDetector::new(&policy).inspect(&manifest(json!({
            "name": "x",
            "license": "MIT",
            "dependencies": deps(20),
            "devDependencies": deps(15),
        })));
        // dep-0..dep-14 overlap; the union is 20, under the limit.
        assert!(result.findings.is_empty());

        let result = PolicyDetector::new(&policy).inspect(&manifest(json!({
            "name": "x",
            "license": "MIT",
            "dependencies": deps(35),
        })));
        assert!(matches!(
            result.findings[0].kind,
            FindingKind::ManyDirectDependencies { count: 35 }
        ));
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_missing_manifest() {
        let policy = ScanPolicy::default();
        let result = PolicyDetector::new(&policy).inspect(&ParseOutcome::Missing);
        assert_eq!(result.score, 0);
        assert_eq!(result.findings[0].kind, FindingKind::ManifestMissing);
    }
}
