//! Typosquat detection.
//!
//! Compares the package name against a reference list of popular npm
//! package names using edit distance. A near-miss (distance 1 or 2) is
//! the classic typosquat shape: close enough to be typed by accident,
//! different enough to be a separate registry entry. Exact matches are
//! never flagged. The same detector also surfaces maintainer-hygiene
//! gaps (no repository, no author, an explicitly empty maintainers
//! list) that typosquats tend to share.

use crate::config::ScanPolicy;
use crate::manifest::{Manifest, ParseOutcome};

use super::{DetectorKind, DetectorResult, Finding, FindingKind, CAP_DETECTOR};

/// Maximum edit distance still considered a near-miss.
const MAX_SUSPECT_DISTANCE: usize = 2;

/// Case-insensitive Levenshtein distance with a single rolling row.
///
/// O(|a| * |b|) time, O(min-side) memory. Operates on Unicode scalar
/// values, which is exact for registry package names.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (prev_diag + cost).min(row[j] + 1).min(row[j + 1] + 1);
            prev_diag = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}

/// The closest reference name and its distance, when the package name
/// is a near-miss of exactly that shape: distance in `(0, 2]`.
#[must_use]
pub fn closest_near_miss(name: &str, references: &[String]) -> Option<(String, usize)> {
    references
        .iter()
        .map(|reference| (reference.clone(), levenshtein(name, reference)))
        .filter(|&(_, distance)| distance > 0 && distance <= MAX_SUSPECT_DISTANCE)
        .min_by_key(|&(_, distance)| distance)
}

/// Scores typosquat findings: +2 for a suspected near-miss, +1 once if
/// any hygiene gap is present, capped.
#[must_use]
pub fn score_typosquat_findings(findings: &[Finding]) -> u32 {
    let mut score = 0;
    if findings
        .iter()
        .any(|f| matches!(f.kind, FindingKind::TyposquatSuspected { .. }))
    {
        score += 2;
    }
    let hygiene_gap = findings.iter().any(|f| {
        matches!(
            f.kind,
            FindingKind::NoRepository | FindingKind::NoAuthor | FindingKind::NoMaintainers
        )
    });
    if hygiene_gap {
        score += 1;
    }
    score.min(CAP_DETECTOR)
}

/// Name-similarity and maintainer-hygiene detector over the manifest.
pub struct TyposquatDetector<'a> {
    policy: &'a ScanPolicy,
}

impl<'a> TyposquatDetector<'a> {
    #[must_use]
    pub fn new(policy: &'a ScanPolicy) -> Self {
        Self { policy }
    }

    /// Inspects the parsed manifest. A missing or malformed manifest
    /// yields a single `ManifestMissing` finding and no score: there
    /// is no name to compare.
    #[must_use]
    pub fn inspect(&self, manifest: &ParseOutcome<Manifest>) -> DetectorResult {
        let Some(manifest) = manifest.as_parsed() else {
            let finding = Finding::new(DetectorKind::Typosquat, FindingKind::ManifestMissing);
            return DetectorResult::new(0, vec![finding]);
        };

        let mut findings = Vec::new();

        if let Some((closest, distance)) =
            closest_near_miss(&manifest.name, &self.policy.popular_packages)
        {
            findings.push(
                Finding::new(
                    DetectorKind::Typosquat,
                    FindingKind::TyposquatSuspected { closest, distance },
                )
                .at(manifest.name.clone()),
            );
        }

        if !manifest.has_repository {
            findings.push(Finding::new(
                DetectorKind::Typosquat,
                FindingKind::NoRepository,
            ));
        }
        if !manifest.has_author {
            findings.push(Finding::new(DetectorKind::Typosquat, FindingKind::NoAuthor));
        }
        if manifest.empty_maintainers {
            findings.push(Finding::new(
                DetectorKind::Typosquat,
                FindingKind::NoMaintainers,
            ));
        }

        let score = score_typosquat_findings(&findings);
        DetectorResult::new(score, findings)
    }
}
