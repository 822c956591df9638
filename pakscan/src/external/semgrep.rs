//! Semgrep adapter for the static-analysis detector.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

use crate::detectors::{DetectorKind, DetectorResult, Finding, FindingKind, CAP_DETECTOR};

use super::ToolOutcome;

/// Runs semgrep over the package root and consumes its match count.
///
/// The count is taken as occurrences of `rule_id` in the tool's output,
/// which appears exactly once per reported match. Score is the count,
/// capped.
pub fn run_static_analysis(root: &Path) -> ToolOutcome {
    outcome_from_spawn(
        Command::new("semgrep")
            .arg("--config")
            .arg("auto")
            .arg(root)
            .output(),
    )
}

/// A spawn failure of any kind means the tool produced no verdict; it
/// is reported as unavailable, never mistaken for a clean run.
fn outcome_from_spawn(spawn: io::Result<Output>) -> ToolOutcome {
    match spawn {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let count = stdout.matches("rule_id").count();
            ToolOutcome::Ran(result_from_count(count))
        }
        Err(_) => ToolOutcome::Unavailable,
    }
}

/// Builds the detector result for a given semgrep match count.
#[must_use]
pub fn result_from_count(count: usize) -> DetectorResult {
    if count == 0 {
        return DetectorResult::empty();
    }
    let score = u32::try_from(count).unwrap_or(CAP_DETECTOR).min(CAP_DETECTOR);
    let finding = Finding::new(
        DetectorKind::StaticAnalysis,
        FindingKind::StaticAnalysisFindings { count },
    );
    DetectorResult::new(score, vec![finding])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_failure_is_unavailable_not_clean() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(
            outcome_from_spawn(Err(denied)),
            ToolOutcome::Unavailable
        ));

        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert!(matches!(
            outcome_from_spawn(Err(missing)),
            ToolOutcome::Unavailable
        ));
    }

    #[test]
    fn test_zero_matches_clean() {
        let result = result_from_count(0);
        assert_eq!(result.score, 0);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_count_caps_at_five() {
        assert_eq!(result_from_count(3).score, 3);
        assert_eq!(result_from_count(12).score, 5);
    }

    #[test]
    fn test_finding_carries_full_count() {
        let result = result_from_count(12);
        assert_eq!(
            result.findings[0].kind,
            FindingKind::StaticAnalysisFindings { count: 12 }
        );
    }
}
