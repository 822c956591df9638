//! Cosign adapter for the signature detector.

use std::io;
use std::process::Command;

use crate::detectors::{DetectorKind, DetectorResult, Finding, FindingKind};

use super::ToolOutcome;

/// Verifies a remote target's signature with cosign.
///
/// Verification is informational: an unverified target is recorded as a
/// finding but contributes no score, since most registry packages are
/// unsigned and absence of a signature is not itself a risk signal.
pub fn verify_signature(target: &str) -> ToolOutcome {
    let output = Command::new("cosign").arg("verify").arg(target).output();

    match output {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            ToolOutcome::Ran(result_from_verified(stdout.contains("Verified OK"), target))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => ToolOutcome::Unavailable,
        Err(_) => ToolOutcome::Unavailable,
    }
}

/// Builds the detector result for a verification outcome.
#[must_use]
pub fn result_from_verified(verified: bool, target: &str) -> DetectorResult {
    if verified {
        return DetectorResult::empty();
    }
    let finding =
        Finding::new(DetectorKind::Signature, FindingKind::SignatureUnverified).at(target);
    DetectorResult::new(0, vec![finding])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verified_target_clean() {
        let result = result_from_verified(true, "npm:left-pad");
        assert!(result.findings.is_empty());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_unverified_target_recorded_without_score() {
        let result = result_from_verified(false, "npm:left-pad");
        assert_eq!(result.score, 0);
        assert_eq!(result.findings[0].kind, FindingKind::SignatureUnverified);
        assert_eq!(result.findings[0].location.as_deref(), Some("npm:left-pad"));
    }
}
