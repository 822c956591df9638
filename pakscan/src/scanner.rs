//! Scan orchestration.
//!
//! Fans out over the independent detectors and folds their results
//! into one report. Detectors share nothing but read-only access to
//! the package root and the parsed manifest structures, so the order
//! here is presentation order, not a dependency order.

use std::path::Path;

use crate::config::ScanPolicy;
use crate::detectors::lockfile::DependenciesDetector;
use crate::detectors::policy::PolicyDetector;
use crate::detectors::secrets::SecretsDetector;
use crate::detectors::typosquat::TyposquatDetector;
use crate::detectors::DetectorKind;
use crate::external::{self, ToolOutcome};
use crate::fetch::ScanTarget;
use crate::manifest::{Lockfile, Manifest};
use crate::report::{DetectorReport, ReportBuilder, RiskReport};

/// Configured scan pipeline. External tools are opt-in; everything
/// else always runs.
pub struct Scanner {
    policy: ScanPolicy,
    static_analysis: bool,
    verify_signature: bool,
}

impl Scanner {
    #[must_use]
    pub fn new(policy: ScanPolicy) -> Self {
        Self {
            policy,
            static_analysis: false,
            verify_signature: false,
        }
    }

    /// Enable the semgrep-backed static-analysis detector.
    #[must_use]
    pub fn with_static_analysis(mut self, enabled: bool) -> Self {
        self.static_analysis = enabled;
        self
    }

    /// Enable cosign signature verification for remote targets.
    #[must_use]
    pub fn with_signature_verification(mut self, enabled: bool) -> Self {
        self.verify_signature = enabled;
        self
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    /// Runs every detector against the resolved package root.
    #[must_use]
    pub fn scan(&self, target: &ScanTarget, root: &Path) -> RiskReport {
        let manifest = Manifest::read(root);
        let lockfile = Lockfile::read(root);

        let mut builder = ReportBuilder::new(target.identifier());

        let (secrets, stats) = SecretsDetector::new(&self.policy).scan(root);
        builder.set_file_stats(stats.scanned, stats.skipped);
        builder.record(DetectorKind::Secrets, DetectorReport::completed(secrets));

        builder.record(
            DetectorKind::Dependencies,
            DetectorReport::completed(
                DependenciesDetector::new(&self.policy).inspect(&manifest, &lockfile),
            ),
        );
        builder.record(
            DetectorKind::Typosquat,
            DetectorReport::completed(TyposquatDetector::new(&self.policy).inspect(&manifest)),
        );
        builder.record(
            DetectorKind::Policy,
            DetectorReport::completed(PolicyDetector::new(&self.policy).inspect(&manifest)),
        );

        if self.static_analysis {
            let slot = match external::run_static_analysis(root) {
                ToolOutcome::Ran(result) => DetectorReport::completed(result),
                ToolOutcome::Unavailable => DetectorReport::tool_unavailable(),
            };
            builder.record(DetectorKind::StaticAnalysis, slot);
        }

        // Signature verification only means anything for a package
        // that came from somewhere.
        if self.verify_signature && target.is_remote() {
            let slot = match external::verify_signature(&target.identifier()) {
                ToolOutcome::Ran(result) => DetectorReport::completed(result),
                ToolOutcome::Unavailable => DetectorReport::tool_unavailable(),
            };
            builder.record(DetectorKind::Signature, slot);
        }

        builder.finish(&self.policy)
    }
}
