//! Detector core types.
//!
//! A detector inspects one category of input (file tree, manifest,
//! lockfile) and produces a [`DetectorResult`]: a score bounded by
//! [`CAP_DETECTOR`] plus an ordered list of [`Finding`]s. Every
//! detector's score is reproducible purely from its findings via a
//! fixed rule table, with no randomness or external state.

pub mod lockfile;
pub mod policy;
pub mod secrets;
pub mod typosquat;

use serde::Serialize;
use std::fmt;

pub use crate::constants::CAP_DETECTOR;

/// Identifies the detector a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    /// Credential patterns and high-entropy tokens in the file tree.
    Secrets,
    /// Lockfile entries and lifecycle install scripts.
    Dependencies,
    /// Name similarity against popular packages, plus maintainer hygiene.
    Typosquat,
    /// Declared license and dependency-count policy.
    Policy,
    /// External static-analysis tool adapter.
    StaticAnalysis,
    /// External signature verifier adapter (remote targets only).
    Signature,
}

impl DetectorKind {
    /// All detectors, in report order.
    pub const ALL: [DetectorKind; 6] = [
        DetectorKind::Secrets,
        DetectorKind::Dependencies,
        DetectorKind::Typosquat,
        DetectorKind::Policy,
        DetectorKind::StaticAnalysis,
        DetectorKind::Signature,
    ];

    /// Stable name used as the report map key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DetectorKind::Secrets => "secrets",
            DetectorKind::Dependencies => "dependencies",
            DetectorKind::Typosquat => "typosquat",
            DetectorKind::Policy => "policy",
            DetectorKind::StaticAnalysis => "static_analysis",
            DetectorKind::Signature => "signature",
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability category matched in a script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandCategory {
    /// `curl` invocation.
    CurlDownload,
    /// `wget` invocation.
    WgetDownload,
    /// PowerShell invocation.
    PowershellExec,
    /// `bash`/`sh` invocation.
    ShellExec,
    /// `node -e` inline evaluation.
    NodeEval,
    /// Executable-bit change via `chmod +x`.
    ChmodExec,
    /// `base64 -d` / `atob(` style decode obfuscation.
    Base64Decode,
    /// Archive extraction.
    ArchiveExtract,
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandCategory::CurlDownload => "curl_download",
            CommandCategory::WgetDownload => "wget_download",
            CommandCategory::PowershellExec => "powershell_exec",
            CommandCategory::ShellExec => "shell_exec",
            CommandCategory::NodeEval => "node_eval",
            CommandCategory::ChmodExec => "chmod_exec",
            CommandCategory::Base64Decode => "base64_decode",
            CommandCategory::ArchiveExtract => "archive_extract",
        };
        f.write_str(name)
    }
}

/// Closed enumeration of everything a detector can observe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// AWS access-key shape (`AKIA` + 16 uppercase alphanumerics).
    AwsAccessKey,
    /// AWS secret-key assignment shape.
    AwsSecretKey,
    /// GitHub personal access token shape.
    GithubToken,
    /// Slack token shape.
    SlackToken,
    /// Google API key shape.
    GoogleApiKey,
    /// PEM private-key header.
    PrivateKey,
    /// Long token whose character-distribution entropy crosses the
    /// secret-likelihood threshold.
    HighEntropyToken,
    /// Lockfile entry resolved from a git/ssh URL.
    GitDependency,
    /// Lockfile entry resolved from a raw http(s) URL (non-tarball).
    UrlDependency,
    /// Lockfile entry without integrity metadata.
    MissingIntegrity,
    /// No lockfile present at all.
    NoLockfile,
    /// Script registered under an install/uninstall lifecycle key.
    LifecycleScript,
    /// Script command matching a dangerous-capability signature.
    DangerousCommand {
        /// Matched capability category.
        category: CommandCategory,
    },
    /// Package name is a near-miss of a popular package name.
    TyposquatSuspected {
        /// The popular name that matched.
        closest: String,
        /// Edit distance to it (1 or 2).
        distance: usize,
    },
    /// Manifest declares no repository.
    NoRepository,
    /// Manifest declares no author.
    NoAuthor,
    /// Manifest declares an explicitly empty maintainers list.
    NoMaintainers,
    /// Declared license is on the deny-list.
    DisallowedLicense {
        /// The denied license identifier.
        license: String,
    },
    /// No license declared at all.
    UnknownLicense,
    /// Declared-dependency count exceeds the policy limit.
    ManyDirectDependencies {
        /// Union count over all dependency kinds.
        count: usize,
    },
    /// package.json absent; manifest-driven checks could not run.
    ManifestMissing,
    /// External static-analysis tool reported this many findings.
    StaticAnalysisFindings {
        /// Finding count consumed from the tool.
        count: usize,
    },
    /// Signature verification ran and did not verify the target.
    SignatureUnverified,
}

impl FindingKind {
    /// True for hard credential-pattern kinds (as opposed to the
    /// entropy-only heuristic).
    #[must_use]
    pub fn is_credential_pattern(&self) -> bool {
        matches!(
            self,
            FindingKind::AwsAccessKey
                | FindingKind::AwsSecretKey
                | FindingKind::GithubToken
                | FindingKind::SlackToken
                | FindingKind::GoogleApiKey
                | FindingKind::PrivateKey
        )
    }
}

/// A single structured observation emitted by a detector. Immutable
/// once created; `evidence` holds a short redacted preview, never the
/// full matched value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// The detector that emitted this finding.
    pub detector: DetectorKind,
    /// What was observed.
    #[serde(flatten)]
    pub kind: FindingKind,
    /// File path, package path, or script key the finding refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Redacted/truncated snippet (first characters plus an ellipsis).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Finding {
    /// Creates a finding with no location or evidence.
    #[must_use]
    pub fn new(detector: DetectorKind, kind: FindingKind) -> Self {
        Self {
            detector,
            kind,
            location: None,
            evidence: None,
        }
    }

    /// Attaches a location.
    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attaches already-redacted evidence.
    #[must_use]
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}

/// A detector's complete output: capped score plus ordered findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorResult {
    /// Score in `[0, CAP_DETECTOR]`.
    pub score: u32,
    /// Findings in emission order.
    pub findings: Vec<Finding>,
}

impl DetectorResult {
    /// Builds a result, enforcing the per-detector score cap at the
    /// boundary.
    #[must_use]
    pub fn new(score: u32, findings: Vec<Finding>) -> Self {
        Self {
            score: score.min(CAP_DETECTOR),
            findings,
        }
    }

    /// A clean result: zero score, no findings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            score: 0,
            findings: Vec::new(),
        }
    }
}
