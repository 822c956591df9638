//! Archive acquisition for remote targets.
//!
//! Resolves a target identifier to a readable local directory. Remote
//! sources land in a temp directory owned by the returned handle; the
//! extracted tree lives exactly as long as the handle does.

pub mod github;
pub mod http;
pub mod npm;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::ScanPolicy;

/// What the positional target argument resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// An existing local directory.
    Local(PathBuf),
    /// A published npm package, fetched from the registry.
    Npm(String),
    /// A GitHub repository default-branch archive.
    Github {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
    },
}

impl ScanTarget {
    /// Parses the raw target string. `npm:` and `github:` prefixes
    /// select remote sources; anything else is a local path.
    pub fn parse(raw: &str) -> Result<ScanTarget> {
        if let Some(name) = raw.strip_prefix("npm:") {
            if name.is_empty() {
                bail!("npm target is missing a package name");
            }
            return Ok(ScanTarget::Npm(name.to_owned()));
        }
        if let Some(path) = raw.strip_prefix("github:") {
            let Some((owner, repo)) = path.split_once('/') else {
                bail!("github target must be owner/repo, got `{path}`");
            };
            if owner.is_empty() || repo.is_empty() {
                bail!("github target must be owner/repo, got `{path}`");
            }
            return Ok(ScanTarget::Github {
                owner: owner.to_owned(),
                repo: repo.to_owned(),
            });
        }
        Ok(ScanTarget::Local(PathBuf::from(raw)))
    }

    /// Whether this target came from a remote source. Signature
    /// verification only applies to remote targets.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !matches!(self, ScanTarget::Local(_))
    }

    /// Stable identifier for reports and signature verification.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            ScanTarget::Local(path) => path.display().to_string(),
            ScanTarget::Npm(name) => format!("npm:{name}"),
            ScanTarget::Github { owner, repo } => format!("github:{owner}/{repo}"),
        }
    }
}

/// A resolved, readable package tree. For remote sources the backing
/// temp directory is dropped (and deleted) with this handle.
#[derive(Debug)]
pub struct FetchedPackage {
    root: PathBuf,
    _temp: Option<TempDir>,
}

impl FetchedPackage {
    pub(crate) fn local(root: PathBuf) -> Self {
        Self { root, _temp: None }
    }

    pub(crate) fn extracted(root: PathBuf, temp: TempDir) -> Self {
        Self {
            root,
            _temp: Some(temp),
        }
    }

    /// The package root to scan.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Resolves a target to a local package tree, downloading if needed.
pub fn resolve(target: &ScanTarget, policy: &ScanPolicy) -> Result<FetchedPackage> {
    match target {
        ScanTarget::Local(path) => {
            if !path.is_dir() {
                bail!("target directory does not exist: {}", path.display());
            }
            Ok(FetchedPackage::local(path.clone()))
        }
        ScanTarget::Npm(name) => npm::fetch(name, policy.retry),
        ScanTarget::Github { owner, repo } => github::fetch(owner, repo, policy.retry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_npm_target() {
        assert_eq!(
            ScanTarget::parse("npm:left-pad").unwrap(),
            ScanTarget::Npm("left-pad".to_owned())
        );
    }

    #[test]
    fn test_parse_github_target() {
        let target = ScanTarget::parse("github:octo/repo").unwrap();
        assert_eq!(
            target,
            ScanTarget::Github {
                owner: "octo".to_owned(),
                repo: "repo".to_owned(),
            }
        );
        assert!(target.is_remote());
        assert_eq!(target.identifier(), "github:octo/repo");
    }

    #[test]
    fn test_parse_local_path_default() {
        let target = ScanTarget::parse("./some/dir").unwrap();
        assert!(matches!(target, ScanTarget::Local(_)));
        assert!(!target.is_remote());
    }

    #[test]
    fn test_parse_rejects_malformed_remote_targets() {
        assert!(ScanTarget::parse("npm:").is_err());
        assert!(ScanTarget::parse("github:no-slash").is_err());
        assert!(ScanTarget::parse("github:/repo").is_err());
    }
}
