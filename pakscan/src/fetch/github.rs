//! GitHub default-branch archive download.

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;
use zip::ZipArchive;

use crate::config::RetryPolicy;

use super::http;
use super::FetchedPackage;

/// Default-branch names tried in order; the branch cannot be known
/// without an API call, so resolution falls back across candidates.
const BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

/// Fetches a repository's default-branch archive and extracts it.
pub fn fetch(owner: &str, repo: &str, retry: RetryPolicy) -> Result<FetchedPackage> {
    let agent = http::agent();

    let mut last_err = None;
    for branch in BRANCH_CANDIDATES {
        let url = format!("https://github.com/{owner}/{repo}/archive/refs/heads/{branch}.zip");
        match http::get_with_retry(&agent, &url, retry) {
            Ok(bytes) => return extract(&bytes, owner, repo),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow!("no branch candidates for {owner}/{repo}")))
}

/// Unzips the archive and returns its single top-level directory
/// (GitHub archives root everything under `<repo>-<branch>/`).
fn extract(bytes: &[u8], owner: &str, repo: &str) -> Result<FetchedPackage> {
    let temp = TempDir::new().context("failed creating extraction directory")?;
    ZipArchive::new(Cursor::new(bytes))
        .and_then(|mut archive| archive.extract(temp.path()))
        .with_context(|| format!("failed extracting archive for {owner}/{repo}"))?;

    let mut entries = fs::read_dir(temp.path()).context("failed reading extraction directory")?;
    let first = entries
        .next()
        .transpose()
        .context("failed reading extraction directory")?;
    let Some(first) = first else {
        bail!("archive for {owner}/{repo} contained no files");
    };

    let root = if first.path().is_dir() {
        first.path()
    } else {
        temp.path().to_path_buf()
    };
    Ok(FetchedPackage::extracted(root, temp))
}
