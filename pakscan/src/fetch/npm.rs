//! npm registry download: metadata, latest tarball, extraction.

use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;
use serde_json::Value;
use tar::Archive;
use tempfile::TempDir;

use crate::config::RetryPolicy;

use super::http;
use super::FetchedPackage;

const REGISTRY_BASE: &str = "https://registry.npmjs.org";

/// Fetches the latest published version of a package and extracts it.
pub fn fetch(name: &str, retry: RetryPolicy) -> Result<FetchedPackage> {
    let agent = http::agent();

    let metadata_url = format!("{REGISTRY_BASE}/{name}");
    let metadata = http::get_with_retry(&agent, &metadata_url, retry)
        .with_context(|| format!("failed fetching registry metadata for `{name}`"))?;
    let metadata: Value = serde_json::from_slice(&metadata)
        .with_context(|| format!("registry metadata for `{name}` is not valid JSON"))?;

    let tarball_url = tarball_url(&metadata)
        .ok_or_else(|| anyhow!("registry metadata for `{name}` has no latest tarball"))?;

    let tarball = http::get_with_retry(&agent, tarball_url, retry)
        .with_context(|| format!("failed downloading tarball for `{name}`"))?;

    let temp = TempDir::new().context("failed creating extraction directory")?;
    Archive::new(GzDecoder::new(tarball.as_slice()))
        .unpack(temp.path())
        .with_context(|| format!("failed extracting tarball for `{name}`"))?;

    // Registry tarballs conventionally root everything under package/.
    let package_dir = temp.path().join("package");
    let root = if package_dir.is_dir() {
        package_dir
    } else {
        temp.path().to_path_buf()
    };
    Ok(FetchedPackage::extracted(root, temp))
}

/// Resolves dist-tags.latest, then that version's dist.tarball.
fn tarball_url(metadata: &Value) -> Option<&str> {
    let latest = metadata.get("dist-tags")?.get("latest")?.as_str()?;
    metadata
        .get("versions")?
        .get(latest)?
        .get("dist")?
        .get("tarball")?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tarball_url_follows_latest_tag() {
        let metadata = json!({
            "dist-tags": {"latest": "2.0.0"},
            "versions": {
                "1.0.0": {"dist": {"tarball": "https://registry.npmjs.org/x/-/x-1.0.0.tgz"}},
                "2.0.0": {"dist": {"tarball": "https://registry.npmjs.org/x/-/x-2.0.0.tgz"}}
            }
        });
        assert_eq!(
            tarball_url(&metadata),
            Some("https://registry.npmjs.org/x/-/x-2.0.0.tgz")
        );
    }

    #[test]
    fn test_tarball_url_missing_pieces() {
        assert_eq!(tarball_url(&json!({})), None);
        assert_eq!(
            tarball_url(&json!({"dist-tags": {"latest": "9.9.9"}, "versions": {}})),
            None
        );
    }
}
