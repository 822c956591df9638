//! Configuration file discovery and threshold overrides.

#![allow(clippy::unwrap_used)]

use pakscan::entry_point::run_with_args_to;
use std::fs;

fn run_json(dir: &std::path::Path) -> (i32, serde_json::Value) {
    let mut out = Vec::new();
    let code = run_with_args_to(
        vec![
            dir.to_str().unwrap().to_owned(),
            "--format".to_owned(),
            "json".to_owned(),
            "--quiet".to_owned(),
        ],
        &mut out,
    )
    .unwrap();
    (code, serde_json::from_slice(&out).unwrap())
}

/// Lowered tier thresholds in .pakscan.toml shift the tier mapping for
/// the same findings.
#[test]
fn test_config_tier_thresholds_shift_mapping() {
    let dir = tempfile::tempdir().unwrap();
    // No lockfile: the dependencies detector scores exactly 1.
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "plain-pkg", "license": "MIT", "repository": "r", "author": "a"}"#,
    )
    .unwrap();

    let (_, report) = run_json(dir.path());
    assert_eq!(report["total"], 1);
    assert_eq!(report["tier"], "Low");

    fs::write(
        dir.path().join(".pakscan.toml"),
        "[pakscan]\ntier_medium = 1\ntier_high = 3\n",
    )
    .unwrap();

    let (_, report) = run_json(dir.path());
    assert_eq!(report["total"], 1);
    assert_eq!(report["tier"], "Medium");
}

/// A config-file fail_threshold gates the exit code without any CLI
/// flag.
#[test]
fn test_config_fail_threshold_gates_exit() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "plain-pkg", "license": "MIT", "repository": "r", "author": "a"}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(".pakscan.toml"),
        "[pakscan]\nfail_threshold = 1\n",
    )
    .unwrap();

    let (code, report) = run_json(dir.path());
    assert_eq!(report["total"], 1);
    assert_eq!(code, 1);
}

/// An extended deny-list from config catches licenses the defaults
/// allow.
#[test]
fn test_config_deny_list_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "plain-pkg", "license": "BUSL-1.1", "repository": "r", "author": "a"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("package-lock.json"), r#"{"packages": {}}"#).unwrap();

    let (_, report) = run_json(dir.path());
    assert_eq!(report["detectors"]["policy"]["score"], 0);

    fs::write(
        dir.path().join(".pakscan.toml"),
        "[pakscan]\ndeny_licenses = [\"BUSL-1.1\"]\n",
    )
    .unwrap();

    let (_, report) = run_json(dir.path());
    assert_eq!(report["detectors"]["policy"]["score"], 2);
    assert_eq!(
        report["detectors"]["policy"]["findings"][0]["kind"],
        "disallowed_license"
    );
}

/// Custom popular-package lists drive the typosquat reference set.
#[test]
fn test_config_popular_packages_override() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "internal-toolz", "license": "MIT", "repository": "r", "author": "a"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("package-lock.json"), r#"{"packages": {}}"#).unwrap();
    fs::write(
        dir.path().join(".pakscan.toml"),
        "[pakscan]\npopular_packages = [\"internal-tools\"]\n",
    )
    .unwrap();

    let (_, report) = run_json(dir.path());
    assert_eq!(report["detectors"]["typosquat"]["score"], 2);
    assert_eq!(
        report["detectors"]["typosquat"]["findings"][0]["kind"],
        "typosquat_suspected"
    );
    assert_eq!(
        report["detectors"]["typosquat"]["findings"][0]["closest"],
        "internal-tools"
    );
}
