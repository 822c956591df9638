//! Typed parse boundary for package manifests and lockfiles.
//!
//! All duck-typed probing of the raw JSON happens here, once. Detectors
//! downstream only ever see well-typed structures with defined
//! defaults. Missing or malformed files degrade to an explicit
//! [`ParseOutcome`] variant, never a hard failure; the scan must
//! always be able to proceed.

use rustc_hash::FxHashSet;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Lockfile names probed in order.
const LOCKFILE_CANDIDATES: [&str; 2] = ["package-lock.json", "npm-shrinkwrap.json"];

/// Outcome of one file/parse attempt. Suppression of bad input is
/// deliberate but explicit: callers decide what absence means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    /// The file existed and parsed.
    Parsed(T),
    /// The file does not exist.
    Missing,
    /// The file exists but could not be interpreted, either invalid
    /// JSON or JSON without the expected structure.
    Malformed,
}

impl<T> ParseOutcome<T> {
    /// The parsed value, if any.
    pub fn as_parsed(&self) -> Option<&T> {
        match self {
            ParseOutcome::Parsed(v) => Some(v),
            _ => None,
        }
    }

    fn map_parsed<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(v) => ParseOutcome::Parsed(f(v)),
            ParseOutcome::Missing => ParseOutcome::Missing,
            ParseOutcome::Malformed => ParseOutcome::Malformed,
        }
    }
}

/// The manifest fields the detectors consume, extracted leniently from
/// package.json.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    /// Declared package name, empty if absent.
    pub name: String,
    /// Declared version.
    pub version: Option<String>,
    /// Declared license, from either the string form or the object
    /// form's `type`/`name` field.
    pub license: Option<String>,
    /// Union count of all declared dependency kinds
    /// (direct, dev, peer, optional), deduplicated by name.
    pub dependency_count: usize,
    /// Declared script map; non-string commands are dropped.
    pub scripts: BTreeMap<String, String>,
    /// Whether a repository field is declared and non-empty.
    pub has_repository: bool,
    /// Whether an author field is declared and non-empty.
    pub has_author: bool,
    /// True when `maintainers` is declared as an explicitly empty list.
    pub empty_maintainers: bool,
}

impl Manifest {
    /// Reads and parses `package.json` under the given root.
    #[must_use]
    pub fn read(root: &Path) -> ParseOutcome<Manifest> {
        read_json(&root.join("package.json")).map_parsed(|value| Self::from_value(&value))
    }

    /// Extracts the typed manifest from a raw JSON value.
    #[must_use]
    pub fn from_value(value: &Value) -> Manifest {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_owned();

        let version = value
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let license = extract_license(value.get("license"));

        let mut dependency_names: FxHashSet<String> = FxHashSet::default();
        for key in [
            "dependencies",
            "devDependencies",
            "peerDependencies",
            "optionalDependencies",
        ] {
            if let Some(map) = value.get(key).and_then(Value::as_object) {
                dependency_names.extend(map.keys().cloned());
            }
        }

        let scripts = value
            .get("scripts")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|cmd| (k.clone(), cmd.to_owned())))
                    .collect()
            })
            .unwrap_or_default();

        let has_repository = value.get("repository").is_some_and(is_nonempty);
        let has_author = value.get("author").is_some_and(is_nonempty);
        let empty_maintainers = value
            .get("maintainers")
            .and_then(Value::as_array)
            .is_some_and(Vec::is_empty);

        Manifest {
            name,
            version,
            license,
            dependency_count: dependency_names.len(),
            scripts,
            has_repository,
            has_author,
            empty_maintainers,
        }
    }
}

/// One normalized dependency-lock entry. Both lockfile shapes (flat
/// v2/v3 "packages" map, nested v1 "dependencies" tree) collapse into
/// this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    /// Qualified package path; nesting is `/`-joined (`a/b`).
    pub name: String,
    /// Resolution URL, if recorded.
    pub resolved: Option<String>,
    /// Whether integrity metadata is present.
    pub has_integrity: bool,
}

/// A normalized lockfile: a flat sequence of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lockfile {
    /// Normalized entries in walk order.
    pub entries: Vec<DependencyEntry>,
}

impl Lockfile {
    /// Probes the known lockfile names under the root and parses the
    /// first that exists.
    #[must_use]
    pub fn read(root: &Path) -> ParseOutcome<Lockfile> {
        for candidate in LOCKFILE_CANDIDATES {
            let path = root.join(candidate);
            if path.exists() {
                return match read_json(&path) {
                    ParseOutcome::Parsed(value) => Self::from_value(&value)
                        .map_or(ParseOutcome::Malformed, ParseOutcome::Parsed),
                    ParseOutcome::Missing => ParseOutcome::Missing,
                    ParseOutcome::Malformed => ParseOutcome::Malformed,
                };
            }
        }
        ParseOutcome::Missing
    }

    /// Normalizes a raw lockfile JSON value into flat entries. Returns
    /// `None` when the value carries neither lockfile shape; an
    /// arbitrary JSON document is not a lockfile that happens to pin
    /// nothing. A present-but-empty `packages` or `dependencies` map
    /// is a real lockfile with zero entries.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Lockfile> {
        // npm v2/v3: flat map keyed by package path.
        if let Some(packages) = value.get("packages").and_then(Value::as_object) {
            let entries = packages
                .iter()
                .filter(|(key, _)| !key.is_empty()) // root entry describes the package itself
                .filter_map(|(key, meta)| {
                    meta.as_object().map(|meta| DependencyEntry {
                        name: normalize_flat_key(key),
                        resolved: meta.get("resolved").and_then(Value::as_str).map(str::to_owned),
                        has_integrity: has_integrity(meta.get("integrity")),
                    })
                })
                .collect();
            return Some(Lockfile { entries });
        }

        // npm v1: recursive tree under "dependencies". Walked with an
        // explicit stack so arbitrarily deep trees cannot overflow the
        // call stack.
        let root_deps = value.get("dependencies").and_then(Value::as_object)?;
        let mut entries = Vec::new();
        let mut stack = vec![(String::new(), root_deps)];
        while let Some((prefix, tree)) = stack.pop() {
            for (pkg, meta) in tree {
                let Some(meta) = meta.as_object() else {
                    continue;
                };
                let name = format!("{prefix}{pkg}");
                entries.push(DependencyEntry {
                    name: name.clone(),
                    resolved: meta.get("resolved").and_then(Value::as_str).map(str::to_owned),
                    has_integrity: has_integrity(meta.get("integrity")),
                });
                if let Some(nested) = meta.get("dependencies").and_then(Value::as_object) {
                    stack.push((format!("{name}/"), nested));
                }
            }
        }
        Some(Lockfile { entries })
    }
}

fn read_json(path: &Path) -> ParseOutcome<Value> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(value) => ParseOutcome::Parsed(value),
            Err(_) => ParseOutcome::Malformed,
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ParseOutcome::Missing,
        Err(_) => ParseOutcome::Malformed,
    }
}

fn extract_license(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Object(map) => map
            .get("type")
            .or_else(|| map.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

fn is_nonempty(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Null => false,
        _ => true,
    }
}

fn has_integrity(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// Flat lockfile keys embed install paths
/// (`node_modules/a/node_modules/b`); strip the `node_modules`
/// segments so both shapes yield the same `a/b` naming.
fn normalize_flat_key(key: &str) -> String {
    key.strip_prefix("node_modules/")
        .unwrap_or(key)
        .replace("/node_modules/", "/")
}
