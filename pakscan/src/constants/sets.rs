use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Returns directories pruned from traversal entirely; descendants are
/// never visited.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut set = FxHashSet::default();
        for folder in [".git", ".svn", ".hg", "node_modules", "dist", "build", "out"] {
            set.insert(folder);
        }
        set
    })
}

/// Returns file extensions (lowercase, with dot) excluded from text scanning.
pub fn get_binary_extensions() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut set = FxHashSet::default();
        for ext in [
            ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".pdf", ".zip", ".gz", ".tgz",
            ".xz", ".7z", ".jar", ".exe", ".dll",
        ] {
            set.insert(ext);
        }
        set
    })
}

/// Returns manifest script keys that package managers run automatically
/// at install/uninstall time.
pub fn get_lifecycle_script_keys() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut set = FxHashSet::default();
        for key in [
            "preinstall",
            "install",
            "postinstall",
            "preuninstall",
            "postuninstall",
        ] {
            set.insert(key);
        }
        set
    })
}

/// Returns licenses rejected by the default policy.
pub fn get_default_deny_licenses() -> &'static [&'static str] {
    static LIST: OnceLock<Vec<&'static str>> = OnceLock::new();
    LIST.get_or_init(|| vec!["GPL-3.0", "AGPL-3.0", "SSPL-1.0"])
}

/// Returns the default reference set of popular package names used for
/// typosquat distance checks.
pub fn get_default_popular_packages() -> &'static [&'static str] {
    static LIST: OnceLock<Vec<&'static str>> = OnceLock::new();
    LIST.get_or_init(|| {
        vec![
            "react",
            "lodash",
            "axios",
            "express",
            "vue",
            "next",
            "typescript",
            "webpack",
            "jest",
            "rxjs",
            "eslint",
            "prettier",
            "moment",
        ]
    })
}
