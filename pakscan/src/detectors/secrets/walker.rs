use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanPolicy;

/// Enumerates size-bounded, non-binary files under a root. Directories
/// in the policy skip-set are pruned from traversal entirely; their
/// descendants are never visited. Files that cannot be stat'ed are
/// yielded anyway so the caller's read attempt can account for them.
/// The sequence is finite and not restartable; re-invoke for a fresh
/// pass.
pub fn walk_text_files<'a>(
    root: &Path,
    policy: &'a ScanPolicy,
) -> impl Iterator<Item = PathBuf> + 'a {
    let max_file_size = policy.max_file_size;
    WalkDir::new(root)
        .into_iter()
        .filter_entry(move |entry| {
            // Prune skip-set directories (prevents descent). The root
            // itself is always entered.
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !policy.exclude_folders.contains(name.as_ref())
        })
        .filter_map(std::result::Result::ok)
        .filter(move |entry| {
            if !entry.file_type().is_file() {
                return false;
            }
            if is_binary_extension(entry.path(), policy) {
                return false;
            }
            // Oversized files are skipped, not truncated-and-scanned.
            // Files whose size cannot be determined pass through; the
            // read attempt downstream counts them in the skip tally.
            match entry.metadata() {
                Ok(meta) => meta.len() <= max_file_size,
                Err(_) => true,
            }
        })
        .map(|entry| entry.path().to_path_buf())
}

fn is_binary_extension(path: &Path, policy: &ScanPolicy) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .is_some_and(|ext| policy.binary_extensions.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanPolicy;
    use std::fs;

    #[test]
    fn test_walk_prunes_skip_dirs_and_binary_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.js"), "ok").unwrap();
        fs::write(dir.path().join("logo.PNG"), [0u8; 4]).unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/dep.js"), "skip me").unwrap();

        let policy = ScanPolicy::default();
        let files: Vec<_> = walk_text_files(dir.path(), &policy).collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("index.js"));
    }

    #[test]
    fn test_walk_skips_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("small.txt"), "x").unwrap();
        fs::write(dir.path().join("big.txt"), vec![b'x'; 64]).unwrap();

        let mut policy = ScanPolicy::default();
        policy.max_file_size = 16;
        let files: Vec<_> = walk_text_files(dir.path(), &policy).collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.txt"));
    }
}
