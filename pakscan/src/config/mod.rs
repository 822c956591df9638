//! Configuration loading and the injected scan policy.

mod loader;
mod models;
mod policy;

use std::path::Path;

pub use models::{Config, PakscanConfig};
pub use policy::{RetryPolicy, ScanPolicy};

impl Config {
    /// Loads configuration from default locations (`.pakscan.toml` in
    /// the current directory or an ancestor).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        loader::load_from_path(path)
    }
}
