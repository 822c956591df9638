use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for pakscan.
    pub pakscan: PakscanConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for pakscan. Every field is optional; unset
/// fields fall back to the built-in defaults in `constants`.
pub struct PakscanConfig {
    /// Total score at which a scan is tiered Medium.
    pub tier_medium: Option<u32>,
    /// Total score at which a scan is tiered High.
    pub tier_high: Option<u32>,
    /// Total score at or above which the process exits 1 (CI gate).
    /// Defaults to `tier_high`.
    pub fail_threshold: Option<u32>,
    /// Shannon entropy threshold (bits/char) for secret candidates.
    pub entropy_threshold: Option<f64>,
    /// Minimum length for an entropy candidate token.
    pub min_token_length: Option<usize>,
    /// Declared-dependency count above which policy flags the package.
    pub max_direct_dependencies: Option<usize>,
    /// Additional folders to prune from the secrets walk.
    pub exclude_folders: Option<Vec<String>>,
    /// License deny-list override.
    pub deny_licenses: Option<Vec<String>>,
    /// Popular package reference set override for typosquat checks.
    pub popular_packages: Option<Vec<String>>,
    /// Download retry attempt cap.
    pub retry_attempts: Option<u32>,
    /// Base retry backoff in milliseconds, doubled per attempt.
    pub backoff_ms: Option<u64>,
}
