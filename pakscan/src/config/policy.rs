use anyhow::Result;
use rustc_hash::FxHashSet;
use std::time::Duration;

use crate::constants::{
    get_binary_extensions, get_default_deny_licenses, get_default_exclude_folders,
    get_default_popular_packages, get_lifecycle_script_keys, DEFAULT_BACKOFF_MS,
    DEFAULT_ENTROPY_THRESHOLD, DEFAULT_MAX_DIRECT_DEPENDENCIES, DEFAULT_RETRY_ATTEMPTS,
    DEFAULT_TIER_HIGH, DEFAULT_TIER_MEDIUM, MAX_FILE_SIZE, MIN_TOKEN_LENGTH,
};

use super::models::PakscanConfig;

/// Bounded retry with exponential backoff for the download collaborator.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum attempts per request (first try included).
    pub attempts: u32,
    /// Base delay before the second attempt; doubled per retry.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Delay before the given retry (0-based), or `None` once the
    /// attempt cap is reached.
    #[must_use]
    pub fn delay_for(self, retry: u32) -> Option<Duration> {
        if retry + 1 >= self.attempts {
            return None;
        }
        Some(self.backoff * 2_u32.saturating_pow(retry))
    }
}

/// Immutable reference data injected into every detector at
/// construction. Built once per scan; detectors never consult
/// process-wide state.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    /// Entropy threshold for secret candidates, bits/char.
    pub entropy_threshold: f64,
    /// Minimum entropy-candidate token length.
    pub min_token_length: usize,
    /// Per-file size cap for the secrets walk; larger files are skipped.
    pub max_file_size: u64,
    /// Directory names pruned from traversal.
    pub exclude_folders: FxHashSet<String>,
    /// Extensions (lowercase, with dot) excluded from text scanning.
    pub binary_extensions: FxHashSet<String>,
    /// Lifecycle-sensitive script keys.
    pub lifecycle_keys: FxHashSet<String>,
    /// Denied license identifiers.
    pub deny_licenses: Vec<String>,
    /// Popular package names used as the typosquat reference set.
    pub popular_packages: Vec<String>,
    /// Declared-dependency count policy limit.
    pub max_direct_dependencies: usize,
    /// Total score at which the tier becomes Medium.
    pub tier_medium: u32,
    /// Total score at which the tier becomes High.
    pub tier_high: u32,
    /// Total score at or above which the scan exit code is 1.
    pub fail_threshold: u32,
    /// Retry policy for network collaborators.
    pub retry: RetryPolicy,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            min_token_length: MIN_TOKEN_LENGTH,
            max_file_size: MAX_FILE_SIZE,
            exclude_folders: get_default_exclude_folders()
                .iter()
                .map(|&s| s.to_owned())
                .collect(),
            binary_extensions: get_binary_extensions()
                .iter()
                .map(|&s| s.to_owned())
                .collect(),
            lifecycle_keys: get_lifecycle_script_keys()
                .iter()
                .map(|&s| s.to_owned())
                .collect(),
            deny_licenses: get_default_deny_licenses()
                .iter()
                .map(|&s| s.to_owned())
                .collect(),
            popular_packages: get_default_popular_packages()
                .iter()
                .map(|&s| s.to_owned())
                .collect(),
            max_direct_dependencies: DEFAULT_MAX_DIRECT_DEPENDENCIES,
            tier_medium: DEFAULT_TIER_MEDIUM,
            tier_high: DEFAULT_TIER_HIGH,
            fail_threshold: DEFAULT_TIER_HIGH,
            retry: RetryPolicy {
                attempts: DEFAULT_RETRY_ATTEMPTS,
                backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            },
        }
    }
}

impl ScanPolicy {
    /// Builds a policy from file configuration, leaving unset fields at
    /// their defaults.
    #[must_use]
    pub fn from_config(config: &PakscanConfig) -> Self {
        let mut policy = Self::default();

        if let Some(v) = config.entropy_threshold {
            policy.entropy_threshold = v;
        }
        if let Some(v) = config.min_token_length {
            policy.min_token_length = v;
        }
        if let Some(v) = config.max_direct_dependencies {
            policy.max_direct_dependencies = v;
        }
        if let Some(ref folders) = config.exclude_folders {
            policy
                .exclude_folders
                .extend(folders.iter().cloned());
        }
        if let Some(ref licenses) = config.deny_licenses {
            policy.deny_licenses = licenses.clone();
        }
        if let Some(ref packages) = config.popular_packages {
            policy.popular_packages = packages.clone();
        }
        if let Some(v) = config.tier_medium {
            policy.tier_medium = v;
        }
        if let Some(v) = config.tier_high {
            policy.tier_high = v;
        }
        policy.fail_threshold = config.fail_threshold.unwrap_or(policy.tier_high);
        if let Some(v) = config.retry_attempts {
            policy.retry.attempts = v;
        }
        if let Some(v) = config.backoff_ms {
            policy.retry.backoff = Duration::from_millis(v);
        }

        policy
    }

    /// Validates operator-supplied values. Violations are fatal
    /// configuration errors, reported before any scan work begins.
    pub fn validate(&self) -> Result<()> {
        if self.tier_medium > self.tier_high {
            anyhow::bail!(
                "invalid tier thresholds: tier_medium ({}) exceeds tier_high ({})",
                self.tier_medium,
                self.tier_high
            );
        }
        if self.retry.attempts == 0 {
            anyhow::bail!("retry_attempts must be at least 1");
        }
        if self.min_token_length == 0 {
            anyhow::bail!("min_token_length must be at least 1");
        }
        Ok(())
    }
}
