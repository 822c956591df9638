//! Numeric limits and default thresholds.

/// Every detector's score is capped here, enforced at the detector
/// boundary. The aggregate total is intentionally uncapped.
pub const CAP_DETECTOR: u32 = 5;

/// Files larger than this are skipped outright, not truncated-and-scanned.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Minimum length for an entropy candidate token.
pub const MIN_TOKEN_LENGTH: usize = 20;

/// Shannon entropy threshold (bits/char) above which a candidate token
/// is treated as likely secret material. Base64/hex key material
/// clusters above this, natural-language identifiers below it. This is
/// tuning configuration, not a derived value.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 3.5;

/// Declared-dependency count above which the policy detector flags the
/// package.
pub const DEFAULT_MAX_DIRECT_DEPENDENCIES: usize = 30;

/// Default risk-tier thresholds: total >= medium is Medium,
/// total >= high is High.
pub const DEFAULT_TIER_MEDIUM: u32 = 4;
/// See [`DEFAULT_TIER_MEDIUM`].
pub const DEFAULT_TIER_HIGH: u32 = 7;

/// Download retry defaults; both are overridable in `[pakscan]` config.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Base backoff between retries, doubled per attempt.
pub const DEFAULT_BACKOFF_MS: u64 = 500;

/// Project-local configuration file name.
pub const CONFIG_FILENAME: &str = ".pakscan.toml";
