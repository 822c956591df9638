//! Fixed reference tables and tuning constants.
//!
//! Tunable values are *defaults*: detectors receive them through an
//! injected [`crate::config::ScanPolicy`]. Only the compiled signature
//! tables, which are not configurable, are read directly.

mod limits;
mod regexes;
mod sets;

pub use limits::{
    CAP_DETECTOR, CONFIG_FILENAME, DEFAULT_BACKOFF_MS, DEFAULT_ENTROPY_THRESHOLD,
    DEFAULT_MAX_DIRECT_DEPENDENCIES, DEFAULT_RETRY_ATTEMPTS, DEFAULT_TIER_HIGH,
    DEFAULT_TIER_MEDIUM, MAX_FILE_SIZE, MIN_TOKEN_LENGTH,
};
pub use regexes::{
    get_command_signatures, get_secret_signatures, token_candidate_re, CommandSignature,
    SecretSignature,
};
pub use sets::{
    get_binary_extensions, get_default_deny_licenses, get_default_exclude_folders,
    get_default_popular_packages, get_lifecycle_script_keys,
};
