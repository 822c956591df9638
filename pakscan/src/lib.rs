//! pakscan: offline heuristic risk triage for npm packages.
//!
//! A scan runs a set of independent detectors over a package root
//! (leaked-credential patterns and entropy, typosquat name matching,
//! lockfile and install-script inspection, license policy) plus optional
//! external tool adapters, and aggregates the bounded per-detector
//! scores into a single risk score and tier.
//!
//! Detectors are pure with respect to each other: each one receives the
//! package root (or an already-parsed manifest structure) and a
//! [`config::ScanPolicy`], and returns a complete
//! [`detectors::DetectorResult`] on its own. There is no cross-detector
//! ordering or shared mutable state.

use std::sync::atomic::AtomicBool;

pub mod cli;
pub mod config;
pub mod constants;
pub mod detectors;
pub mod entry_point;
pub mod external;
pub mod fetch;
pub mod manifest;
pub mod output;
pub mod report;
pub mod scanner;
pub mod utils;

/// Set when the user interrupts a scan (Ctrl-C). Checked at file
/// boundaries so an abandoned scan never leaves partial state behind.
pub static CANCELLED: AtomicBool = AtomicBool::new(false);

pub use detectors::{DetectorKind, DetectorResult, Finding, FindingKind, CAP_DETECTOR};
pub use report::{RiskReport, RiskTier};
pub use scanner::Scanner;
