//! Adapters around optional external tools.
//!
//! Both adapters are opt-in and degrade explicitly: a tool that is not
//! installed yields [`ToolOutcome::Unavailable`], which the report
//! records as such rather than silently dropping the detector.

pub mod cosign;
pub mod semgrep;

use crate::detectors::DetectorResult;

pub use cosign::verify_signature;
pub use semgrep::run_static_analysis;

/// Result of invoking one external tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The tool ran; its output was consumed into a detector result.
    Ran(DetectorResult),
    /// The tool binary was not found on this system.
    Unavailable,
}
