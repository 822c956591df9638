//! Risk aggregation and report rendering.

pub mod aggregate;
pub mod json;
pub mod markdown;
pub mod render;

pub use aggregate::{DetectorReport, DetectorStatus, ReportBuilder, RiskReport, RiskTier};
