//! Machine-readable JSON rendering.

use anyhow::{Context, Result};
use std::io::Write;

use super::RiskReport;

/// Writes the report as pretty-printed JSON.
pub fn print_report(writer: &mut impl Write, report: &RiskReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report).context("failed serializing report")?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanPolicy;
    use crate::detectors::{DetectorKind, DetectorResult, Finding, FindingKind};
    use crate::report::{DetectorReport, ReportBuilder};

    #[test]
    fn test_json_shape() {
        let policy = ScanPolicy::default();
        let mut builder = ReportBuilder::new("npm:left-pad");
        builder.record(
            DetectorKind::Secrets,
            DetectorReport::completed(DetectorResult::new(
                3,
                vec![
                    Finding::new(DetectorKind::Secrets, FindingKind::AwsAccessKey)
                        .at("index.js")
                        .with_evidence("AKIAIOSF\u{2026}"),
                ],
            )),
        );
        let report = builder.finish(&policy);

        let mut out = Vec::new();
        print_report(&mut out, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["target"], "npm:left-pad");
        assert_eq!(value["detectors"]["secrets"]["score"], 3);
        assert_eq!(
            value["detectors"]["secrets"]["findings"][0]["kind"],
            "aws_access_key"
        );
        assert_eq!(value["detectors"]["signature"]["status"], "not_applicable");
        assert_eq!(value["total"], 3);
        assert_eq!(value["tier"], "Low");
    }
}
