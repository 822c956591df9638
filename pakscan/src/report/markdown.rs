//! Markdown rendering, for persisting scan results alongside a repo.

use std::io::Write;

use crate::detectors::DetectorKind;

use super::render::describe;
use super::{DetectorStatus, RiskReport, RiskTier};

/// Writes the report as a markdown document.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, report: &RiskReport) -> std::io::Result<()> {
    writeln!(writer, "# Package Risk Scan Report")?;
    writeln!(writer)?;
    writeln!(writer, "**Target:** `{}`", report.target)?;
    writeln!(writer, "**Date:** {}", report.generated_at)?;
    writeln!(writer)?;

    writeln!(writer, "## Summary")?;
    writeln!(writer)?;
    for kind in DetectorKind::ALL {
        let Some(slot) = report.detectors.get(kind.name()) else {
            continue;
        };
        let value = match slot.status {
            DetectorStatus::Completed => format!("`{}`", slot.score),
            DetectorStatus::NotApplicable => "not applicable".to_owned(),
            DetectorStatus::ToolUnavailable => "tool unavailable".to_owned(),
        };
        writeln!(writer, "- {}: {value}", kind.name())?;
    }
    writeln!(writer, "- Total: `{}`", report.total)?;
    writeln!(writer)?;

    writeln!(writer, "## Findings")?;
    writeln!(writer)?;
    let findings = report.all_findings();
    if findings.is_empty() {
        writeln!(writer, "None")?;
    } else {
        for finding in findings {
            match finding.location.as_deref() {
                Some(location) => writeln!(
                    writer,
                    "- [{}] {} ({location})",
                    finding.detector.name(),
                    describe(&finding.kind)
                )?,
                None => writeln!(
                    writer,
                    "- [{}] {}",
                    finding.detector.name(),
                    describe(&finding.kind)
                )?,
            }
        }
    }
    writeln!(writer)?;

    writeln!(writer, "## Risk Evaluation")?;
    writeln!(writer)?;
    let verdict = match report.tier {
        RiskTier::High => "**HIGH RISK**: proceed with extreme caution.",
        RiskTier::Medium => "**MODERATE RISK**: review carefully before use.",
        RiskTier::Low => "**LOW RISK**: no major threats detected.",
    };
    writeln!(writer, "{verdict}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanPolicy;
    use crate::detectors::{DetectorKind, DetectorResult, Finding, FindingKind};
    use crate::report::{DetectorReport, ReportBuilder};

    #[test]
    fn test_markdown_sections() {
        let policy = ScanPolicy::default();
        let mut builder = ReportBuilder::new("fixture");
        builder.record(
            DetectorKind::Policy,
            DetectorReport::completed(DetectorResult::new(
                1,
                vec![Finding::new(DetectorKind::Policy, FindingKind::UnknownLicense)],
            )),
        );
        let report = builder.finish(&policy);

        let mut out = Vec::new();
        print_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("# Package Risk Scan Report"));
        assert!(text.contains("- policy: `1`"));
        assert!(text.contains("No license declared"));
        assert!(text.contains("**LOW RISK**"));
    }
}
