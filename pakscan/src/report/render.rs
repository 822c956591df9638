//! Styled terminal rendering of a risk report.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use std::io::Write;

use crate::detectors::{DetectorKind, FindingKind};

use super::{DetectorStatus, RiskReport, RiskTier};

fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);

    if cfg!(test) {
        table.set_width(120);
    }
    table
}

fn styled_tier(tier: RiskTier) -> colored::ColoredString {
    let text = tier.to_string();
    match tier {
        RiskTier::High => text.red().bold(),
        RiskTier::Medium => text.yellow().bold(),
        RiskTier::Low => text.green().bold(),
    }
}

/// Short human-readable description of a finding kind.
#[must_use]
pub fn describe(kind: &FindingKind) -> String {
    match kind {
        FindingKind::AwsAccessKey => "AWS access key".to_owned(),
        FindingKind::AwsSecretKey => "AWS secret key assignment".to_owned(),
        FindingKind::GithubToken => "GitHub personal access token".to_owned(),
        FindingKind::SlackToken => "Slack token".to_owned(),
        FindingKind::GoogleApiKey => "Google API key".to_owned(),
        FindingKind::PrivateKey => "Private key material".to_owned(),
        FindingKind::HighEntropyToken => "High-entropy token".to_owned(),
        FindingKind::GitDependency => "Dependency resolved from a git URL".to_owned(),
        FindingKind::UrlDependency => "Dependency resolved from a raw URL".to_owned(),
        FindingKind::MissingIntegrity => "Dependency without integrity metadata".to_owned(),
        FindingKind::NoLockfile => "No lockfile present".to_owned(),
        FindingKind::LifecycleScript => "Lifecycle install script".to_owned(),
        FindingKind::DangerousCommand { category } => {
            format!("Dangerous command capability: {category}")
        }
        FindingKind::TyposquatSuspected { closest, distance } => {
            format!("Name is {distance} edit(s) from popular package `{closest}`")
        }
        FindingKind::NoRepository => "No repository declared".to_owned(),
        FindingKind::NoAuthor => "No author declared".to_owned(),
        FindingKind::NoMaintainers => "Maintainers list is empty".to_owned(),
        FindingKind::DisallowedLicense { license } => {
            format!("License `{license}` is on the deny-list")
        }
        FindingKind::UnknownLicense => "No license declared".to_owned(),
        FindingKind::ManyDirectDependencies { count } => {
            format!("{count} declared dependencies")
        }
        FindingKind::ManifestMissing => "package.json missing or malformed".to_owned(),
        FindingKind::StaticAnalysisFindings { count } => {
            format!("Static analysis reported {count} finding(s)")
        }
        FindingKind::SignatureUnverified => "Signature could not be verified".to_owned(),
    }
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Package Risk Scan Results             ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print per-detector score lines.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_scores(writer: &mut impl Write, report: &RiskReport) -> std::io::Result<()> {
    for kind in DetectorKind::ALL {
        let Some(slot) = report.detectors.get(kind.name()) else {
            continue;
        };
        let value = match slot.status {
            DetectorStatus::Completed if slot.score == 0 => slot.score.to_string().green(),
            DetectorStatus::Completed => slot.score.to_string().red().bold(),
            DetectorStatus::NotApplicable => "n/a".dimmed(),
            DetectorStatus::ToolUnavailable => "tool unavailable".yellow(),
        };
        writeln!(writer, "  {:<16} {value}", kind.name())?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Print the findings table, if any.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(writer: &mut impl Write, report: &RiskReport) -> std::io::Result<()> {
    let findings = report.all_findings();
    if findings.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", "Findings".bold().underline())?;
    let mut table = create_table(vec!["Detector", "Finding", "Location", "Evidence"]);
    for finding in findings {
        table.add_row(vec![
            Cell::new(finding.detector.name()).add_attribute(Attribute::Dim),
            Cell::new(describe(&finding.kind)).add_attribute(Attribute::Bold),
            Cell::new(finding.location.as_deref().unwrap_or("-")),
            Cell::new(finding.evidence.as_deref().unwrap_or("-")),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the full styled report.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, report: &RiskReport) -> std::io::Result<()> {
    print_header(writer)?;
    writeln!(writer, "Target: {}", report.target.bold())?;
    writeln!(
        writer,
        "{}",
        format!(
            "Scanned {} files ({} skipped)",
            report.files_scanned, report.files_skipped
        )
        .dimmed()
    )?;
    writeln!(writer)?;

    print_scores(writer, report)?;
    print_findings(writer, report)?;

    writeln!(
        writer,
        "Total risk score: {}  Tier: {}",
        report.total.to_string().bold(),
        styled_tier(report.tier)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanPolicy;
    use crate::report::ReportBuilder;

    #[test]
    fn test_render_smoke() {
        let policy = ScanPolicy::default();
        let report = ReportBuilder::new("fixture").finish(&policy);

        let mut out = Vec::new();
        print_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("fixture"));
        assert!(text.contains("Total risk score"));
    }

    #[test]
    fn test_describe_carries_context() {
        let described = describe(&FindingKind::TyposquatSuspected {
            closest: "express".to_owned(),
            distance: 1,
        });
        assert!(described.contains("express"));
        assert!(described.contains('1'));
    }
}
