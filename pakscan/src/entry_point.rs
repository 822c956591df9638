//! Program entry: argument parsing, configuration, scan, rendering,
//! exit-code mapping.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, ScanPolicy};
use crate::fetch::{self, ScanTarget};
use crate::output::create_spinner;
use crate::report::{json, markdown, render, RiskReport};
use crate::scanner::Scanner;

/// Exit code for invalid invocation or invalid configuration.
const EXIT_USAGE: i32 = 2;

/// Runs the scanner with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error if the scan itself fails (download or I/O), not for
/// invalid invocation, which maps to an exit code.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run pakscan with the given arguments, writing output to the
/// specified writer.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error if the scan itself fails (download or I/O).
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["pakscan".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(EXIT_USAGE);
                }
            }
        }
    };

    install_cancel_handler();

    let raw_target = cli.target.as_deref().unwrap_or(".");
    let target = match parse_target(raw_target, cli.download) {
        Ok(target) => target,
        Err(err) => {
            eprintln!("Error: {err}");
            return Ok(EXIT_USAGE);
        }
    };

    let config_start = match &target {
        ScanTarget::Local(path) => path.clone(),
        _ => Path::new(".").to_path_buf(),
    };
    let config = Config::load_from_path(&config_start);

    let mut policy = ScanPolicy::from_config(&config.pakscan);
    policy.exclude_folders.extend(cli.exclude_folders.iter().cloned());
    if let Some(threshold) = cli.fail_threshold {
        policy.fail_threshold = threshold;
    }
    if let Err(err) = policy.validate() {
        eprintln!("Error: {err}");
        return Ok(EXIT_USAGE);
    }

    let show_progress = !cli.quiet && cli.format == OutputFormat::Text;
    let spinner = show_progress.then(|| create_spinner("pakscan scanning package…"));

    let package = fetch::resolve(&target, &policy)?;

    let scanner = Scanner::new(policy)
        .with_static_analysis(cli.static_analysis)
        .with_signature_verification(cli.verify_signature);
    let report = scanner.scan(&target, package.root());

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed creating report file {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_report(&mut out, &report, cli.format)?;
            out.flush()?;
            if !cli.quiet {
                writeln!(writer, "Report saved to: {}", path.display())?;
            }
        }
        None => write_report(writer, &report, cli.format)?,
    }

    if report.total >= scanner.policy().fail_threshold {
        return Ok(1);
    }
    Ok(0)
}

fn write_report(writer: &mut impl Write, report: &RiskReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => render::print_report(writer, report)?,
        OutputFormat::Json => json::print_report(writer, report)?,
        OutputFormat::Markdown => markdown::print_report(writer, report)?,
    }
    Ok(())
}

/// Resolves the positional target. With `--download` a bare name is an
/// npm package; otherwise it is a local path.
fn parse_target(raw: &str, download: bool) -> Result<ScanTarget> {
    if download && !raw.starts_with("npm:") && !raw.starts_with("github:") {
        return ScanTarget::parse(&format!("npm:{raw}"));
    }
    ScanTarget::parse(raw)
}

/// Installs the Ctrl-C hook once. A second installation attempt (from
/// tests invoking the entry point repeatedly) is harmless and ignored.
fn install_cancel_handler() {
    let _ = ctrlc::set_handler(|| {
        crate::CANCELLED.store(true, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run(args: &[&str]) -> (i32, String) {
        let mut out = Vec::new();
        let code = run_with_args_to(args.iter().map(|s| (*s).to_owned()).collect(), &mut out)
            .expect("run_with_args_to failed");
        (code, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_help_exits_zero() {
        let (code, output) = run(&["--help"]);
        assert_eq!(code, 0);
        assert!(output.contains("pakscan"));
        assert!(output.contains(".pakscan.toml"));
    }

    #[test]
    fn test_unknown_flag_exits_two() {
        let (code, _) = run(&["--definitely-not-a-flag"]);
        assert_eq!(code, 2);
    }

    #[test]
    fn test_missing_target_directory_fails() {
        let mut out = Vec::new();
        let result = run_with_args_to(
            vec!["/definitely/not/a/real/path".to_owned()],
            &mut out,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_clean_package_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "tidy", "license": "MIT", "repository": "r", "author": "a"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("package-lock.json"), r#"{"packages": {}}"#).unwrap();

        let (code, output) = run(&[dir.path().to_str().unwrap(), "--quiet"]);
        assert_eq!(code, 0);
        assert!(output.contains("Total risk score"));
    }

    #[test]
    fn test_fail_threshold_gates_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        // No manifest, no lockfile: dependencies detector scores 1.
        fs::write(dir.path().join("readme.txt"), "hello").unwrap();

        let (code, _) = run(&[dir.path().to_str().unwrap(), "--quiet"]);
        assert_eq!(code, 0);

        let (code, _) = run(&[
            dir.path().to_str().unwrap(),
            "--quiet",
            "--fail-threshold",
            "1",
        ]);
        assert_eq!(code, 1);
    }

    #[test]
    fn test_invalid_fail_threshold_config_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".pakscan.toml"),
            "[pakscan]\ntier_medium = 9\ntier_high = 2\n",
        )
        .unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "x"}"#).unwrap();

        let (code, _) = run(&[dir.path().to_str().unwrap(), "--quiet"]);
        assert_eq!(code, 2);
    }

    #[test]
    fn test_json_format_parses() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "x"}"#).unwrap();

        let (_, output) = run(&[dir.path().to_str().unwrap(), "--format", "json", "--quiet"]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["detectors"]["secrets"].is_object());
    }

    #[test]
    fn test_report_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "x"}"#).unwrap();
        let report_path = dir.path().join("report.md");

        let (_, output) = run(&[
            dir.path().to_str().unwrap(),
            "--format",
            "markdown",
            "--output",
            report_path.to_str().unwrap(),
        ]);
        assert!(output.contains("Report saved to:"));
        let saved = fs::read_to_string(&report_path).unwrap();
        assert!(saved.contains("# Package Risk Scan Report"));
    }
}
