use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.pakscan.toml):
  Create this file in your project root to set defaults.

  [pakscan]
  # Risk tiers and CI gate
  tier_medium = 4            # Total score at which the tier is Medium
  tier_high = 7              # Total score at which the tier is High
  fail_threshold = 7         # Exit 1 at/above this total (default: tier_high)

  # Secrets heuristics
  entropy_threshold = 3.5    # Bits/char for entropy candidates
  min_token_length = 20      # Minimum entropy-candidate length

  # Policy
  max_direct_dependencies = 30
  deny_licenses = [\"GPL-3.0\", \"AGPL-3.0\", \"SSPL-1.0\"]
  popular_packages = [\"react\", \"lodash\", \"express\"]

  # Traversal
  exclude_folders = [\"vendor\", \"fixtures\"]

  # Download retry
  retry_attempts = 3
  backoff_ms = 500
";

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled terminal report.
    Text,
    /// Machine-readable JSON.
    Json,
    /// Markdown document.
    Markdown,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pakscan - offline risk triage for npm packages: secrets, typosquats, lockfile and license checks",
    long_about = None,
    after_help = CONFIG_HELP
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct Cli {
    /// What to scan: a local directory (default `.`), `npm:<name>`, or
    /// `github:<owner>/<repo>`.
    pub target: Option<String>,

    /// Treat a bare target as an npm package name and download it.
    #[arg(long)]
    pub download: bool,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Exit 1 when the total score reaches this value
    /// (defaults to the configured tier_high).
    #[arg(long)]
    pub fail_threshold: Option<u32>,

    /// Additional folder names to exclude from the file walk.
    #[arg(long = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Verify the target's signature with cosign (remote targets only).
    #[arg(long)]
    pub verify_signature: bool,

    /// Run semgrep static analysis over the package tree.
    #[arg(long)]
    pub static_analysis: bool,

    /// Suppress progress decoration.
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pakscan"]).unwrap();
        assert_eq!(cli.target, None);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.download);
        assert!(!cli.verify_signature);
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::try_parse_from([
            "pakscan",
            "npm:left-pad",
            "--format",
            "json",
            "--fail-threshold",
            "4",
            "--exclude-folder",
            "vendor",
            "--exclude-folder",
            "fixtures",
            "--static-analysis",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.target.as_deref(), Some("npm:left-pad"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.fail_threshold, Some(4));
        assert_eq!(cli.exclude_folders, vec!["vendor", "fixtures"]);
        assert!(cli.static_analysis);
        assert!(cli.quiet);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["pakscan", "--no-such-flag"]).is_err());
    }
}
