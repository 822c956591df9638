use regex::Regex;
use std::sync::OnceLock;

use crate::detectors::{CommandCategory, FindingKind};

/// A named credential-format signature.
#[derive(Debug, Clone)]
pub struct SecretSignature {
    /// Which credential format this signature detects.
    pub kind: FindingKind,
    /// Compiled pattern.
    pub regex: Regex,
}

/// A dangerous-command signature scanned against script bodies.
#[derive(Debug, Clone)]
pub struct CommandSignature {
    /// Capability category of the command.
    pub category: CommandCategory,
    /// Compiled pattern.
    pub regex: Regex,
}

fn compile(pattern: &str) -> Regex {
    #[allow(clippy::expect_used)]
    Regex::new(pattern).expect("Invalid builtin regex pattern")
}

/// Returns the fixed credential-pattern table.
pub fn get_secret_signatures() -> &'static [SecretSignature] {
    static TABLE: OnceLock<Vec<SecretSignature>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            SecretSignature {
                kind: FindingKind::AwsAccessKey,
                regex: compile(r"AKIA[0-9A-Z]{16}"),
            },
            SecretSignature {
                kind: FindingKind::AwsSecretKey,
                regex: compile(
                    r#"(?i)aws(.{0,20})?(secret|access)[\s:="']{0,5}([A-Za-z0-9/+=]{40})"#,
                ),
            },
            SecretSignature {
                kind: FindingKind::GithubToken,
                regex: compile(r"ghp_[A-Za-z0-9]{36}"),
            },
            SecretSignature {
                kind: FindingKind::SlackToken,
                regex: compile(r"xox[baprs]-[A-Za-z0-9-]{10,48}"),
            },
            SecretSignature {
                kind: FindingKind::GoogleApiKey,
                regex: compile(r"AIza[0-9A-Za-z\-_]{35}"),
            },
            SecretSignature {
                kind: FindingKind::PrivateKey,
                regex: compile(r"-----BEGIN (RSA|DSA|EC|OPENSSH) PRIVATE KEY-----"),
            },
        ]
    })
}

/// Builds the regex extracting maximal entropy-candidate token runs of
/// at least `min_length` characters. The length comes from policy, so
/// this one is compiled per scan rather than cached.
#[must_use]
pub fn token_candidate_re(min_length: usize) -> Regex {
    compile(&format!(r"[A-Za-z0-9/_+=-]{{{min_length},}}"))
}

/// Returns the dangerous-command signature table for install scripts.
pub fn get_command_signatures() -> &'static [CommandSignature] {
    static TABLE: OnceLock<Vec<CommandSignature>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            CommandSignature {
                category: CommandCategory::CurlDownload,
                regex: compile(r"(?i)\bcurl\b"),
            },
            CommandSignature {
                category: CommandCategory::WgetDownload,
                regex: compile(r"(?i)\bwget\b"),
            },
            CommandSignature {
                category: CommandCategory::PowershellExec,
                regex: compile(r"(?i)\bpowershell\b"),
            },
            CommandSignature {
                category: CommandCategory::ShellExec,
                regex: compile(r"(?i)\bbash\b|\bsh\b"),
            },
            CommandSignature {
                category: CommandCategory::NodeEval,
                regex: compile(r"node\s+-e\s+"),
            },
            CommandSignature {
                category: CommandCategory::ChmodExec,
                regex: compile(r"(?i)\bchmod\s+\+x\b"),
            },
            CommandSignature {
                category: CommandCategory::Base64Decode,
                regex: compile(r"(?i)base64\s+-d|atob\("),
            },
            CommandSignature {
                category: CommandCategory::ArchiveExtract,
                regex: compile(r"(?i)\btar\b"),
            },
        ]
    })
}
