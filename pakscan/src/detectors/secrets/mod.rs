//! Leaked-credential detection: pattern table + entropy heuristic over
//! a pruned walk of the package file tree.

mod entropy;
mod scanner;
mod walker;
#[cfg(test)]
mod tests;

pub use entropy::{is_secret_candidate, shannon_entropy};
pub use scanner::{score_secret_findings, FileStats, SecretsDetector};
pub use walker::walk_text_files;
