//! CLI command implementations.

pub mod doctor;
pub mod init;
pub mod module;
pub mod plan;
pub mod resolve;
pub mod target;

use buildrules_toolchain::ResolveError;

/// Output format for commands that print structured data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render tolerated failures for JSON output.
pub(crate) fn warning_strings(warnings: &[ResolveError]) -> Vec<String> {
    warnings.iter().map(ToString::to_string).collect()
}

/// One-line summary of tolerated failures for text output.
pub(crate) fn warning_summary(warnings: &[ResolveError]) -> Option<String> {
    match warnings.len() {
        0 => None,
        1 => Some(format!("1 warning: {}", warnings[0])),
        n => Some(format!("{n} warnings, first: {}", warnings[0])),
    }
}
