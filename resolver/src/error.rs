//! Error types for alias resolution.
//!
//! Every variant is terminal for the resolution call that produced it. Each
//! carries enough context (rule identifier, path, command or flag) to locate
//! the misconfiguration.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while resolving aliases.
#[derive(Debug, Error)]
pub enum AliasError {
    /// A file-pattern path glob is syntactically invalid.
    #[error("filePattern '{rule}': could not process path glob '{pattern}': {source}")]
    Glob {
        rule: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A globbed path disappeared before it could be read.
    #[error("filePattern '{rule}': could not find file at path '{}'", .path.display())]
    MissingFile { rule: String, path: PathBuf },

    #[error("filePattern '{rule}': could not process file at path '{}': {source}", .path.display())]
    FileRead {
        rule: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pattern template did not compile once the flag key was substituted.
    #[error("invalid alias pattern '{pattern}' for flag '{flag}': {source}")]
    PatternCompile {
        flag: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Command rule with nothing to execute.
    #[error("alias command for flag '{flag}' is empty")]
    EmptyCommand { flag: String },

    /// The alias command could not be started, fed, or waited on.
    #[error("failed to execute alias command '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "alias command '{command}' did not finish within {}s for flag '{flag}'",
        .timeout.as_secs()
    )]
    Timeout {
        command: String,
        flag: String,
        timeout: Duration,
    },

    /// The alias command exited unsuccessfully.
    #[error("alias command '{command}' failed for flag '{flag}' ({status}){}", stderr_suffix(.stderr))]
    CommandExecution {
        command: String,
        flag: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Standard output was not a JSON array of strings.
    #[error("could not unmarshal json output of alias command '{command}' for flag '{flag}': {source}")]
    CommandOutput {
        command: String,
        flag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build resolver thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Convenience alias for results with [`AliasError`].
pub type Result<T> = std::result::Result<T, AliasError>;
