//! Error types for loading alias configuration.

use thiserror::Error;

use crate::ValidationError;

/// Errors that can occur while loading an alias configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure, including unknown alias types.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The configuration parsed but failed validation.
    #[error("invalid alias configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
