//! Alias rule validation.
//!
//! Catches configuration mistakes that would otherwise make a rule silently
//! produce nothing, such as a file-pattern rule with no paths or a template
//! that never mentions the flag key.
//!
//! # Examples
//!
//! ```
//! use flag_alias_core::*;
//!
//! let good = vec![AliasRule::file_pattern(["flags.ts"], ["(\\w+) = 'FLAG_KEY'"])];
//! assert!(validate_rules(&good).is_empty());
//!
//! let bad = vec![AliasRule::command("   ", None)];
//! assert_eq!(validate_rules(&bad), vec![ValidationError::EmptyCommand("0".into())]);
//! ```

use std::path::Path;

use thiserror::Error;

use crate::{AliasRule, FLAG_KEY_PLACEHOLDER};

/// Alias configuration validation errors.
///
/// Each variant carries the identifier of the offending rule: its name for
/// named file-pattern rules, otherwise its index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Literal rule with no flag entries.
    #[error("literal alias rule {0} defines no flags")]
    EmptyLiteralFlags(String),
    #[error("filePattern '{0}': at least one path glob is required")]
    MissingPaths(String),
    #[error("filePattern '{0}': at least one pattern is required")]
    MissingPatterns(String),
    /// Template that would match the same text for every flag.
    #[error("filePattern '{rule}': pattern '{pattern}' must contain FLAG_KEY")]
    MissingPlaceholder { rule: String, pattern: String },
    /// Globs are resolved against the base directory and must be relative.
    #[error("filePattern '{rule}': path glob '{path}' must be relative")]
    AbsoluteGlob { rule: String, path: String },
    #[error("command alias rule {0} has an empty command")]
    EmptyCommand(String),
}

/// Validates every rule, returning all problems found.
pub fn validate_rules(rules: &[AliasRule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        let id = rule.identifier(index);
        match rule {
            AliasRule::Literal { flags } => {
                if flags.is_empty() {
                    errors.push(ValidationError::EmptyLiteralFlags(id));
                }
            }
            AliasRule::Case(_) => {}
            AliasRule::FilePattern(rule) => {
                if rule.paths.is_empty() {
                    errors.push(ValidationError::MissingPaths(id.clone()));
                }
                if rule.patterns.is_empty() {
                    errors.push(ValidationError::MissingPatterns(id.clone()));
                }
                for path in &rule.paths {
                    if Path::new(path).is_absolute() {
                        errors.push(ValidationError::AbsoluteGlob {
                            rule: id.clone(),
                            path: path.clone(),
                        });
                    }
                }
                for pattern in &rule.patterns {
                    if !pattern.contains(FLAG_KEY_PLACEHOLDER) {
                        errors.push(ValidationError::MissingPlaceholder {
                            rule: id.clone(),
                            pattern: pattern.clone(),
                        });
                    }
                }
            }
            AliasRule::Command(rule) => {
                if rule.argv().is_empty() {
                    errors.push(ValidationError::EmptyCommand(id));
                }
            }
        }
    }

    errors
}
