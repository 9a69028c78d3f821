//! Alias rule model for feature-flag code references.
//!
//! A code-reference scanner searches a repository for feature-flag keys.
//! Flags often appear under other spellings, so the scanner is configured
//! with alias rules describing how to derive those spellings. This crate
//! defines that configuration:
//!
//! - [`AliasRule`] — one alias strategy (literal list, case conversion,
//!   file pattern, or external command).
//! - [`AliasKind`] — the rule `type` tag, parsed case-insensitively.
//! - [`AliasConfig`] — the `aliases` list as loaded from a YAML file.
//!
//! Validation ([`validate_rules`]) catches rules that could never produce an
//! alias. Resolving rules into aliases lives in `flag-alias-resolver`.
//!
//! # Example
//!
//! ```
//! use flag_alias_core::*;
//!
//! let config = AliasConfig::from_yaml_str(
//!     r#"
//! aliases:
//!   - type: kebab-case
//!   - type: filePattern
//!     paths: ["config/flags.yml"]
//!     patterns: ["(\\w+): FLAG_KEY"]
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.aliases[0], AliasRule::Case(CaseStyle::Kebab));
//! assert!(config.validate().is_empty());
//! ```

mod config;
mod error;
mod types;
mod validate;

pub use config::AliasConfig;
pub use error::{ConfigError, Result};
pub use types::*;
pub use validate::{ValidationError, validate_rules};
