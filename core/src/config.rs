//! Alias configuration files.
//!
//! The scanning tool keeps its alias rules under an `aliases` key. This
//! module loads that list from YAML (JSON is accepted too, being a YAML
//! subset).
//!
//! # Example YAML
//!
//! ```yaml
//! aliases:
//!   - type: camelCase
//!   - type: literal
//!     flags:
//!       enable-billing: [BILLING_ENABLED, billingOn]
//!   - type: filePattern
//!     name: ts-constants
//!     paths: ["src/**/*.ts"]
//!     patterns: ["export const (\\w+) = 'FLAG_KEY'"]
//!   - type: command
//!     command: node scripts/aliases.js
//!     timeout: 5
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::{AliasRule, ValidationError, validate_rules};

/// Top-level alias configuration.
///
/// # Examples
///
/// ```
/// use flag_alias_core::{AliasConfig, AliasKind};
///
/// let config = AliasConfig::from_yaml_str("aliases:\n  - type: snake_case\n").unwrap();
/// assert_eq!(config.aliases.len(), 1);
/// assert_eq!(config.aliases[0].kind(), AliasKind::SnakeCase);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Rules applied in order to every flag.
    #[serde(default)]
    pub aliases: Vec<AliasRule>,
}

impl AliasConfig {
    /// Loads configuration from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Like [`load`](Self::load), then rejects the configuration if
    /// [`validate`](Self::validate) finds any problem.
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::load(path)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate_rules(&self.aliases)
    }
}
