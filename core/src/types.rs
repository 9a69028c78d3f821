//! Alias rule type definitions.
//!
//! An alias rule is one configured strategy for producing alternate
//! spellings of a flag key. The rule kinds form a closed set, modelled as the
//! [`AliasRule`] enum with one payload shape per kind. Configuration files
//! carry the kind as a free-form `type` string which is matched
//! case-insensitively against its canonical form (see [`AliasKind`]).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token replaced with the literal flag key inside file-pattern templates.
pub const FLAG_KEY_PLACEHOLDER: &str = "FLAG_KEY";

/// The `type` string of a rule did not name a known alias kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alias type '{0}'")]
pub struct UnknownAliasKind(pub String);

/// Every alias kind a rule can be tagged with.
///
/// # Examples
///
/// ```
/// use flag_alias_core::AliasKind;
///
/// assert_eq!("filePattern".parse::<AliasKind>().unwrap(), AliasKind::FilePattern);
/// assert_eq!("file-pattern".parse::<AliasKind>().unwrap(), AliasKind::FilePattern);
/// assert_eq!("SNAKE_CASE".parse::<AliasKind>().unwrap(), AliasKind::SnakeCase);
/// assert!("shout".parse::<AliasKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasKind {
    Literal,
    CamelCase,
    PascalCase,
    SnakeCase,
    UpperSnakeCase,
    KebabCase,
    DotCase,
    FilePattern,
    Command,
}

impl AliasKind {
    pub const ALL: [AliasKind; 9] = [
        AliasKind::Literal,
        AliasKind::CamelCase,
        AliasKind::PascalCase,
        AliasKind::SnakeCase,
        AliasKind::UpperSnakeCase,
        AliasKind::KebabCase,
        AliasKind::DotCase,
        AliasKind::FilePattern,
        AliasKind::Command,
    ];

    /// Spelling used when a rule is written back out.
    pub fn as_str(self) -> &'static str {
        match self {
            AliasKind::Literal => "literal",
            AliasKind::CamelCase => "camelCase",
            AliasKind::PascalCase => "pascalCase",
            AliasKind::SnakeCase => "snakeCase",
            AliasKind::UpperSnakeCase => "upperSnakeCase",
            AliasKind::KebabCase => "kebabCase",
            AliasKind::DotCase => "dotCase",
            AliasKind::FilePattern => "filePattern",
            AliasKind::Command => "command",
        }
    }

    /// Normalizes a raw `type` string for comparison.
    ///
    /// Lowercases and drops `_`, `-` and `.` separators, so `snake_case`,
    /// `snakeCase` and `SNAKE-CASE` all become `snakecase`.
    pub fn canonicalize(raw: &str) -> String {
        raw.trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | '.'))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl fmt::Display for AliasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AliasKind {
    type Err = UnknownAliasKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match Self::canonicalize(s).as_str() {
            "literal" => AliasKind::Literal,
            "camelcase" | "lowercamelcase" => AliasKind::CamelCase,
            "pascalcase" | "uppercamelcase" => AliasKind::PascalCase,
            "snakecase" => AliasKind::SnakeCase,
            "uppersnakecase" | "uppersnake" | "screamingsnakecase" => AliasKind::UpperSnakeCase,
            "kebabcase" => AliasKind::KebabCase,
            "dotcase" => AliasKind::DotCase,
            "filepattern" => AliasKind::FilePattern,
            "command" => AliasKind::Command,
            _ => return Err(UnknownAliasKind(s.to_string())),
        };
        Ok(kind)
    }
}

/// Naming convention produced by a case-conversion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStyle {
    /// `myFlagKey`
    LowerCamel,
    /// `MyFlagKey`
    UpperCamel,
    /// `my_flag_key`
    Snake,
    /// `MY_FLAG_KEY`
    ScreamingSnake,
    /// `my-flag-key`
    Kebab,
    /// `my.flag.key`
    Dot,
}

impl CaseStyle {
    pub fn kind(self) -> AliasKind {
        match self {
            CaseStyle::LowerCamel => AliasKind::CamelCase,
            CaseStyle::UpperCamel => AliasKind::PascalCase,
            CaseStyle::Snake => AliasKind::SnakeCase,
            CaseStyle::ScreamingSnake => AliasKind::UpperSnakeCase,
            CaseStyle::Kebab => AliasKind::KebabCase,
            CaseStyle::Dot => AliasKind::DotCase,
        }
    }
}

/// Pulls aliases out of project files with regular expressions.
///
/// The contents of every file matched by `paths` are concatenated and each
/// template in `patterns` (with [`FLAG_KEY_PLACEHOLDER`] substituted) is run
/// against the result. Capture groups become aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePatternRule {
    /// Optional label used in diagnostics.
    pub name: Option<String>,
    /// Glob patterns relative to the base directory.
    pub paths: Vec<String>,
    /// Regular-expression templates.
    pub patterns: Vec<String>,
}

impl FilePatternRule {
    /// Diagnostic identifier: the rule name, or its position in the rule list.
    pub fn identifier(&self, index: usize) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => index.to_string(),
        }
    }
}

/// Asks an external program for aliases.
///
/// The command string is split on whitespace: the first token is the
/// executable and the rest are its arguments. No shell quoting or escaping
/// is interpreted, so arguments cannot contain spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRule {
    pub command: String,
    /// Deadline in seconds. Absent, zero or negative means no deadline.
    pub timeout: Option<i64>,
}

impl CommandRule {
    /// # Examples
    ///
    /// ```
    /// use flag_alias_core::CommandRule;
    ///
    /// let rule = CommandRule { command: "node  scripts/alias.js --json".into(), timeout: None };
    /// assert_eq!(rule.argv(), vec!["node", "scripts/alias.js", "--json"]);
    /// ```
    pub fn argv(&self) -> Vec<&str> {
        self.command.split_whitespace().collect()
    }

    pub fn deadline(&self) -> Option<Duration> {
        match self.timeout {
            Some(secs) if secs > 0 => Some(Duration::from_secs(secs as u64)),
            _ => None,
        }
    }
}

/// One configured alias strategy.
///
/// # Examples
///
/// ```
/// use flag_alias_core::{AliasKind, AliasRule, CaseStyle};
///
/// let rules: Vec<AliasRule> = serde_yaml::from_str(
///     r#"
/// - type: camelCase
/// - type: literal
///   flags:
///     my-flag: [MY_FLAG_ALIAS]
/// "#,
/// )
/// .unwrap();
///
/// assert_eq!(rules[0], AliasRule::Case(CaseStyle::LowerCamel));
/// assert_eq!(rules[1].kind(), AliasKind::Literal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAliasRule", into = "RawAliasRule")]
pub enum AliasRule {
    /// Fixed aliases per flag key.
    Literal {
        flags: BTreeMap<String, Vec<String>>,
    },
    /// The flag key rewritten in another naming convention.
    Case(CaseStyle),
    FilePattern(FilePatternRule),
    Command(CommandRule),
}

impl AliasRule {
    pub fn literal<K, I, V>(flags: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        AliasRule::Literal {
            flags: flags
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    pub fn file_pattern<P, T>(
        paths: impl IntoIterator<Item = P>,
        patterns: impl IntoIterator<Item = T>,
    ) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        AliasRule::FilePattern(FilePatternRule {
            name: None,
            paths: paths.into_iter().map(Into::into).collect(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        })
    }

    pub fn command(command: impl Into<String>, timeout: Option<i64>) -> Self {
        AliasRule::Command(CommandRule {
            command: command.into(),
            timeout,
        })
    }

    pub fn kind(&self) -> AliasKind {
        match self {
            AliasRule::Literal { .. } => AliasKind::Literal,
            AliasRule::Case(style) => style.kind(),
            AliasRule::FilePattern(_) => AliasKind::FilePattern,
            AliasRule::Command(_) => AliasKind::Command,
        }
    }

    /// Diagnostic identifier for the rule at `index` in its list.
    pub fn identifier(&self, index: usize) -> String {
        match self {
            AliasRule::FilePattern(rule) => rule.identifier(index),
            _ => index.to_string(),
        }
    }
}

/// Flat on-disk shape of a rule, before the `type` tag is resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawAliasRule {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flags: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout: Option<i64>,
}

impl TryFrom<RawAliasRule> for AliasRule {
    type Error = UnknownAliasKind;

    fn try_from(raw: RawAliasRule) -> Result<Self, Self::Error> {
        let rule = match raw.kind.parse::<AliasKind>()? {
            AliasKind::Literal => AliasRule::Literal {
                flags: raw.flags.unwrap_or_default(),
            },
            AliasKind::CamelCase => AliasRule::Case(CaseStyle::LowerCamel),
            AliasKind::PascalCase => AliasRule::Case(CaseStyle::UpperCamel),
            AliasKind::SnakeCase => AliasRule::Case(CaseStyle::Snake),
            AliasKind::UpperSnakeCase => AliasRule::Case(CaseStyle::ScreamingSnake),
            AliasKind::KebabCase => AliasRule::Case(CaseStyle::Kebab),
            AliasKind::DotCase => AliasRule::Case(CaseStyle::Dot),
            AliasKind::FilePattern => AliasRule::FilePattern(FilePatternRule {
                name: raw.name,
                paths: raw.paths.unwrap_or_default(),
                patterns: raw.patterns.unwrap_or_default(),
            }),
            AliasKind::Command => AliasRule::Command(CommandRule {
                command: raw.command.unwrap_or_default(),
                timeout: raw.timeout,
            }),
        };
        Ok(rule)
    }
}

impl From<AliasRule> for RawAliasRule {
    fn from(rule: AliasRule) -> Self {
        let kind = rule.kind().as_str().to_string();
        match rule {
            AliasRule::Literal { flags } => RawAliasRule {
                kind,
                flags: Some(flags),
                ..Default::default()
            },
            AliasRule::Case(_) => RawAliasRule {
                kind,
                ..Default::default()
            },
            AliasRule::FilePattern(rule) => RawAliasRule {
                kind,
                name: rule.name,
                paths: Some(rule.paths),
                patterns: Some(rule.patterns),
                ..Default::default()
            },
            AliasRule::Command(rule) => RawAliasRule {
                kind,
                command: Some(rule.command),
                timeout: rule.timeout,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        for kind in AliasKind::ALL {
            assert_eq!(kind.as_str().parse::<AliasKind>().unwrap(), kind);
            assert_eq!(
                kind.as_str().to_uppercase().parse::<AliasKind>().unwrap(),
                kind
            );
        }
        assert_eq!(
            "UPPER_SNAKE".parse::<AliasKind>().unwrap(),
            AliasKind::UpperSnakeCase
        );
        assert_eq!("dot.case".parse::<AliasKind>().unwrap(), AliasKind::DotCase);
        assert_eq!(
            "kebab-case".parse::<AliasKind>().unwrap(),
            AliasKind::KebabCase
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected_with_its_name() {
        let err = serde_yaml::from_str::<AliasRule>("type: shoutCase").unwrap_err();
        assert!(err.to_string().contains("unknown alias type 'shoutCase'"));
    }

    #[test]
    fn test_file_pattern_rule_deserializes_all_fields() {
        let rule: AliasRule = serde_yaml::from_str(
            r#"
type: FilePattern
name: constants
paths: ["src/**/*.ts", "lib/flags.js"]
patterns: ["(\\w+) = 'FLAG_KEY'"]
"#,
        )
        .unwrap();

        let AliasRule::FilePattern(rule) = rule else {
            panic!("expected file pattern rule");
        };
        assert_eq!(rule.name.as_deref(), Some("constants"));
        assert_eq!(rule.paths, vec!["src/**/*.ts", "lib/flags.js"]);
        assert_eq!(rule.patterns, vec!["(\\w+) = 'FLAG_KEY'"]);
        assert_eq!(rule.identifier(3), "constants");
    }

    #[test]
    fn test_unnamed_file_pattern_uses_index() {
        let rule = AliasRule::file_pattern(["a.txt"], ["(FLAG_KEY)"]);
        assert_eq!(rule.identifier(2), "2");
    }

    #[test]
    fn test_command_rule_deadline() {
        let rule = |timeout| CommandRule {
            command: "echo".into(),
            timeout,
        };
        assert_eq!(rule(None).deadline(), None);
        assert_eq!(rule(Some(0)).deadline(), None);
        assert_eq!(rule(Some(-4)).deadline(), None);
        assert_eq!(rule(Some(3)).deadline(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_rule_serializes_back_to_config_shape() {
        let rule = AliasRule::command("./alias.sh", Some(5));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "command", "command": "./alias.sh", "timeout": 5 })
        );
        let back: AliasRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }
}
