//! Alias extraction from project files.
//!
//! The contents of every file a rule's globs match are concatenated, in glob
//! order, and each of the rule's templates is run over the result with the
//! flag key substituted for [`FLAG_KEY_PLACEHOLDER`]. Capture groups of each
//! match become aliases; the whole match never does.

use std::path::Path;

use flag_alias_core::{FLAG_KEY_PLACEHOLDER, FilePatternRule};
use regex::bytes::Regex;
use tracing::trace;

use crate::cache::FileContentCache;
use crate::error::{AliasError, Result};
use crate::paths::expand_glob;

/// Runs a file-pattern rule for one flag.
///
/// Files absent from `cache` contribute nothing. A file matched by two globs
/// is concatenated twice. Aliases are ordered by match, then by template; a
/// group that did not take part in a match yields an empty string.
///
/// # Errors
///
/// [`AliasError::Glob`] for a malformed path glob and
/// [`AliasError::PatternCompile`] when a template does not compile after
/// substitution.
pub fn extract_aliases(
    rule: &FilePatternRule,
    rule_id: &str,
    flag: &str,
    base_dir: &Path,
    cache: &FileContentCache,
) -> Result<Vec<String>> {
    let contents = concatenate_matches(rule, rule_id, base_dir, cache)?;

    let mut aliases = Vec::new();
    for template in &rule.patterns {
        let pattern = template.replace(FLAG_KEY_PLACEHOLDER, flag);
        let regex = Regex::new(&pattern).map_err(|source| AliasError::PatternCompile {
            flag: flag.to_string(),
            pattern: pattern.clone(),
            source,
        })?;

        for captures in regex.captures_iter(&contents) {
            aliases.extend(captures.iter().skip(1).map(|group| {
                group
                    .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
                    .unwrap_or_default()
            }));
        }
    }

    trace!(rule = %rule_id, flag = %flag, aliases = aliases.len(), "Extracted file pattern aliases");
    Ok(aliases)
}

fn concatenate_matches(
    rule: &FilePatternRule,
    rule_id: &str,
    base_dir: &Path,
    cache: &FileContentCache,
) -> Result<Vec<u8>> {
    let mut contents = Vec::new();
    for pattern in &rule.paths {
        let matches = expand_glob(base_dir, pattern).map_err(|source| AliasError::Glob {
            rule: rule_id.to_string(),
            pattern: base_dir.join(pattern).display().to_string(),
            source,
        })?;
        for path in matches {
            if let Some(data) = cache.get(&path) {
                contents.extend_from_slice(data);
            }
        }
    }
    Ok(contents)
}
