//! File contents shared by every file-pattern rule.
//!
//! The cache is filled once per resolution call, before any rule is
//! evaluated, and is read-only afterwards. A file matched by several rules
//! or globs is read exactly once.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use flag_alias_core::AliasRule;
use tracing::{debug, trace};

use crate::dedupe;
use crate::error::{AliasError, Result};
use crate::paths::expand_glob;

/// Raw bytes of every file referenced by a file-pattern rule, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct FileContentCache {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl FileContentCache {
    /// Reads every file matched by the path globs of the file-pattern rules
    /// in `rules`. Other rule kinds are ignored.
    ///
    /// # Errors
    ///
    /// - [`AliasError::Glob`] if a path glob is malformed.
    /// - [`AliasError::MissingFile`] if a matched path no longer exists.
    /// - [`AliasError::FileRead`] if a matched file cannot be read.
    pub fn build(rules: &[AliasRule], base_dir: &Path) -> Result<Self> {
        let mut files = HashMap::new();

        for (index, rule) in rules.iter().enumerate() {
            let AliasRule::FilePattern(rule) = rule else {
                continue;
            };
            let rule_id = rule.identifier(index);

            let mut paths = Vec::new();
            for pattern in &rule.paths {
                let matches =
                    expand_glob(base_dir, pattern).map_err(|source| AliasError::Glob {
                        rule: rule_id.clone(),
                        pattern: base_dir.join(pattern).display().to_string(),
                        source,
                    })?;
                trace!(rule = %rule_id, pattern = %pattern, matched = matches.len(), "Expanded path glob");
                paths.extend(matches);
            }

            for path in dedupe(paths) {
                if files.contains_key(&path) {
                    continue;
                }
                if !path.exists() {
                    return Err(AliasError::MissingFile {
                        rule: rule_id,
                        path,
                    });
                }
                let data = fs::read(&path).map_err(|source| AliasError::FileRead {
                    rule: rule_id.clone(),
                    path: path.clone(),
                    source,
                })?;
                files.insert(path, data);
            }
        }

        debug!(files = files.len(), "Built file content cache");
        Ok(Self { files })
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
