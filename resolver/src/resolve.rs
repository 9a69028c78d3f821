//! The alias resolution driver.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;
use std::path::Path;

use flag_alias_core::AliasRule;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cache::FileContentCache;
use crate::error::Result;
use crate::{case, command, pattern};

/// Flag key to its deduplicated aliases, one entry per requested flag.
pub type AliasMap = BTreeMap<String, Vec<String>>;

/// Applies a list of alias rules to flag keys.
///
/// Rules are evaluated in their configured order for every flag. By default
/// flags are processed one at a time; [`with_jobs`](Self::with_jobs) spreads
/// them over a thread pool that shares the read-only file cache.
///
/// # Examples
///
/// ```
/// use flag_alias_core::{AliasRule, CaseStyle};
/// use flag_alias_resolver::AliasResolver;
///
/// let rules = vec![
///     AliasRule::Case(CaseStyle::ScreamingSnake),
///     AliasRule::literal([("dark-mode", ["DARK_MODE", "darkTheme"])]),
/// ];
/// let dir = std::env::temp_dir();
/// let aliases = AliasResolver::new(&rules, &dir).resolve(&["dark-mode"]).unwrap();
/// assert_eq!(aliases["dark-mode"], vec!["DARK_MODE", "darkTheme"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    rules: &'a [AliasRule],
    base_dir: &'a Path,
    jobs: usize,
}

impl<'a> AliasResolver<'a> {
    pub fn new(rules: &'a [AliasRule], base_dir: &'a Path) -> Self {
        Self {
            rules,
            base_dir,
            jobs: 1,
        }
    }

    /// Number of flags resolved concurrently. `0` and `1` mean sequential.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Resolves aliases for every flag.
    ///
    /// The file cache is built once up front. The first error from the cache
    /// build or from any rule aborts the whole call.
    pub fn resolve<S>(&self, flags: &[S]) -> Result<AliasMap>
    where
        S: AsRef<str> + Sync,
    {
        let cache = FileContentCache::build(self.rules, self.base_dir)?;
        info!(
            flags = flags.len(),
            rules = self.rules.len(),
            cached_files = cache.len(),
            jobs = self.jobs,
            "Resolving flag aliases"
        );

        let resolve_one = |flag: &S| -> Result<(String, Vec<String>)> {
            let flag = flag.as_ref();
            Ok((flag.to_string(), self.resolve_flag(flag, &cache)?))
        };

        if self.jobs <= 1 || flags.len() < 2 {
            return flags.iter().map(resolve_one).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()?;
        pool.install(|| flags.par_iter().map(resolve_one).collect())
    }

    /// Resolves one flag against a prebuilt cache.
    pub fn resolve_flag(&self, flag: &str, cache: &FileContentCache) -> Result<Vec<String>> {
        let mut aliases = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let generated = self.apply_rule(index, rule, flag, cache)?;
            debug!(flag = %flag, rule = index, kind = %rule.kind(), aliases = generated.len(), "Applied alias rule");
            aliases.extend(generated);
        }
        Ok(dedupe(aliases))
    }

    fn apply_rule(
        &self,
        index: usize,
        rule: &AliasRule,
        flag: &str,
        cache: &FileContentCache,
    ) -> Result<Vec<String>> {
        match rule {
            AliasRule::Literal { flags } => Ok(flags.get(flag).cloned().unwrap_or_default()),
            AliasRule::Case(style) => Ok(vec![case::convert(flag, *style)]),
            AliasRule::FilePattern(rule) => {
                pattern::extract_aliases(rule, &rule.identifier(index), flag, self.base_dir, cache)
            }
            AliasRule::Command(rule) => command::run_alias_command(rule, flag, self.base_dir),
        }
    }
}

/// Removes repeated items, keeping the first occurrence of each.
///
/// # Examples
///
/// ```
/// use flag_alias_resolver::dedupe;
///
/// assert_eq!(dedupe(vec!["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
/// ```
pub fn dedupe<T>(items: Vec<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
