//! Glob expansion relative to a base directory.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

/// Expands `pattern` under `base_dir` into the regular files it matches.
///
/// `*` stays within one path component and `**` spans any number of them.
/// `{a,b}` alternation and character classes are supported. The pattern is
/// matched against each path relative to `base_dir`, so metacharacters in
/// `base_dir` itself never take part in matching. Results are `base_dir`
/// joined with each match, deduplicated, in a depth-first walk order with
/// entries sorted by file name. A pattern that matches nothing yields an
/// empty list.
///
/// # Errors
///
/// Returns the [`globset::Error`] if `pattern` is not a valid glob.
pub fn expand_glob(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, globset::Error> {
    let matcher = compile(pattern)?;
    let prefix = literal_prefix(pattern);
    let walk_root = base_dir.join(&prefix);
    if !walk_root.exists() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let mut matches = Vec::new();
    for entry in WalkDir::new(&walk_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(
                    path = ?err.path(),
                    error = %err,
                    "Skipping unreadable glob entry"
                );
                continue;
            }
        };
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(&walk_root) else {
            continue;
        };
        if !matcher.is_match(prefix.join(relative)) || !path.is_file() {
            continue;
        }
        if seen.insert(path.to_path_buf()) {
            matches.push(path.to_path_buf());
        }
    }

    Ok(matches)
}

fn compile(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?
        .compile_matcher())
}

/// Leading components of `pattern` that contain no glob syntax. The walk
/// starts there instead of at the base directory.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    let mut components = Path::new(pattern).components().peekable();
    while let Some(component) = components.next() {
        // The last component names the files themselves.
        if components.peek().is_none() {
            break;
        }
        match component {
            Component::Normal(part) if !part.to_string_lossy().contains(GLOB_META) => {
                prefix.push(part);
            }
            Component::CurDir | Component::ParentDir => prefix.push(component),
            _ => break,
        }
    }
    prefix
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(base: &Path, relative: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, relative).unwrap();
    }

    #[test]
    fn test_recursive_glob_returns_joined_sorted_paths() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/b.ts");
        touch(dir.path(), "src/a.ts");
        touch(dir.path(), "src/nested/deep/c.ts");
        touch(dir.path(), "src/readme.md");

        let matches = expand_glob(dir.path(), "src/**/*.ts").unwrap();
        assert_eq!(
            matches,
            vec![
                dir.path().join("src/a.ts"),
                dir.path().join("src/b.ts"),
                dir.path().join("src/nested/deep/c.ts"),
            ]
        );
    }

    #[test]
    fn test_brace_alternation_matches_each_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/a.ts");
        touch(dir.path(), "src/lib/b.js");
        touch(dir.path(), "src/c.go");

        let matches = expand_glob(dir.path(), "src/**/*.{ts,js}").unwrap();
        assert_eq!(
            matches,
            vec![dir.path().join("src/a.ts"), dir.path().join("src/lib/b.js")]
        );
    }

    #[test]
    fn test_double_star_inside_component_acts_as_single_star() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/a.ts");
        touch(dir.path(), "src/nested/b.ts");

        let matches = expand_glob(dir.path(), "src/**.ts").unwrap();
        assert_eq!(matches, vec![dir.path().join("src/a.ts")]);
    }

    #[test]
    fn test_single_star_stays_in_one_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.txt");
        touch(dir.path(), "sub/inner.txt");

        let matches = expand_glob(dir.path(), "*.txt").unwrap();
        assert_eq!(matches, vec![dir.path().join("top.txt")]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(expand_glob(dir.path(), "**/*.nothing").unwrap().is_empty());
        assert!(expand_glob(dir.path(), "absent/dir/*.rs").unwrap().is_empty());
    }

    #[test]
    fn test_directories_are_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "config/flags.yml");

        let matches = expand_glob(dir.path(), "*").unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_metacharacters_in_base_dir_are_literal() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("proj[1]");
        touch(&base, "flags.txt");

        let matches = expand_glob(&base, "*.txt").unwrap();
        assert_eq!(matches, vec![base.join("flags.txt")]);
    }

    #[test]
    fn test_literal_prefix_stops_at_first_glob_component() {
        assert_eq!(literal_prefix("src/flags/*.ts"), PathBuf::from("src/flags"));
        assert_eq!(literal_prefix("src/**/*.ts"), PathBuf::from("src"));
        assert_eq!(literal_prefix("flags.ts"), PathBuf::new());
    }

    #[test]
    fn test_invalid_pattern_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(expand_glob(dir.path(), "src/[abc").is_err());
        assert!(expand_glob(dir.path(), "src/{a,b").is_err());
    }
}
