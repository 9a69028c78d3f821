//! Feature-flag alias resolution.
//!
//! Given flag keys and the configured [`AliasRule`]s, this crate computes
//! every alternate spelling each flag may appear as in source code. The
//! code-reference scanner then searches for those spellings alongside the
//! keys themselves.
//!
//! Strategies, one per rule kind:
//!
//! - literal — fixed aliases from configuration.
//! - case conversion — [`case::convert`] rewrites the key as camelCase,
//!   PascalCase, snake_case, UPPER_SNAKE, kebab-case or dot.case.
//! - file pattern — [`pattern::extract_aliases`] runs regex templates over
//!   project files loaded once into a [`FileContentCache`].
//! - command — [`command::run_alias_command`] asks an external program,
//!   bounded by an optional timeout.
//!
//! # Example
//!
//! ```
//! use flag_alias_core::{AliasRule, CaseStyle};
//! use flag_alias_resolver::generate_aliases;
//!
//! let dir = std::env::temp_dir();
//! let rules = vec![
//!     AliasRule::Case(CaseStyle::LowerCamel),
//!     AliasRule::Case(CaseStyle::ScreamingSnake),
//! ];
//! let aliases = generate_aliases(&["new-checkout"], &rules, &dir).unwrap();
//! assert_eq!(aliases["new-checkout"], vec!["newCheckout", "NEW_CHECKOUT"]);
//! ```
//!
//! [`AliasRule`]: flag_alias_core::AliasRule

pub mod cache;
pub mod case;
pub mod command;
pub mod error;
pub mod paths;
pub mod pattern;
pub mod resolve;

use std::path::Path;

use flag_alias_core::AliasRule;

pub use cache::FileContentCache;
pub use error::{AliasError, Result};
pub use resolve::{AliasMap, AliasResolver, dedupe};

/// Resolves aliases for `flags` sequentially.
///
/// Shorthand for [`AliasResolver::new`] followed by
/// [`resolve`](AliasResolver::resolve). The returned map has exactly one
/// entry per distinct flag key, each alias list free of duplicates.
pub fn generate_aliases<S>(
    flags: &[S],
    rules: &[AliasRule],
    base_dir: impl AsRef<Path>,
) -> Result<AliasMap>
where
    S: AsRef<str> + Sync,
{
    AliasResolver::new(rules, base_dir.as_ref()).resolve(flags)
}
