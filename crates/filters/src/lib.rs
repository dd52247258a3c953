#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` implements the ignore-rule engine used by `rmirror` to decide
//! which paths under a watched tree are mirrored to the remote. Ignore files
//! (`.gitignore` by default) are compiled line by line into glob-backed
//! rules, every ignore file governs the directory that contains it (its
//! *scope*), and classification consults the nearest enclosing scope for the
//! path being examined.
//!
//! # Design
//!
//! - [`parse_line`] turns one raw ignore-file line into a [`ParsedLine`]:
//!   blank lines and comments become no-ops, `\#`-escaped lines become
//!   literal hash patterns, `!`-prefixed lines become negations, and
//!   everything else becomes an exclusion. Glob compilation uses [`globset`]
//!   with its default semantics, where `*` matches any run of characters
//!   including path separators and patterns match the full string.
//! - [`RuleSet`] holds the compiled rules of a single ignore file,
//!   partitioned by kind and kept in file line order.
//! - [`IgnoreIndex`] maps each ignore file's scope directory to its
//!   [`RuleSet`] and keeps the scope directories sorted in descending
//!   lexicographic order, so the first scope that is a string prefix of a
//!   path is its nearest enclosing scope.
//!
//! # Invariants
//!
//! - No-op lines are discarded before storage; a [`RuleSet`] only ever holds
//!   exclusions, negations, and literal hash patterns.
//! - Every scope directory string ends in a path separator and names the
//!   directory containing exactly one ignore file.
//! - Classification uses the first enclosing scope only: once a scope
//!   contains the path, shallower scopes are never consulted. Within that
//!   scope, negations override exclusions. This deliberately simplifies
//!   layered gitignore semantics and must not be "fixed" to cascade.
//! - Paths under the `.git/` subtree of the watched root are always ignored,
//!   independent of any rule file.
//!
//! # Errors
//!
//! Reading an ignore file reports [`ReadError`] with the offending path.
//! A pattern that fails glob compilation yields a [`PatternError`]; loaders
//! skip such rules and keep going, so a malformed line never aborts a watch
//! session.
//!
//! # Examples
//!
//! ```
//! use filters::{IgnoreIndex, RuleSet};
//! use std::path::Path;
//!
//! let mut index = IgnoreIndex::new("/src", ".gitignore");
//! let rules = RuleSet::from_lines(["*.tmp", "!keep.tmp"]);
//! index.insert_rule_set(Path::new("/src/.gitignore"), rules);
//!
//! assert!(index.is_ignored(Path::new("/src/build.tmp")));
//! assert!(!index.is_ignored(Path::new("/src/keep.tmp")));
//! assert!(!index.is_ignored(Path::new("/src/main.rs")));
//! ```

mod error;
mod index;
mod line;
mod rule_set;

pub use error::{PatternError, ReadError};
pub use index::IgnoreIndex;
pub use line::{GlobRule, ParsedLine, parse_line};
pub use rule_set::RuleSet;

#[cfg(test)]
mod tests;
