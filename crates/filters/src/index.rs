use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::{ReadError, RuleSet};

/// Scoped mapping from ignore-file directories to their compiled rules.
///
/// Each ignore file governs the directory that contains it. Scope
/// directories are stored with a trailing separator and kept sorted in
/// descending lexicographic order, so the first scope that is a string
/// prefix of a path is its nearest (deepest) enclosing scope. Entries are
/// replaced wholesale when an ignore file changes; no rule set is ever
/// partially mutated.
#[derive(Clone, Debug)]
pub struct IgnoreIndex {
    root: String,
    git_prefix: String,
    file_name: String,
    rules: HashMap<String, RuleSet>,
    scopes: Vec<String>,
}

impl IgnoreIndex {
    /// Creates an empty index for the tree rooted at `root`, honouring
    /// ignore files named `file_name`.
    pub fn new(root: impl AsRef<Path>, file_name: impl Into<String>) -> Self {
        let mut root = path_text(root.as_ref());
        if !root.ends_with('/') {
            root.push('/');
        }
        let git_prefix = format!("{root}.git/");
        Self {
            root,
            git_prefix,
            file_name: file_name.into(),
            rules: HashMap::new(),
            scopes: Vec::new(),
        }
    }

    /// Rebuilds the index wholesale from the ignore files currently on disk.
    ///
    /// Unreadable ignore files are skipped with a warning; they can be
    /// deleted between discovery and reading.
    pub fn build(&mut self) {
        self.rules.clear();
        self.scopes.clear();
        for path in walk::find_named(Path::new(&self.root), &self.file_name) {
            if let Err(error) = self.insert_or_replace(&path) {
                warn!(%error, "skipping unreadable ignore file");
            }
        }
    }

    /// Compiles the ignore file at `ignore_path` and replaces any existing
    /// entry for its scope.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when the file cannot be read; the index is left
    /// unchanged in that case.
    pub fn insert_or_replace(&mut self, ignore_path: &Path) -> Result<(), ReadError> {
        let rules = RuleSet::load(ignore_path)?;
        self.insert_rule_set(ignore_path, rules);
        Ok(())
    }

    /// Replaces the rules governing `ignore_path`'s scope with `rules`.
    ///
    /// In-memory variant of [`insert_or_replace`](Self::insert_or_replace);
    /// `ignore_path` must end in the configured ignore filename.
    pub fn insert_rule_set(&mut self, ignore_path: &Path, rules: RuleSet) {
        let scope = self.scope_for(ignore_path);
        if self.rules.insert(scope.clone(), rules).is_none() {
            self.scopes.push(scope);
            self.scopes.sort_unstable_by(|a, b| b.cmp(a));
        }
    }

    /// Drops the entry for the ignore file at `ignore_path`, if present.
    pub fn remove(&mut self, ignore_path: &Path) {
        let scope = self.scope_for(ignore_path);
        if self.rules.remove(&scope).is_some() {
            self.scopes.retain(|existing| *existing != scope);
        }
    }

    /// Yields the scope directories enclosing `path`, nearest first.
    ///
    /// The sequence is recomputed per call; callers short-circuit at the
    /// first scope whose rules decide the match.
    pub fn nearest_scopes_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.scopes
            .iter()
            .map(String::as_str)
            .filter(move |scope| path.starts_with(scope))
    }

    /// Classifies `path`, returning `true` when it must not be mirrored.
    ///
    /// The `.git/` subtree of the root is always ignored. Otherwise only the
    /// nearest enclosing scope is consulted: a matching negation wins over a
    /// matching exclusion, and a path matching neither is not ignored even
    /// if a shallower scope would have excluded it.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let text = path_text(path);
        if text.starts_with(&self.git_prefix)
            || text == self.git_prefix[..self.git_prefix.len() - 1]
        {
            return true;
        }
        if let Some(scope) = self.nearest_scopes_for(&text).next() {
            let relative = &text[scope.len()..];
            if let Some(rules) = self.rules.get(scope) {
                if rules.negations().iter().any(|rule| rule.is_match(relative)) {
                    return false;
                }
                if rules.exclusions().iter().any(|rule| rule.is_match(relative)) {
                    return true;
                }
            }
        }
        false
    }

    /// Returns the rules governing `scope`, if any.
    #[must_use]
    pub fn rule_set(&self, scope: &str) -> Option<&RuleSet> {
        self.rules.get(scope)
    }

    /// Scope directories in descending lexicographic order.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns the number of tracked ignore files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when no ignore file is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Derives the scope directory string from an ignore-file path by
    /// stripping the known filename suffix.
    fn scope_for(&self, ignore_path: &Path) -> String {
        let text = path_text(ignore_path);
        assert!(
            text.ends_with(&self.file_name),
            "'{text}' does not end in the ignore filename '{}'",
            self.file_name
        );
        text[..text.len() - self.file_name.len()].to_owned()
    }
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
