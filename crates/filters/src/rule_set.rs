use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::ReadError;
use crate::line::{GlobRule, ParsedLine, parse_line};

/// All persisted rules compiled from one ignore file.
///
/// Rules are partitioned by kind and kept in file line order. No-op lines
/// are discarded during construction and never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    hashes: Vec<String>,
    negations: Vec<GlobRule>,
    exclusions: Vec<GlobRule>,
}

impl RuleSet {
    /// Builds a rule set from in-memory lines.
    ///
    /// Lines that fail glob compilation are skipped with a warning; a
    /// malformed pattern never aborts the caller.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for line in lines {
            match parse_line(line.as_ref()) {
                Ok(parsed) => set.push(parsed),
                Err(error) => warn!(%error, "skipping malformed ignore pattern"),
            }
        }
        set
    }

    /// Reads and compiles the ignore file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] when the file cannot be opened or a line cannot
    /// be read, for example because the file was deleted between discovery
    /// and this call.
    pub fn load(path: &Path) -> Result<Self, ReadError> {
        let file = File::open(path).map_err(|source| ReadError::new(path.to_path_buf(), source))?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| ReadError::new(path.to_path_buf(), source))?;
            lines.push(line);
        }
        Ok(Self::from_lines(lines))
    }

    /// Stores a parsed line, discarding no-ops.
    pub fn push(&mut self, parsed: ParsedLine) {
        match parsed {
            ParsedLine::NoOp => {}
            ParsedLine::LiteralHash(text) => self.hashes.push(text),
            ParsedLine::Negate(rule) => self.negations.push(rule),
            ParsedLine::Exclude(rule) => self.exclusions.push(rule),
        }
    }

    /// Returns `true` if the set holds no rules of any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty() && self.negations.is_empty() && self.exclusions.is_empty()
    }

    /// Literal hash patterns in file line order.
    #[must_use]
    pub fn hashes(&self) -> &[String] {
        &self.hashes
    }

    /// Negation rules in file line order.
    #[must_use]
    pub fn negations(&self) -> &[GlobRule] {
        &self.negations
    }

    /// Exclusion rules in file line order.
    #[must_use]
    pub fn exclusions(&self) -> &[GlobRule] {
        &self.exclusions
    }
}
