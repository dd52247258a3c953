use globset::{Glob, GlobMatcher};

use crate::PatternError;

/// Compiled glob matcher together with the pattern text it was built from.
#[derive(Clone, Debug)]
pub struct GlobRule {
    pattern: String,
    matcher: GlobMatcher,
}

impl GlobRule {
    /// Compiles `pattern` into a full-string glob matcher.
    ///
    /// An empty pattern is legal and matches only the empty string.
    pub fn new(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let pattern = pattern.into();
        let glob =
            Glob::new(&pattern).map_err(|source| PatternError::new(pattern.clone(), source))?;
        Ok(Self {
            matcher: glob.compile_matcher(),
            pattern,
        })
    }

    /// Returns `true` if `text` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for GlobRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for GlobRule {}

/// Classified result of compiling one ignore-file line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedLine {
    /// Blank line or comment; never stored.
    NoOp,
    /// `\#`-escaped line carrying a literal hash pattern.
    LiteralHash(String),
    /// Pattern excluding matching paths from mirroring.
    Exclude(GlobRule),
    /// Pattern re-including paths that an exclusion would suppress.
    Negate(GlobRule),
}

/// Compiles one raw ignore-file line into a [`ParsedLine`].
///
/// The transformation pipeline, applied in order:
///
/// 1. strip the trailing newline and surrounding whitespace, preserving a
///    backslash-escaped trailing space;
/// 2. unescape literal escaped spaces (`\ ` becomes ` `);
/// 3. collapse every `**` run into a single `*` (a deliberate simplification
///    of recursive globs; `*` already crosses path separators here);
/// 4. a line ending in `/` matches everything under that directory, so a
///    trailing `*` is appended;
/// 5. classify: blank and `#` lines are no-ops, `\#` lines carry the literal
///    text after the first `#`, a leading `!` negates, anything else
///    excludes. Rule lines drop remaining backslash escapes and a leading
///    `./` before glob compilation.
pub fn parse_line(raw: &str) -> Result<ParsedLine, PatternError> {
    let raw = raw.trim_end_matches(['\r', '\n']);
    let stripped = raw.trim();
    let mut line = if stripped.ends_with('\\') && raw.ends_with(' ') {
        // File names may end with an escaped space.
        format!("{stripped} ")
    } else {
        stripped.to_owned()
    };
    line = line.replace("\\ ", " ");
    line = line.replace("**", "*");
    if line.ends_with('/') {
        line.push('*');
    }

    if line.is_empty() || line.starts_with('#') {
        return Ok(ParsedLine::NoOp);
    }
    if line.starts_with("\\#") {
        let text = line.split_once('#').map_or("", |(_, rest)| rest).trim();
        return Ok(ParsedLine::LiteralHash(text.to_owned()));
    }

    let (negated, rest) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line.as_str()),
    };
    let mut pattern = rest.replace('\\', "");
    if let Some(tail) = pattern.strip_prefix("./") {
        pattern = tail.to_owned();
    }
    let rule = GlobRule::new(pattern)?;
    Ok(if negated {
        ParsedLine::Negate(rule)
    } else {
        ParsedLine::Exclude(rule)
    })
}
