use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error produced when an ignore-file line cannot be compiled into a matcher.
#[derive(Debug)]
pub struct PatternError {
    pattern: String,
    source: globset::Error,
}

impl PatternError {
    pub(crate) fn new(pattern: String, source: globset::Error) -> Self {
        Self { pattern, source }
    }

    /// Returns the offending pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to compile ignore pattern '{}': {}",
            self.pattern, self.source
        )
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Error produced when an ignore file cannot be read.
///
/// Ignore files can disappear between discovery and reading; callers are
/// expected to log the failure and continue with the remaining files.
#[derive(Debug)]
pub struct ReadError {
    path: PathBuf,
    source: io::Error,
}

impl ReadError {
    pub(crate) fn new(path: PathBuf, source: io::Error) -> Self {
        Self { path, source }
    }

    /// Returns the path that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to read ignore file '{}': {}",
            self.path.display(),
            self.source
        )
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
