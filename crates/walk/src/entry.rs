use std::fs::FileType;
use std::path::{Path, PathBuf};

/// One filesystem entry yielded by the walker.
#[derive(Debug)]
pub struct WalkEntry {
    pub(crate) path: PathBuf,
    pub(crate) file_type: FileType,
}

impl WalkEntry {
    /// Full path of the entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the entry, returning its path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// File type as reported without following symbolic links.
    #[must_use]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }
}
