#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the filesystem traversal used by `rmirror` to discover
//! ignore files and to enumerate the files mirrored by the optional initial
//! sync. Traversal is breadth-first over an explicit queue, which keeps the
//! walker stack-safe on arbitrarily deep trees. Symbolic links are reported
//! but never followed into, so a link pointing back at an ancestor cannot
//! produce a cycle.
//!
//! # Design
//!
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values; a
//!   failure to read a directory or an entry's type yields a [`WalkError`]
//!   item and traversal continues with the remaining queue.
//! - [`find_named`] and [`files_under`] apply the skip-and-log policy on top
//!   of [`Walker`]: entries that cannot be read are logged and dropped, which
//!   is the behaviour the watch loop wants since files can disappear between
//!   listing and inspection.
//!
//! # Invariants
//!
//! - Every yielded path is strictly below the traversal root; the root
//!   itself is never yielded.
//! - Directory discovery order is not significant; callers that need a
//!   defined order sort the collected results.

mod entry;
mod error;
mod walker;

pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;

use std::path::{Path, PathBuf};

use tracing::warn;

/// Collects the absolute paths of all files named `name` under `root`.
///
/// Unreadable directories and entries are logged and skipped; the scan keeps
/// going with whatever remains reachable.
#[must_use]
pub fn find_named(root: &Path, name: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in Walker::new(root) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && entry.path().file_name().is_some_and(|n| n == name)
                {
                    found.push(entry.into_path());
                }
            }
            Err(error) => warn!(%error, "skipping unreadable entry during scan"),
        }
    }
    found
}

/// Collects the absolute paths of all regular files under `root`.
///
/// Applies the same skip-and-log policy as [`find_named`].
#[must_use]
pub fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in Walker::new(root) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
            Err(error) => warn!(%error, "skipping unreadable entry during scan"),
        }
    }
    files
}

#[cfg(test)]
mod tests;
