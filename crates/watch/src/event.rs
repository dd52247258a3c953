use std::path::PathBuf;

use notify::event::{CreateKind, EventKind, ModifyKind, RenameMode};
use tracing::debug;

/// Typed filesystem change consumed by the sync coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsEvent {
    /// A file or directory appeared.
    Created {
        /// Absolute path of the new entry.
        path: PathBuf,
        /// `true` when the entry is a directory.
        is_dir: bool,
    },
    /// A file's content changed.
    Modified {
        /// Absolute path of the changed file.
        path: PathBuf,
    },
    /// A file or directory disappeared.
    Deleted {
        /// Absolute path of the removed entry.
        path: PathBuf,
    },
    /// An entry moved within the watched tree.
    Moved {
        /// Absolute path the entry moved from.
        src: PathBuf,
        /// Absolute path the entry moved to.
        dest: PathBuf,
    },
}

/// Translates one backend event into zero or more [`FsEvent`]s.
///
/// Directory-content and metadata-only notifications are dropped; renames
/// reported with a single endpoint degrade to delete or create.
pub(crate) fn translate(event: notify::Event) -> Vec<FsEvent> {
    match event.kind {
        EventKind::Create(kind) => event
            .paths
            .into_iter()
            .map(|path| {
                let is_dir = match kind {
                    CreateKind::Folder => true,
                    CreateKind::File => false,
                    _ => path.is_dir(),
                };
                FsEvent::Created { path, is_dir }
            })
            .collect(),
        EventKind::Remove(_) => event
            .paths
            .into_iter()
            .map(|path| FsEvent::Deleted { path })
            .collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => translate_rename(mode, event.paths),
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => event
            .paths
            .into_iter()
            .filter(|path| !path.is_dir())
            .map(|path| FsEvent::Modified { path })
            .collect(),
        _ => Vec::new(),
    }
}

fn translate_rename(mode: RenameMode, mut paths: Vec<PathBuf>) -> Vec<FsEvent> {
    match mode {
        RenameMode::Both | RenameMode::Any | RenameMode::Other if paths.len() == 2 => {
            let dest = paths.pop().unwrap_or_default();
            let src = paths.pop().unwrap_or_default();
            vec![FsEvent::Moved { src, dest }]
        }
        RenameMode::From => paths
            .into_iter()
            .map(|path| FsEvent::Deleted { path })
            .collect(),
        RenameMode::To => paths
            .into_iter()
            .map(|path| {
                let is_dir = path.is_dir();
                FsEvent::Created { path, is_dir }
            })
            .collect(),
        other => {
            debug!(?other, ?paths, "dropping rename event without endpoints");
            Vec::new()
        }
    }
}
