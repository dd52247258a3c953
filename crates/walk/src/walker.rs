use std::collections::VecDeque;
use std::fs::{self, ReadDir};
use std::path::PathBuf;

use crate::entry::WalkEntry;
use crate::error::WalkError;

/// Breadth-first iterator over the entries below a root directory.
///
/// Directories are visited from an explicit queue rather than by recursion,
/// so traversal depth is bounded only by available memory. Symbolic links
/// are yielded like any other entry but never descended into.
pub struct Walker {
    queue: VecDeque<PathBuf>,
    current_dir: PathBuf,
    current: Option<ReadDir>,
}

impl Walker {
    /// Creates a walker over the tree rooted at `root`.
    ///
    /// The root itself is not yielded. A missing or unreadable root surfaces
    /// as a single [`WalkError`] item.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root.into());
        Self {
            queue,
            current_dir: PathBuf::new(),
            current: None,
        }
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(read_dir) = self.current.as_mut() {
                match read_dir.next() {
                    Some(Ok(entry)) => {
                        let path = entry.path();
                        let file_type = match entry.file_type() {
                            Ok(file_type) => file_type,
                            Err(source) => return Some(Err(WalkError::file_type(path, source))),
                        };
                        if file_type.is_dir() {
                            self.queue.push_back(path.clone());
                        }
                        return Some(Ok(WalkEntry { path, file_type }));
                    }
                    Some(Err(source)) => {
                        return Some(Err(WalkError::read_dir_entry(
                            self.current_dir.clone(),
                            source,
                        )));
                    }
                    None => {
                        self.current = None;
                    }
                }
            } else {
                let dir = self.queue.pop_front()?;
                match fs::read_dir(&dir) {
                    Ok(read_dir) => {
                        self.current_dir = dir;
                        self.current = Some(read_dir);
                    }
                    Err(source) => return Some(Err(WalkError::read_dir(dir, source))),
                }
            }
        }
    }
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("queue", &self.queue)
            .field("current_dir", &self.current_dir)
            .finish_non_exhaustive()
    }
}
