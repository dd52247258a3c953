use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, select};
use filters::IgnoreIndex;
use tracing::{debug, info, warn};
use transport::RemoteSink;
use watch::FsEvent;

/// Configuration of one watch session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Local directory tree being watched (absolute).
    pub root: PathBuf,
    /// Remote ssh endpoint in `user@host` form.
    pub endpoint: String,
    /// Remote directory every mirrored path is mapped under.
    pub remote_root: PathBuf,
    /// Ignore-file name honoured while classifying paths.
    pub ignore_file: String,
    /// Mirror all non-ignored files before watching.
    pub init_remote: bool,
}

/// Lifecycle of a watch session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Building the ignore index; optionally mirroring the existing tree.
    Initializing,
    /// Consuming filesystem events.
    Watching,
    /// Terminal: the stop signal arrived and the event stream is released.
    Stopped,
}

/// Per-session coordinator owning the ignore index and the remote sink.
#[derive(Debug)]
pub struct Session<S> {
    config: SessionConfig,
    index: IgnoreIndex,
    sink: S,
    state: SessionState,
}

impl<S: RemoteSink> Session<S> {
    /// Creates a session and builds its ignore index from the tree.
    ///
    /// Unreadable ignore files are skipped with a warning; they do not
    /// prevent the session from starting.
    pub fn new(config: SessionConfig, sink: S) -> Self {
        let mut index = IgnoreIndex::new(&config.root, &config.ignore_file);
        index.build();
        info!(
            root = %config.root.display(),
            ignore_files = index.len(),
            "ignore index built"
        );
        Self {
            config,
            index,
            sink,
            state: SessionState::Initializing,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read access to the session's ignore index.
    #[must_use]
    pub fn index(&self) -> &IgnoreIndex {
        &self.index
    }

    /// Consumes events until the stream ends or `stop` fires.
    ///
    /// Each event is processed to completion, including any index update,
    /// before the next one is accepted.
    pub fn run(&mut self, events: &Receiver<FsEvent>, stop: &Receiver<()>) {
        if self.config.init_remote {
            self.initial_mirror();
        }
        self.state = SessionState::Watching;
        info!(
            root = %self.config.root.display(),
            endpoint = %self.config.endpoint,
            "watching for changes"
        );
        loop {
            select! {
                recv(events) -> event => match event {
                    Ok(event) => self.handle_event(event),
                    Err(_) => break,
                },
                recv(stop) -> _ => break,
            }
        }
        self.state = SessionState::Stopped;
        info!("watch session stopped");
    }

    /// Mirrors every non-ignored file under the root to the remote.
    ///
    /// Best-effort: unreadable subtrees are skipped and sink outcomes are
    /// not awaited, so individual failures never block the transition to
    /// watching.
    pub fn initial_mirror(&mut self) {
        info!(
            remote = %self.config.remote_root.display(),
            "mirroring existing files to the remote"
        );
        for file in walk::files_under(&self.config.root) {
            if self.index.is_ignored(&file) {
                continue;
            }
            self.mirror_file(&file);
        }
    }

    /// Classifies one event and drives the sink accordingly.
    pub fn handle_event(&mut self, event: FsEvent) {
        match event {
            FsEvent::Created { path, is_dir } => self.on_created(&path, is_dir),
            FsEvent::Modified { path } => self.on_file_changed(&path),
            FsEvent::Deleted { path } => self.on_deleted(&path),
            FsEvent::Moved { src, dest } => self.on_moved(&src, &dest),
        }
    }

    fn on_created(&mut self, path: &Path, is_dir: bool) {
        if self.index.is_ignored(path) {
            debug!(path = %path.display(), "ignoring created path");
            return;
        }
        if is_dir {
            self.sink
                .ensure_dir(&self.config.endpoint, &self.map_remote(path));
        } else {
            self.on_file_changed(path);
        }
    }

    fn on_file_changed(&mut self, path: &Path) {
        if self.index.is_ignored(path) {
            debug!(path = %path.display(), "ignoring changed path");
            return;
        }
        if self.is_ignore_file(path) {
            // Refresh the rules before mirroring so events that follow see
            // the new content.
            if let Err(error) = self.index.insert_or_replace(path) {
                warn!(%error, "could not reload ignore file");
            }
        }
        self.mirror_file(path);
    }

    fn on_deleted(&mut self, path: &Path) {
        // Classification uses the pre-deletion rule state.
        if self.index.is_ignored(path) {
            debug!(path = %path.display(), "ignoring deleted path");
            return;
        }
        if self.is_ignore_file(path) {
            self.index.remove(path);
        }
        self.sink
            .remove(&self.config.endpoint, &self.map_remote(path));
    }

    fn on_moved(&mut self, src: &Path, dest: &Path) {
        let src_ignored = self.index.is_ignored(src);
        let dest_ignored = self.index.is_ignored(dest);
        if src_ignored && dest_ignored {
            debug!(src = %src.display(), dest = %dest.display(), "ignoring move");
        } else if dest_ignored {
            // The destination is no longer tracked: treat as a deletion.
            self.sink
                .remove(&self.config.endpoint, &self.map_remote(src));
        } else if src_ignored {
            // The source was never mirrored: treat as new content.
            self.mirror_file(dest);
        } else {
            self.sink.rename(
                &self.config.endpoint,
                &self.map_remote(src),
                &self.map_remote(dest),
            );
        }
        // A move can relocate or rename ignore files in ways too complex to
        // patch incrementally; rebuild the whole index.
        self.index.build();
    }

    fn mirror_file(&self, path: &Path) {
        let remote = self.map_remote(path);
        if let Some(parent) = remote.parent() {
            self.sink.ensure_dir(&self.config.endpoint, parent);
        }
        self.sink.copy(&self.config.endpoint, path, &remote);
    }

    /// Maps a local path to its remote counterpart by swapping the watch
    /// root for the remote root.
    fn map_remote(&self, local: &Path) -> PathBuf {
        // Events are only delivered for paths under the watch root.
        let relative = local.strip_prefix(&self.config.root).unwrap_or(local);
        self.config.remote_root.join(relative)
    }

    fn is_ignore_file(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == self.config.ignore_file.as_str())
    }
}
