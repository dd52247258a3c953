#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `watch` adapts the platform notification backends exposed by [`notify`]
//! into the closed event vocabulary the sync coordinator consumes:
//! created (with a directory flag), modified, deleted, and moved. Translated
//! events are delivered over a [`crossbeam_channel`] so the coordinator can
//! process them one at a time on its own thread of control.
//!
//! # Design
//!
//! - [`FsEvent`] is the typed event set. It is deliberately closed so the
//!   coordinator can match exhaustively.
//! - [`FsWatcher::subscribe`] installs a recursive watch on the root and
//!   returns the receiving end of the translated stream. Dropping the
//!   watcher tears the subscription down; the channel then reports
//!   disconnection and the consumer's loop ends.
//! - Translation happens inside the notify callback: rename events carrying
//!   both endpoints become [`FsEvent::Moved`], one-sided renames degrade to
//!   delete/create, metadata-only modifications and directory content
//!   notifications are dropped.

mod event;

pub use event::FsEvent;

use std::path::Path;

use crossbeam_channel::{Receiver, Sender, unbounded};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tracing::warn;

/// Errors raised while installing the filesystem subscription.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The notification backend could not be initialised.
    #[error("failed to initialise filesystem watcher: {0}")]
    Init(#[from] notify::Error),
    /// The root could not be watched.
    #[error("failed to watch '{path}': {source}")]
    Watch {
        /// Path the subscription was attempted on.
        path: String,
        /// Backend error.
        #[source]
        source: notify::Error,
    },
}

/// Owns a live recursive filesystem subscription.
///
/// Events arrive on the channel returned by [`subscribe`](Self::subscribe);
/// dropping the watcher releases the subscription.
pub struct FsWatcher {
    _watcher: RecommendedWatcher,
}

impl std::fmt::Debug for FsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsWatcher").finish_non_exhaustive()
    }
}

impl FsWatcher {
    /// Watches `root` recursively and returns the translated event stream.
    pub fn subscribe(root: &Path) -> Result<(Self, Receiver<FsEvent>), WatchError> {
        let (sender, receiver) = unbounded();
        let mut watcher = notify::recommended_watcher(move |result| forward(result, &sender))?;
        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|source| WatchError::Watch {
                path: root.display().to_string(),
                source,
            })?;
        Ok((Self { _watcher: watcher }, receiver))
    }
}

fn forward(result: notify::Result<notify::Event>, sender: &Sender<FsEvent>) {
    match result {
        Ok(event) => {
            for translated in event::translate(event) {
                // A send error means the consumer is gone; the subscription
                // is about to be dropped with it.
                if sender.send(translated).is_err() {
                    return;
                }
            }
        }
        Err(error) => warn!(%error, "filesystem watcher reported an error"),
    }
}
