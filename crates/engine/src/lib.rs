#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` is the dispatch coordinator of `rmirror`: it owns the ignore
//! index for one watch session, classifies every incoming filesystem event,
//! and drives the remote sink for paths that survive classification. Changes
//! to ignore files feed back into the index so the session's view of the
//! rules tracks the tree as it evolves.
//!
//! # Design
//!
//! - [`Session`] is the per-session state machine:
//!   `Initializing -> Watching -> Stopped`. `Initializing` optionally
//!   mirrors every non-ignored file wholesale before any event is consumed.
//! - The session processes one event to completion before accepting the
//!   next; the ignore index is exclusively owned by the session's thread of
//!   control and no locking is needed.
//! - Sink calls are fire-and-forget (see [`transport::RemoteSink`]); a
//!   failing remote operation never stalls or terminates the loop.
//! - Ignore-file edits update the index incrementally; moves rebuild it
//!   wholesale, since a move can relocate or rename ignore files in ways too
//!   complex to patch entry by entry.
//!
//! # Invariants
//!
//! - Per-event failures are logged and never terminate the watch loop.
//! - Every local path is mapped to the remote by replacing the watch-root
//!   prefix with the remote root, preserving the relative suffix.
//! - `Stopped` is terminal: once the stop signal arrives no further events
//!   are consumed.

mod session;

pub use session::{Session, SessionConfig, SessionState};
