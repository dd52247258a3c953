#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `transport` owns everything that touches the remote side of a mirror
//! session: parsing the `user@host:/path` destination operand, probing for
//! the external tools the session needs, and issuing the remote
//! side-effecting operations.
//!
//! # Design
//!
//! - [`RemoteTarget`] splits a destination operand into the ssh endpoint and
//!   the remote root path.
//! - [`RemoteSink`] is the seam between the sync coordinator and the
//!   transport: four operations, all fire-and-forget. The coordinator never
//!   consumes a return value, so the trait methods return nothing.
//! - [`SshSink`] implements the trait by spawning `ssh` for remote shell
//!   commands and `rsync` for file copies. Spawned children are reaped on a
//!   background thread; their exit status is never consumed, so a failing
//!   remote operation surfaces only through the tools' own diagnostics.
//! - [`ensure_tools`] fails fast at session startup when `ssh` or `rsync`
//!   is not on `PATH`. This is the only fatal transport error; everything
//!   after startup is best-effort.
//!
//! # Examples
//!
//! ```
//! use transport::RemoteTarget;
//!
//! let target: RemoteTarget = "deploy@build-host:/srv/mirror".parse().unwrap();
//! assert_eq!(target.endpoint(), "deploy@build-host");
//! assert_eq!(target.root().to_str(), Some("/srv/mirror"));
//! ```

mod sink;
mod target;
mod tools;

pub use sink::{RemoteSink, SshSink};
pub use target::RemoteTarget;
pub use tools::{REQUIRED_TOOLS, ensure_tools};

use thiserror::Error;

/// Errors surfaced while setting up the remote side of a session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A required external tool is absent from the environment.
    #[error("'{tool}' is required but was not found on PATH")]
    MissingTool {
        /// Name of the missing executable.
        tool: &'static str,
    },
    /// The destination operand is not in `user@host:/path` form.
    #[error("invalid destination '{operand}': expected user@host:/path")]
    InvalidTarget {
        /// The operand as supplied on the command line.
        operand: String,
    },
    /// The remote root parsed from the operand is empty.
    #[error("destination '{operand}' does not name a remote path")]
    MissingRemotePath {
        /// The operand as supplied on the command line.
        operand: String,
    },
}
