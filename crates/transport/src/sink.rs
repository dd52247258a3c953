use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

/// Remote side-effecting operations consumed by the sync coordinator.
///
/// Every operation is fire-and-forget: implementations must not block the
/// caller on completion and callers never observe an outcome. `target` is
/// the ssh endpoint in `user@host` form.
pub trait RemoteSink {
    /// Ensures the remote directory `path` exists, creating parents.
    fn ensure_dir(&self, target: &str, path: &Path);

    /// Copies the local file at `local` to `remote` on the target.
    fn copy(&self, target: &str, local: &Path, remote: &Path);

    /// Removes the remote path, recursively when it is a directory.
    fn remove(&self, target: &str, path: &Path);

    /// Renames `src` to `dst` on the target.
    fn rename(&self, target: &str, src: &Path, dst: &Path);
}

/// [`RemoteSink`] backed by the system `ssh` and `rsync` binaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct SshSink;

impl SshSink {
    /// Creates a sink; [`crate::ensure_tools`] should have passed first.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn remote_shell(&self, target: &str, command: String) {
        debug!(target, %command, "spawning remote shell command");
        let mut ssh = Command::new("ssh");
        ssh.arg(target).arg(command);
        spawn_detached(ssh);
    }
}

impl RemoteSink for SshSink {
    fn ensure_dir(&self, target: &str, path: &Path) {
        self.remote_shell(target, format!("mkdir -p {}", quoted(path)));
    }

    fn copy(&self, target: &str, local: &Path, remote: &Path) {
        debug!(target, local = %local.display(), remote = %remote.display(), "spawning rsync");
        let mut rsync = Command::new("rsync");
        rsync
            .arg("-avz")
            .arg(local)
            .arg(format!("{target}:{}", remote.display()));
        spawn_detached(rsync);
    }

    fn remove(&self, target: &str, path: &Path) {
        self.remote_shell(target, format!("rm -rf {}", quoted(path)));
    }

    fn rename(&self, target: &str, src: &Path, dst: &Path) {
        self.remote_shell(target, format!("mv {} {}", quoted(src), quoted(dst)));
    }
}

/// Spawns `command` without waiting for it.
///
/// The child is reaped on a detached thread; its exit status is never
/// consumed, preserving the fire-and-forget sink contract.
fn spawn_detached(mut command: Command) {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    match command.spawn() {
        Ok(mut child) => {
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Err(error) => warn!(%error, ?command, "failed to spawn remote command"),
    }
}

/// Quotes `path` for inclusion in a remote shell command line.
fn quoted(path: &Path) -> String {
    let text = path.to_string_lossy();
    let plain = !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b'.' | b'_' | b'-' | b'+'));
    if plain {
        text.into_owned()
    } else {
        format!("'{}'", text.replace('\'', r"'\''"))
    }
}
