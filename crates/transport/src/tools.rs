use std::env;
use std::ffi::OsStr;
use std::path::Path;

use crate::TransportError;

/// External tools a mirror session depends on.
pub const REQUIRED_TOOLS: [&str; 2] = ["ssh", "rsync"];

/// Verifies that every required tool is present on `PATH`.
///
/// Called once at session startup; a missing tool is the only fatal
/// transport error, reported before any watching begins.
pub fn ensure_tools() -> Result<(), TransportError> {
    let path = env::var_os("PATH").unwrap_or_default();
    for tool in REQUIRED_TOOLS {
        if !tool_in(&path, tool) {
            return Err(TransportError::MissingTool { tool });
        }
    }
    Ok(())
}

/// Returns `true` if an executable named `tool` exists in any entry of the
/// `PATH`-style list `path`.
fn tool_in(path: &OsStr, tool: &str) -> bool {
    env::split_paths(path).any(|dir| is_executable(&dir.join(tool)))
}

#[cfg(unix)]
fn is_executable(candidate: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    candidate
        .metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(candidate: &Path) -> bool {
    candidate.is_file()
}
