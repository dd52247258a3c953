#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line frontend of `rmirror`. It parses the
//! `SRC user@host:/path` operands, installs the logging subscriber, verifies
//! that the external tools the transport depends on are present, wires the
//! event source to a watch session, and converts Unix signals into the
//! session's cooperative stop signal.
//!
//! The heavy lifting lives elsewhere: classification in `filters`, event
//! translation in `watch`, dispatch in `engine`, and remote side effects in
//! `transport`.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossbeam_channel::{Sender, bounded};
use engine::{Session, SessionConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use transport::{RemoteTarget, SshSink, ensure_tools};
use watch::FsWatcher;

/// Watch a directory tree and mirror changes to a remote host over ssh.
#[derive(Debug, Parser)]
#[command(name = "rmirror", version)]
struct Args {
    /// Local directory tree to watch
    src: PathBuf,

    /// Remote destination in user@host:/path form
    dest: RemoteTarget,

    /// Mirror all non-ignored files to the remote before watching
    #[arg(long)]
    init_remote: bool,

    /// Ignore-file name honoured while classifying paths
    #[arg(long, default_value = ".gitignore")]
    ignore_file: String,
}

/// Entry point invoked by the `rmirror` binary.
pub fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return ExitCode::from(2);
        }
    };
    init_tracing();

    // A missing tool is the only fatal error once arguments parse; it is
    // reported before any watching begins.
    if let Err(error) = ensure_tools() {
        error!(%error, "cannot start");
        return ExitCode::FAILURE;
    }

    let root = match args.src.canonicalize() {
        Ok(root) if root.is_dir() => root,
        Ok(root) => {
            error!(path = %root.display(), "watch root is not a directory");
            return ExitCode::FAILURE;
        }
        Err(source) => {
            error!(path = %args.src.display(), %source, "cannot resolve watch root");
            return ExitCode::FAILURE;
        }
    };

    let (watcher, events) = match FsWatcher::subscribe(&root) {
        Ok(subscription) => subscription,
        Err(error) => {
            error!(%error, "cannot watch the tree");
            return ExitCode::FAILURE;
        }
    };

    let (stop_tx, stop_rx) = bounded(1);
    // Keep one sender alive locally so the stop channel never reports
    // disconnection while the session runs.
    let _keepalive = stop_tx.clone();
    install_stop_handler(stop_tx);

    let mut session = Session::new(
        SessionConfig {
            root,
            endpoint: args.dest.endpoint().to_owned(),
            remote_root: args.dest.root().to_path_buf(),
            ignore_file: args.ignore_file,
            init_remote: args.init_remote,
        },
        SshSink::new(),
    );
    session.run(&events, &stop_rx);

    drop(watcher);
    info!("rmirror stopped");
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(unix)]
fn install_stop_handler(stop: Sender<()>) {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use tracing::warn;

    match Signals::new([SIGINT, SIGTERM]) {
        Ok(mut signals) => {
            std::thread::spawn(move || {
                if signals.forever().next().is_some() {
                    let _ = stop.send(());
                }
            });
        }
        Err(error) => warn!(%error, "could not install the signal handler"),
    }
}

#[cfg(not(unix))]
fn install_stop_handler(_stop: Sender<()>) {}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parses_operands_and_defaults() {
        let args = Args::try_parse_from(["rmirror", "src", "user@host:/srv/mirror"]).unwrap();
        assert_eq!(args.src.to_str(), Some("src"));
        assert_eq!(args.dest.endpoint(), "user@host");
        assert_eq!(args.ignore_file, ".gitignore");
        assert!(!args.init_remote);
    }

    #[test]
    fn accepts_init_remote_and_ignore_file_flags() {
        let args = Args::try_parse_from([
            "rmirror",
            "--init-remote",
            "--ignore-file",
            ".mirrorignore",
            "src",
            "user@host:/srv/mirror",
        ])
        .unwrap();
        assert!(args.init_remote);
        assert_eq!(args.ignore_file, ".mirrorignore");
    }

    #[test]
    fn rejects_destinations_without_a_path() {
        assert!(Args::try_parse_from(["rmirror", "src", "user@host"]).is_err());
        assert!(Args::try_parse_from(["rmirror", "src"]).is_err());
    }
}
