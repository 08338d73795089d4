//! Errors raised while watching

use inwatch_core::DecodeError;
use nix::errno::Errno;
use std::path::PathBuf;

/// Fatal watcher failure
///
/// Every variant ends the read loop; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to initialize inotify: {0}")]
    Init(#[source] Errno),

    #[error("failed to watch {}: {source}", .path.display())]
    AddWatch {
        path: PathBuf,
        #[source]
        source: Errno,
    },

    #[error("failed to read events: {0}")]
    Read(#[source] Errno),

    #[error("event stream ended")]
    EndOfStream,

    #[error("malformed event batch: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to write event line: {0}")]
    Output(#[from] std::io::Error),
}
