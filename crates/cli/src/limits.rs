//! Process resource limits

use nix::libc::rlim_t;
use nix::sys::resource::{setrlimit, Resource};
use tracing::{debug, warn};

/// Request new RLIMIT_NOFILE soft/hard limits
///
/// Failure is logged and otherwise ignored; watching one target does not
/// depend on it. Returns whether the limits were applied.
pub fn set_nofile(soft: u64, hard: u64) -> bool {
    match setrlimit(Resource::RLIMIT_NOFILE, soft as rlim_t, hard as rlim_t) {
        Ok(()) => {
            debug!("RLIMIT_NOFILE set to {}/{}", soft, hard);
            true
        }
        Err(e) => {
            warn!("Could not set RLIMIT_NOFILE to {}/{}: {}", soft, hard, e);
            false
        }
    }
}
