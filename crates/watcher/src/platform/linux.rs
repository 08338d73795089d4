//! inotify watch session
//!
//! Owns one inotify instance. Batches are read straight off the descriptor so
//! the records can be decoded by `inwatch-core` rather than by nix.

use crate::error::WatchError;
use crate::source::EventSource;
use inwatch_core::{RawEventBatch, WatchMask};
use nix::errno::Errno;
use nix::sys::inotify::{AddWatchFlags, InitFlags, Inotify, WatchDescriptor};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A registered watch
#[derive(Debug, Clone)]
pub struct Watch {
    pub wd: WatchDescriptor,
    pub path: PathBuf,
    pub mask: WatchMask,
}

/// Open connection to the inotify facility
pub struct InotifySession {
    inotify: Inotify,
    watches: Vec<Watch>,
}

impl InotifySession {
    /// Open a new inotify instance
    pub fn open() -> Result<Self, WatchError> {
        let inotify = Inotify::init(InitFlags::IN_CLOEXEC).map_err(WatchError::Init)?;
        Ok(Self {
            inotify,
            watches: Vec::new(),
        })
    }

    /// Register `path` for the kinds in `mask`
    pub fn add_watch(&mut self, path: &Path, mask: WatchMask) -> Result<WatchDescriptor, WatchError> {
        let flags = AddWatchFlags::from_bits_truncate(mask.bits());
        let wd = self
            .inotify
            .add_watch(path, flags)
            .map_err(|source| WatchError::AddWatch {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Watching {} for {}", path.display(), mask);
        self.watches.push(Watch {
            wd,
            path: path.to_path_buf(),
            mask,
        });
        Ok(wd)
    }

    pub fn watches(&self) -> &[Watch] {
        &self.watches
    }
}

impl Drop for InotifySession {
    fn drop(&mut self) {
        // nix hands out the descriptor without owning it
        if let Err(e) = nix::unistd::close(self.inotify.as_raw_fd()) {
            debug!("Failed to close inotify descriptor: {}", e);
        }
    }
}

impl EventSource for InotifySession {
    /// Blocking read of the next batch
    ///
    /// The kernel refuses a read (EINVAL) when the buffer cannot hold the
    /// next record; the batch is grown and the read retried until it fits
    /// or the batch reaches its size ceiling.
    fn read_batch(&mut self, batch: &mut RawEventBatch) -> Result<usize, WatchError> {
        let fd = self.inotify.as_raw_fd();
        loop {
            match nix::unistd::read(fd, batch.read_buffer()) {
                Ok(0) => return Err(WatchError::EndOfStream),
                Ok(n) => {
                    batch.set_len(n);
                    return Ok(n);
                }
                Err(Errno::EINTR) => continue,
                Err(Errno::EINVAL) if batch.grow() => {
                    debug!("Event batch grown to {} bytes", batch.capacity());
                }
                Err(e) => return Err(WatchError::Read(e)),
            }
        }
    }
}
