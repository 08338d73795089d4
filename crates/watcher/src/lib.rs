//! File system watching for inwatch
//!
//! This crate provides:
//! - An inotify watch session bound to one target (Linux)
//! - The `EventSource` seam between the read loop and the kernel
//! - The read/decode/describe loop that turns batches into output lines

pub mod error;
pub mod platform;
pub mod pump;
pub mod source;

pub use error::WatchError;
#[cfg(target_os = "linux")]
pub use platform::{InotifySession, Watch};
pub use pump::EventPump;
pub use source::EventSource;
