//! Platform-specific watch sessions

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::{InotifySession, Watch};
