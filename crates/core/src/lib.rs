//! Core of inwatch: inotify mask parsing, event decoding and reporting
//!
//! This crate provides:
//! - Watch and event masks (the twelve inotify event kinds)
//! - Mask specification parsing (`IN_CREATE,IN_DELETE` -> bits)
//! - Decoding of raw inotify record batches
//! - Human-readable event descriptions
//!
//! Nothing in here talks to the kernel; see `inwatch-watcher` for that.

pub mod mask;
pub mod batch;
pub mod decode;
pub mod event;
pub mod report;

// Re-exports
pub use mask::{parse_mask, EventKind, EventMask, ParsedMask, WatchMask};
pub use batch::RawEventBatch;
pub use decode::{decode, DecodeError, EventDecoder};
pub use event::{DescribedEvent, Event};
pub use report::describe;
