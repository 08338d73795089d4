//! Owned buffer holding one batch of raw inotify records
//!
//! Record layout (`struct inotify_event`, native endianness):
//!
//! ```text
//! wd: i32 | mask: u32 | cookie: u32 | len: u32 | name: [u8; len]
//! ```
//!
//! `name` is NUL-terminated and NUL-padded; `len` counts the padding.

use crate::mask::EventMask;

/// Size of the fixed record header
pub const HEADER_LEN: usize = 16;

/// Longest file name the kernel will report (without the terminating NUL)
pub const NAME_MAX: usize = 255;

/// Largest possible single record
pub const MAX_RECORD_LEN: usize = HEADER_LEN + NAME_MAX + 1;

/// Initial batch capacity, in maximum-size records
pub const DEFAULT_BATCH_EVENTS: usize = 1024;

/// Hard ceiling for a batch buffer
pub const MAX_BATCH_BYTES: usize = 16 * 1024 * 1024;

/// Buffer for one read from the watch handle
///
/// Only the first `len()` bytes are meaningful; the rest is spare capacity
/// for the next read.
#[derive(Debug, Clone)]
pub struct RawEventBatch {
    buf: Vec<u8>,
    len: usize,
}

impl RawEventBatch {
    /// Create a batch with room for `events` maximum-size records
    pub fn with_capacity_for(events: usize) -> Self {
        let bytes = events.max(1).saturating_mul(MAX_RECORD_LEN).min(MAX_BATCH_BYTES);
        Self {
            buf: vec![0; bytes],
            len: 0,
        }
    }

    /// Wrap bytes that already hold records
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self { buf: bytes, len }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The logical contents (what the last read returned)
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Discard contents and hand out the whole buffer for a read
    ///
    /// Call [`set_len`](Self::set_len) with the byte count the read returned.
    pub fn read_buffer(&mut self) -> &mut [u8] {
        self.len = 0;
        &mut self.buf
    }

    /// Record how many bytes the last read stored (clamped to capacity)
    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(self.buf.len());
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Double the capacity, up to [`MAX_BATCH_BYTES`]
    ///
    /// Returns false when the buffer is already at the ceiling.
    pub fn grow(&mut self) -> bool {
        let current = self.buf.len();
        if current >= MAX_BATCH_BYTES {
            return false;
        }
        let next = current.saturating_mul(2).clamp(MAX_RECORD_LEN, MAX_BATCH_BYTES);
        self.buf.resize(next, 0);
        true
    }

    /// Append one record laid out the way the kernel writes it
    ///
    /// A non-empty name is NUL-terminated and padded to a multiple of the
    /// header size; an empty name produces a record with `len == 0`.
    pub fn push_record(&mut self, wd: i32, mask: EventMask, cookie: u32, name: &str) -> &mut Self {
        let name_len = if name.is_empty() {
            0
        } else {
            (name.len() + 1).div_ceil(HEADER_LEN) * HEADER_LEN
        };

        self.buf.truncate(self.len);
        self.buf.reserve(HEADER_LEN + name_len);
        self.buf.extend_from_slice(&wd.to_ne_bytes());
        self.buf.extend_from_slice(&mask.bits().to_ne_bytes());
        self.buf.extend_from_slice(&cookie.to_ne_bytes());
        self.buf.extend_from_slice(&(name_len as u32).to_ne_bytes());
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.resize(self.len + HEADER_LEN + name_len, 0);
        self.len = self.buf.len();
        self
    }
}

impl Default for RawEventBatch {
    fn default() -> Self {
        Self::with_capacity_for(DEFAULT_BATCH_EVENTS)
    }
}
