//! Decoding of raw inotify record batches
//!
//! A batch is a back-to-back sequence of variable-length records (see
//! [`crate::batch`]). The decoder walks it with a cursor and yields one
//! [`Event`] per record. A record that would run past the end of the batch
//! is an error: continuing would misread every following record.

use crate::batch::{RawEventBatch, HEADER_LEN};
use crate::event::{DescribedEvent, Event};
use crate::mask::EventMask;
use crate::report::describe;
use tracing::debug;

/// Malformed record inside a batch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated record header at offset {offset}: {remaining} bytes left, need 16")]
    TruncatedHeader { offset: usize, remaining: usize },

    #[error("record at offset {offset} declares a {name_len}-byte name but only {remaining} bytes follow its header")]
    TruncatedName {
        offset: usize,
        name_len: usize,
        remaining: usize,
    },
}

/// Decode every record in `batch`
///
/// The returned iterator is lazy and finite. After yielding an error it
/// yields nothing more.
pub fn decode(batch: &RawEventBatch) -> EventDecoder<'_> {
    EventDecoder::new(batch.as_bytes())
}

/// Cursor over the records of one batch
#[derive(Debug, Clone)]
pub struct EventDecoder<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> EventDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            failed: false,
        }
    }

    /// Byte offset of the next record
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Describe each event as it is decoded
    ///
    /// `target` stands in as the subject of events that carry no name.
    pub fn described(self, target: &'a str) -> impl Iterator<Item = Result<DescribedEvent, DecodeError>> + 'a {
        self.map(move |event| {
            event.map(|event| {
                let line = describe(&event, target);
                DescribedEvent { event, line }
            })
        })
    }

    fn decode_at(&self, offset: usize) -> Result<(Event, usize), DecodeError> {
        let remaining = self.bytes.len() - offset;
        if remaining < HEADER_LEN {
            return Err(DecodeError::TruncatedHeader { offset, remaining });
        }

        let header = &self.bytes[offset..offset + HEADER_LEN];
        let wd = read_u32(header, 0) as i32;
        let mask = EventMask::from_bits_retain(read_u32(header, 4));
        let cookie = read_u32(header, 8);
        let name_len = read_u32(header, 12) as usize;

        let after_header = remaining - HEADER_LEN;
        if name_len > after_header {
            return Err(DecodeError::TruncatedName {
                offset,
                name_len,
                remaining: after_header,
            });
        }

        let name_start = offset + HEADER_LEN;
        let name = decode_name(&self.bytes[name_start..name_start + name_len]);

        debug!(
            "wd={} mask={:#x} cookie={} len={} dir={} name={:?}",
            wd,
            mask.bits(),
            cookie,
            name_len,
            if mask.is_dir() { "yes" } else { "no" },
            name
        );

        let event = Event {
            wd,
            mask,
            cookie,
            name,
        };
        Ok((event, HEADER_LEN + name_len))
    }
}

impl Iterator for EventDecoder<'_> {
    type Item = Result<Event, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }

        match self.decode_at(self.offset) {
            Ok((event, consumed)) => {
                self.offset += consumed;
                Some(Ok(event))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for EventDecoder<'_> {}

/// Name bytes up to the first NUL; `None` when nothing precedes it
fn decode_name(raw: &[u8]) -> Option<String> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    if end == 0 {
        return None;
    }
    Some(String::from_utf8_lossy(&raw[..end]).into_owned())
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_ne_bytes(word)
}
