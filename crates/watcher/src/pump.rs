//! Read/decode/describe loop
//!
//! Blocks on the source for a batch, decodes it, writes one line per event,
//! and goes back to waiting. There is no terminal state: the loop ends only
//! when something fails.

use crate::error::WatchError;
use crate::source::EventSource;
use inwatch_core::{decode, RawEventBatch};
use std::convert::Infallible;
use std::io::Write;
use tracing::warn;

/// Drives one watch target from source to output
pub struct EventPump<S, W> {
    source: S,
    target: String,
    out: W,
    batch: RawEventBatch,
}

impl<S: EventSource, W: Write> EventPump<S, W> {
    /// `target` is the watched path, used as the subject of unnamed events
    pub fn new(source: S, target: impl Into<String>, out: W) -> Self {
        Self {
            source,
            target: target.into(),
            out,
            batch: RawEventBatch::default(),
        }
    }

    /// Replace the batch buffer (e.g. to change its initial capacity)
    pub fn with_batch(mut self, batch: RawEventBatch) -> Self {
        self.batch = batch;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Read one batch and write a line for each event in it
    ///
    /// Returns the number of lines written. Lines for records preceding a
    /// malformed one are written before the error is returned.
    pub fn pump_once(&mut self) -> Result<usize, WatchError> {
        self.source.read_batch(&mut self.batch)?;

        let mut written = 0;
        for described in decode(&self.batch).described(&self.target) {
            let described = described?;
            let mask = described.event.mask;
            if mask.is_overflow() {
                warn!("Event queue overflowed, some events were lost");
            }
            if mask.is_ignored() {
                warn!("Watch {} was removed", described.event.wd);
            }

            writeln!(self.out, "{}", described)?;
            written += 1;
        }
        self.out.flush()?;

        Ok(written)
    }

    /// Pump batches until an error occurs
    pub fn run(mut self) -> Result<Infallible, WatchError> {
        loop {
            self.pump_once()?;
        }
    }

    pub fn into_parts(self) -> (S, W) {
        (self.source, self.out)
    }
}
