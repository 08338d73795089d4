//! Where raw event batches come from

use crate::error::WatchError;
use inwatch_core::RawEventBatch;

/// A blocking producer of raw inotify batches
pub trait EventSource {
    /// Block until events are available and store them in `batch`
    ///
    /// Returns the number of bytes stored. Implementations never return
    /// `Ok(0)`; a source with nothing more to deliver returns
    /// [`WatchError::EndOfStream`].
    fn read_batch(&mut self, batch: &mut RawEventBatch) -> Result<usize, WatchError>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn read_batch(&mut self, batch: &mut RawEventBatch) -> Result<usize, WatchError> {
        (**self).read_batch(batch)
    }
}
