//! Decoded inotify events

use crate::mask::EventMask;
use std::fmt;

/// One decoded inotify record
///
/// Owns its name, so it may outlive the batch it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Watch descriptor the event belongs to (-1 for queue overflow)
    pub wd: i32,
    /// Flags that fired
    pub mask: EventMask,
    /// Correlates a `MOVED_FROM` with its `MOVED_TO`; 0 otherwise
    pub cookie: u32,
    /// Entry inside a watched directory, or `None` when the event concerns
    /// the watched target itself
    pub name: Option<String>,
}

impl Event {
    /// What the event is about: the entry name, or `target` when there is none
    pub fn subject<'a>(&'a self, target: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(target)
    }
}

/// An event together with its rendered description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedEvent {
    pub event: Event,
    pub line: String,
}

impl fmt::Display for DescribedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}
