//! Watch masks and the mask specification parser
//!
//! A mask specification is a comma-separated list of inotify event names,
//! e.g. `IN_CREATE,IN_DELETE`. Each recognized name selects one bit; names
//! are combined by union. Unknown names are reported and otherwise ignored.

use bitflags::bitflags;
use std::fmt;
use tracing::{debug, warn};

bitflags! {
    /// Set of event kinds to subscribe to
    ///
    /// Bit values follow `include/uapi/linux/inotify.h`. `WatchMask::all()` is
    /// the default subscription (`IN_ALL_EVENTS`), and the empty mask means
    /// "watch nothing".
    #[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct WatchMask: u32 {
        const ACCESS = 0x0000_0001;
        const MODIFY = 0x0000_0002;
        const ATTRIB = 0x0000_0004;
        const CLOSE_WRITE = 0x0000_0008;
        const CLOSE_NOWRITE = 0x0000_0010;
        const OPEN = 0x0000_0020;
        const MOVED_FROM = 0x0000_0040;
        const MOVED_TO = 0x0000_0080;
        const CREATE = 0x0000_0100;
        const DELETE = 0x0000_0200;
        const DELETE_SELF = 0x0000_0400;
        const MOVE_SELF = 0x0000_0800;
    }
}

bitflags! {
    /// Flags carried by a delivered event
    ///
    /// A superset of [`WatchMask`]: the kernel also reports flags that cannot
    /// be subscribed to. Unknown bits are retained as delivered.
    #[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct EventMask: u32 {
        const ACCESS = 0x0000_0001;
        const MODIFY = 0x0000_0002;
        const ATTRIB = 0x0000_0004;
        const CLOSE_WRITE = 0x0000_0008;
        const CLOSE_NOWRITE = 0x0000_0010;
        const OPEN = 0x0000_0020;
        const MOVED_FROM = 0x0000_0040;
        const MOVED_TO = 0x0000_0080;
        const CREATE = 0x0000_0100;
        const DELETE = 0x0000_0200;
        const DELETE_SELF = 0x0000_0400;
        const MOVE_SELF = 0x0000_0800;

        /// Backing filesystem was unmounted
        const UNMOUNT = 0x0000_2000;
        /// Kernel event queue overflowed; events were lost
        const Q_OVERFLOW = 0x0000_4000;
        /// Watch was removed
        const IGNORED = 0x0000_8000;
        /// Subject of the event is a directory
        const ISDIR = 0x4000_0000;
    }
}

impl EventMask {
    /// The subscribable kinds present in this mask
    pub fn to_watch_mask(&self) -> WatchMask {
        WatchMask::from_bits_truncate(self.bits())
    }

    pub fn is_dir(&self) -> bool {
        self.contains(EventMask::ISDIR)
    }

    pub fn is_overflow(&self) -> bool {
        self.contains(EventMask::Q_OVERFLOW)
    }

    pub fn is_ignored(&self) -> bool {
        self.contains(EventMask::IGNORED)
    }

    pub fn is_unmount(&self) -> bool {
        self.contains(EventMask::UNMOUNT)
    }
}

impl From<WatchMask> for EventMask {
    fn from(mask: WatchMask) -> Self {
        EventMask::from_bits_retain(mask.bits())
    }
}

/// One of the twelve recognized event kinds
///
/// The declaration order is the reporting order: descriptions list phrases in
/// this order regardless of bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Access,
    Attrib,
    CloseWrite,
    CloseNowrite,
    Create,
    Delete,
    DeleteSelf,
    Modify,
    MoveSelf,
    MovedFrom,
    MovedTo,
    Open,
}

impl EventKind {
    /// Every kind, in reporting order
    pub const ALL: [EventKind; 12] = [
        EventKind::Access,
        EventKind::Attrib,
        EventKind::CloseWrite,
        EventKind::CloseNowrite,
        EventKind::Create,
        EventKind::Delete,
        EventKind::DeleteSelf,
        EventKind::Modify,
        EventKind::MoveSelf,
        EventKind::MovedFrom,
        EventKind::MovedTo,
        EventKind::Open,
    ];

    /// Symbolic name accepted in mask specifications
    pub const fn token(self) -> &'static str {
        match self {
            EventKind::Access => "IN_ACCESS",
            EventKind::Attrib => "IN_ATTRIB",
            EventKind::CloseWrite => "IN_CLOSE_WRITE",
            EventKind::CloseNowrite => "IN_CLOSE_NOWRITE",
            EventKind::Create => "IN_CREATE",
            EventKind::Delete => "IN_DELETE",
            EventKind::DeleteSelf => "IN_DELETE_SELF",
            EventKind::Modify => "IN_MODIFY",
            EventKind::MoveSelf => "IN_MOVE_SELF",
            EventKind::MovedFrom => "IN_MOVED_FROM",
            EventKind::MovedTo => "IN_MOVED_TO",
            EventKind::Open => "IN_OPEN",
        }
    }

    pub const fn flag(self) -> WatchMask {
        match self {
            EventKind::Access => WatchMask::ACCESS,
            EventKind::Attrib => WatchMask::ATTRIB,
            EventKind::CloseWrite => WatchMask::CLOSE_WRITE,
            EventKind::CloseNowrite => WatchMask::CLOSE_NOWRITE,
            EventKind::Create => WatchMask::CREATE,
            EventKind::Delete => WatchMask::DELETE,
            EventKind::DeleteSelf => WatchMask::DELETE_SELF,
            EventKind::Modify => WatchMask::MODIFY,
            EventKind::MoveSelf => WatchMask::MOVE_SELF,
            EventKind::MovedFrom => WatchMask::MOVED_FROM,
            EventKind::MovedTo => WatchMask::MOVED_TO,
            EventKind::Open => WatchMask::OPEN,
        }
    }

    /// Phrase appended to an event description when this kind fired
    pub const fn phrase(self) -> &'static str {
        match self {
            EventKind::Access => "was read",
            EventKind::Attrib => "Metadata changed",
            EventKind::CloseWrite => "opened for writing was closed",
            EventKind::CloseNowrite => "not opened for writing was closed",
            EventKind::Create => "created in watched directory",
            EventKind::Delete => "deleted from watched directory",
            EventKind::DeleteSelf => "watched file/directory was itself deleted",
            EventKind::Modify => "was modified",
            EventKind::MoveSelf => "watched file/directory was itself moved",
            EventKind::MovedFrom => "moved out of watched directory",
            EventKind::MovedTo => "moved into watched directory",
            EventKind::Open => "was opened",
        }
    }

    /// Look up a kind by its symbolic name (case-sensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

impl WatchMask {
    /// Kinds selected by this mask, in reporting order
    pub fn kinds(self) -> impl Iterator<Item = EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }

    /// Render as a mask specification that parses back to the same mask
    pub fn to_spec(&self) -> String {
        self.kinds().map(EventKind::token).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for WatchMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", self.to_spec())
        }
    }
}

/// Result of parsing a mask specification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMask {
    /// Union of every recognized token's bit
    pub mask: WatchMask,
    /// Tokens that matched no known kind, in input order
    pub unrecognized: Vec<String>,
}

/// Parse a mask specification
///
/// `None` selects every kind. Otherwise the specification is split on `,`,
/// empty tokens are skipped, and recognized tokens are OR-ed together. This
/// never fails: an all-unknown specification yields the empty mask, which
/// callers must treat as "watch nothing".
pub fn parse_mask(spec: Option<&str>) -> ParsedMask {
    let Some(spec) = spec else {
        return ParsedMask {
            mask: WatchMask::all(),
            unrecognized: Vec::new(),
        };
    };

    spec.split(',')
        .filter(|token| !token.is_empty())
        .fold(ParsedMask::default(), |mut parsed, token| {
            debug!("mask token: {}", token);
            match EventKind::from_token(token) {
                Some(kind) => parsed.mask |= kind.flag(),
                None => {
                    warn!("Ignoring unknown mask token: {}", token);
                    parsed.unrecognized.push(token.to_string());
                }
            }
            parsed
        })
}
