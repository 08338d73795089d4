//! Human-readable event descriptions

use crate::event::Event;

/// Render one event as an output line
///
/// Format: `<subject> <phrase>... [<name>]`. The subject is the entry name,
/// or `target` when the event has none; the bracketed tag always shows the
/// raw entry name and is empty for events on the target itself. Phrases
/// follow [`EventKind::ALL`](crate::mask::EventKind::ALL) order. Flags
/// outside the twelve kinds contribute nothing.
pub fn describe(event: &Event, target: &str) -> String {
    let action = event
        .mask
        .to_watch_mask()
        .kinds()
        .fold(event.subject(target).to_string(), |mut action, kind| {
            action.push(' ');
            action.push_str(kind.phrase());
            action
        });

    format!("{} [{}]", action, event.name.as_deref().unwrap_or(""))
}
