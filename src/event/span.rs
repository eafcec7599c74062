//! Note spans: a note-on and its note-off built as one unit.
//!
//! Generators never push bare note-on or note-off events. They produce
//! [`NoteSpan`]s, which flatten into a balanced event pair, so a track built
//! from spans cannot leave a note hanging.

use std::collections::HashSet;

use super::types::{Event, EventKind};

/// One sounding note: `lead_in` ticks of silence, then `length` ticks of sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteSpan {
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
    /// Ticks between the previous event and this note-on.
    pub lead_in: u32,
    /// Ticks between this note-on and its note-off.
    pub length: u32,
}

impl NoteSpan {
    /// The note-on/note-off pair for this span.
    pub fn events(&self) -> [Event; 2] {
        [
            Event::note_on(self.lead_in, self.channel, self.note, self.velocity),
            Event::note_off(self.length, self.channel, self.note),
        ]
    }
}

/// Flatten spans into a sequential event stream.
pub fn flatten(spans: impl IntoIterator<Item = NoteSpan>) -> Vec<Event> {
    spans.into_iter().flat_map(|s| s.events()).collect()
}

/// Find the first `(channel, note)` that breaks note pairing: a note-on while
/// the same key is already sounding, a note-off with nothing to stop, or a
/// note still sounding at the end of the stream.
pub fn find_unbalanced(events: &[Event]) -> Option<(u8, u8)> {
    let mut sounding = HashSet::new();
    for event in events {
        match event.kind {
            EventKind::NoteOn { channel, note, .. } => {
                if !sounding.insert((channel, note)) {
                    return Some((channel, note));
                }
            }
            EventKind::NoteOff { channel, note, .. } => {
                if !sounding.remove(&(channel, note)) {
                    return Some((channel, note));
                }
            }
            _ => {}
        }
    }
    sounding.into_iter().min()
}
