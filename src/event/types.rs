//! Event data model: the timed MIDI messages a track is made of.
//!
//! An [`Event`] pairs a message with the ticks elapsed since the previous
//! event on the same track. Values are kept as raw bytes; range checks happen
//! at configuration time and again when the event is serialized.

/// The message carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ProgramChange { channel: u8, program: u8 },
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    /// Set Tempo meta event, in microseconds per beat.
    Tempo { micros_per_beat: u32 },
}

/// A single event on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Ticks since the previous event on the same track.
    pub delta_time: u32,
    pub kind: EventKind,
}

impl Event {
    pub fn tempo(delta_time: u32, micros_per_beat: u32) -> Self {
        Self {
            delta_time,
            kind: EventKind::Tempo { micros_per_beat },
        }
    }

    pub fn program_change(delta_time: u32, channel: u8, program: u8) -> Self {
        Self {
            delta_time,
            kind: EventKind::ProgramChange { channel, program },
        }
    }

    pub fn note_on(delta_time: u32, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            delta_time,
            kind: EventKind::NoteOn {
                channel,
                note,
                velocity,
            },
        }
    }

    pub fn note_off(delta_time: u32, channel: u8, note: u8) -> Self {
        Self {
            delta_time,
            kind: EventKind::NoteOff {
                channel,
                note,
                velocity: 0,
            },
        }
    }

    /// The `(channel, note)` pair of a note event.
    pub fn note_key(&self) -> Option<(u8, u8)> {
        match self.kind {
            EventKind::NoteOn { channel, note, .. } | EventKind::NoteOff { channel, note, .. } => {
                Some((channel, note))
            }
            _ => None,
        }
    }

    pub fn is_note_on(&self) -> bool {
        matches!(self.kind, EventKind::NoteOn { .. })
    }
}
