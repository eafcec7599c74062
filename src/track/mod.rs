//! Track assembly: per-role event streams framed with their tempo and
//! program-change preamble, collected into a [`Composition`].

pub mod composer;

pub use composer::{compose, Composer};

use crate::event::{find_unbalanced, Event};
use crate::instrument::{Program, Role};

/// One instrument's ordered event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub role: Role,
    pub events: Vec<Event>,
}

impl Track {
    /// The first `(channel, note)` whose note-on/note-off pairing is broken.
    pub fn unbalanced_note(&self) -> Option<(u8, u8)> {
        find_unbalanced(&self.events)
    }

    /// Number of note-on events.
    pub fn note_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_note_on()).count()
    }
}

/// Frame a role's encoded notes into a track.
///
/// A tempo event always comes first. Melodic roles follow it with a program
/// change; percussion has none since its channel plays the default drum kit.
/// Note events are kept in order with their delta times untouched.
pub fn assemble(role: Role, program: Option<Program>, tempo: u32, notes: Vec<Event>) -> Track {
    let mut events = Vec::with_capacity(notes.len() + 2);
    events.push(Event::tempo(0, tempo));
    match program {
        Some(program) if role != Role::Percussion => {
            events.push(Event::program_change(0, role.channel(), program.number()));
        }
        _ => {}
    }
    events.extend(notes);
    Track { role, events }
}

/// A complete multi-track piece, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub ticks_per_beat: u16,
    /// Microseconds per beat, replicated on every track.
    pub tempo: u32,
    /// In [`Role::ALL`] order.
    pub tracks: Vec<Track>,
}

impl Composition {
    pub fn track(&self, role: Role) -> Option<&Track> {
        self.tracks.iter().find(|t| t.role == role)
    }
}
