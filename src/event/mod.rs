//! Event layer: timed MIDI messages, note spans, and the encoder that turns
//! generated sequences into per-track event streams.
//!
//! Every note enters a track through a [`NoteSpan`], so note-on/note-off
//! pairing holds by construction. [`find_unbalanced`] re-checks it for any
//! stream, including ones assembled by hand.

pub mod encoder;
pub mod span;
pub mod timing;
pub mod types;

pub use encoder::{encode, encode_percussion, VelocityRange, DRUM_HIT_TICKS, HI_HAT_OFFSET_TICKS};
pub use span::{find_unbalanced, flatten, NoteSpan};
pub use timing::{bpm_to_tempo, DEFAULT_BEATS_PER_BAR, DEFAULT_TICKS_PER_BEAT};
pub use types::{Event, EventKind};
