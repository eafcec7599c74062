//! Musical time in integer MIDI ticks.
//!
//! All durations in the pipeline are tick counts at a single ticks-per-beat
//! resolution fixed for the whole file. Tempo is stored the way SMF stores it,
//! as microseconds per beat.

use crate::error::{GenError, Result};

/// Default ticks per quarter note (beat).
pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;

/// Largest metrical division SMF can express (bit 15 must stay clear).
pub const MAX_TICKS_PER_BEAT: u16 = 0x7FFF;

/// Default time signature: 4 beats per bar.
pub const DEFAULT_BEATS_PER_BAR: u32 = 4;

/// Largest tempo the 3-byte Set Tempo payload can carry.
pub const MAX_TEMPO: u32 = 0x00FF_FFFF;

/// Largest delta time a 4-byte variable-length quantity can carry.
pub const MAX_DELTA: u32 = 0x0FFF_FFFF;

const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Convert beats per minute to microseconds per beat, rounded to nearest.
pub fn bpm_to_tempo(bpm: u32) -> Result<u32> {
    if bpm == 0 {
        return Err(GenError::config("tempo must be greater than 0 bpm"));
    }
    let tempo = (MICROS_PER_MINUTE + bpm / 2) / bpm;
    if tempo > MAX_TEMPO {
        return Err(GenError::config(format!(
            "tempo of {bpm} bpm is too slow to encode"
        )));
    }
    Ok(tempo)
}
