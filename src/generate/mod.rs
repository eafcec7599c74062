//! Sequence generators: pitch sequences for the melodic roles and the fixed
//! drum pattern for percussion.
//!
//! Only the melody consumes randomness. Bass and harmony are deterministic
//! functions of the scale, so a seed change only reshapes the lead line.

pub mod percussion;

pub use percussion::{percussion_pattern, DrumBeat, DrumVoice, HITS_PER_BAR};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{GenError, Result};
use crate::scale::{transpose, Scale, OCTAVE};

/// Harmony sits a perfect fourth above the scale.
pub const HARMONY_INTERVAL: i16 = 5;

/// Bass sits one octave below the scale root.
pub const BASS_INTERVAL: i16 = -OCTAVE;

/// `length` pitches drawn uniformly and independently from `scale`.
pub fn melody<R: Rng + ?Sized>(scale: &Scale, length: usize, rng: &mut R) -> Vec<u8> {
    (0..length)
        .map(|_| scale.pitches().choose(rng).copied().unwrap_or(scale.root()))
        .collect()
}

/// The scale root dropped an octave, repeated `length` times.
pub fn bass(scale: &Scale, length: usize) -> Result<Vec<u8>> {
    let note = transpose(scale.root(), BASS_INTERVAL)?;
    Ok(vec![note; length])
}

/// The scale walked cyclically, shifted up by [`HARMONY_INTERVAL`].
pub fn harmony(scale: &Scale, length: usize) -> Result<Vec<u8>> {
    (0..length)
        .map(|i| transpose(scale.at(i), HARMONY_INTERVAL))
        .collect()
}

/// Number of pitched notes for `bars` bars of `notes_per_bar`.
pub fn sequence_length(bars: usize, notes_per_bar: usize) -> Result<usize> {
    bars.checked_mul(notes_per_bar)
        .ok_or_else(|| GenError::config("bars * notes_per_bar overflows"))
}
