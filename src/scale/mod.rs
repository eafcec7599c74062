//! Scale and pitch model: the fixed pitch set every generator draws from.

use crate::error::{GenError, Result};

/// Highest valid MIDI note number.
pub const MAX_PITCH: u8 = 127;

/// One octave, in semitones.
pub const OCTAVE: i16 = 12;

/// A minor pentatonic around A3: A C D E G A.
pub const A_MINOR_PENTATONIC: [u8; 6] = [57, 60, 62, 64, 67, 69];

/// An ordered set of distinct MIDI pitches. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    pitches: Vec<u8>,
}

impl Scale {
    /// Build a scale, rejecting empty sets, duplicates and out-of-range notes.
    pub fn new(pitches: Vec<u8>) -> Result<Self> {
        if pitches.is_empty() {
            return Err(GenError::config("scale must contain at least one pitch"));
        }
        for (i, &p) in pitches.iter().enumerate() {
            if p > MAX_PITCH {
                return Err(GenError::config(format!(
                    "scale pitch {p} is not a valid MIDI note (0-127)"
                )));
            }
            if pitches[..i].contains(&p) {
                return Err(GenError::config(format!("scale pitch {p} is repeated")));
            }
        }
        Ok(Self { pitches })
    }

    /// Pitch at `index`, wrapping around the scale.
    pub fn at(&self, index: usize) -> u8 {
        self.pitches[index % self.pitches.len()]
    }

    /// The first pitch of the scale.
    pub fn root(&self) -> u8 {
        self.pitches[0]
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// Whether the scale has no pitches.
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn pitches(&self) -> &[u8] {
        &self.pitches
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            pitches: A_MINOR_PENTATONIC.to_vec(),
        }
    }
}

/// Shift `pitch` by `semitones`, failing if the result leaves 0–127.
pub fn transpose(pitch: u8, semitones: i16) -> Result<u8> {
    let shifted = pitch as i16 + semitones;
    if !(0..=MAX_PITCH as i16).contains(&shifted) {
        return Err(GenError::config(format!(
            "transposing {pitch} by {semitones} semitones leaves the MIDI note range"
        )));
    }
    Ok(shifted as u8)
}
