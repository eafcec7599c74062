//! Event encoder: turns pitch sequences and drum patterns into note spans.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::span::{flatten, NoteSpan};
use super::timing::MAX_DELTA;
use super::types::Event;
use crate::error::{GenError, Result};
use crate::generate::{DrumBeat, DrumVoice};
use crate::instrument::PERCUSSION_CHANNEL;

/// How long each drum hit sounds, in ticks.
pub const DRUM_HIT_TICKS: u32 = 60;

/// Gap between the previous hit's release and the hi-hat, in ticks.
pub const HI_HAT_OFFSET_TICKS: u32 = 60;

/// Inclusive velocity bounds for a melodic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VelocityRange {
    pub min: u8,
    pub max: u8,
}

impl VelocityRange {
    pub fn new(min: u8, max: u8) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max > 127 {
            return Err(GenError::config(format!(
                "velocity {} is outside 0-127",
                self.max
            )));
        }
        if self.min > self.max {
            return Err(GenError::config(format!(
                "velocity range ({}, {}) is inverted",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Draw a velocity uniformly from the inclusive range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Encode `pitches` as back-to-back notes on `channel`.
///
/// Each note sounds for `duration_ticks`; every note after the first waits
/// another `duration_ticks` after the previous release, so onsets sit
/// `2 * duration_ticks` apart. Velocities are drawn from `velocity`.
pub fn encode<R: Rng + ?Sized>(
    pitches: &[u8],
    channel: u8,
    duration_ticks: u32,
    velocity: VelocityRange,
    rng: &mut R,
) -> Result<Vec<Event>> {
    velocity.validate()?;
    if duration_ticks > MAX_DELTA {
        return Err(GenError::config(format!(
            "note duration of {duration_ticks} ticks is too long"
        )));
    }

    let spans = pitches.iter().enumerate().map(|(i, &note)| NoteSpan {
        channel,
        note,
        velocity: velocity.sample(rng),
        lead_in: if i == 0 { 0 } else { duration_ticks },
        length: duration_ticks,
    });
    Ok(flatten(spans))
}

/// Encode a drum pattern on the percussion channel.
///
/// The kick of each beat lands `beat_ticks` after the previous beat's last
/// release (immediately for the very first beat). A snare starts as the kick
/// stops; the hi-hat follows [`HI_HAT_OFFSET_TICKS`] later.
pub fn encode_percussion(pattern: &[DrumBeat], beat_ticks: u32) -> Vec<Event> {
    let mut spans = Vec::new();
    for (i, beat) in pattern.iter().enumerate() {
        for (j, voice) in beat.hits.iter().enumerate() {
            let lead_in = match (i, j) {
                (0, 0) => 0,
                (_, 0) => beat_ticks,
                _ if *voice == DrumVoice::ClosedHiHat => HI_HAT_OFFSET_TICKS,
                _ => 0,
            };
            spans.push(NoteSpan {
                channel: PERCUSSION_CHANNEL,
                note: voice.note(),
                velocity: voice.velocity(),
                lead_in,
                length: DRUM_HIT_TICKS,
            });
        }
    }
    flatten(spans)
}
