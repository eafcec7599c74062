//! Fixed four-on-the-floor drum pattern.
//!
//! Every beat carries a kick and a closed hi-hat; beats 1 and 3 (0-indexed)
//! add a snare. Nothing here is random.

use crate::event::timing::DEFAULT_BEATS_PER_BAR;

/// A General MIDI drum sound on the percussion channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrumVoice {
    Kick,
    Snare,
    ClosedHiHat,
}

impl DrumVoice {
    /// GM percussion key number.
    pub fn note(self) -> u8 {
        match self {
            DrumVoice::Kick => 36,
            DrumVoice::Snare => 38,
            DrumVoice::ClosedHiHat => 42,
        }
    }

    pub fn velocity(self) -> u8 {
        match self {
            DrumVoice::Kick => 100,
            DrumVoice::Snare => 80,
            DrumVoice::ClosedHiHat => 50,
        }
    }
}

/// Drum hits in one bar: a kick and a hat per beat plus two snares.
pub const HITS_PER_BAR: u32 = 2 * DEFAULT_BEATS_PER_BAR + 2;

/// The hits sounding on one beat, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrumBeat {
    pub bar: u32,
    pub beat: u32,
    pub hits: Vec<DrumVoice>,
}

/// Whether a snare lands on this beat of the bar.
fn has_snare(beat: u32) -> bool {
    beat == 1 || beat == 3
}

/// Build the pattern for `bars` bars of 4/4.
pub fn percussion_pattern(bars: u32) -> Vec<DrumBeat> {
    let mut pattern = Vec::with_capacity(bars as usize * DEFAULT_BEATS_PER_BAR as usize);
    for bar in 0..bars {
        for beat in 0..DEFAULT_BEATS_PER_BAR {
            let mut hits = vec![DrumVoice::Kick];
            if has_snare(beat) {
                hits.push(DrumVoice::Snare);
            }
            hits.push(DrumVoice::ClosedHiHat);
            pattern.push(DrumBeat { bar, beat, hits });
        }
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_per_bar_matches_pattern() {
        let hits: usize = percussion_pattern(3).iter().map(|b| b.hits.len()).sum();
        assert_eq!(hits, 3 * HITS_PER_BAR as usize);
    }

    #[test]
    fn zero_bars_is_empty() {
        assert!(percussion_pattern(0).is_empty());
    }

    #[test]
    fn one_bar_layout() {
        let pattern = percussion_pattern(1);
        assert_eq!(pattern.len(), 4);
        use DrumVoice::*;
        assert_eq!(pattern[0].hits, vec![Kick, ClosedHiHat]);
        assert_eq!(pattern[1].hits, vec![Kick, Snare, ClosedHiHat]);
        assert_eq!(pattern[2].hits, vec![Kick, ClosedHiHat]);
        assert_eq!(pattern[3].hits, vec![Kick, Snare, ClosedHiHat]);
    }

    #[test]
    fn every_beat_has_kick_first() {
        let pattern = percussion_pattern(6);
        assert_eq!(pattern.len(), 24);
        assert!(pattern.iter().all(|b| b.hits[0] == DrumVoice::Kick));
        assert_eq!(pattern.last().map(|b| (b.bar, b.beat)), Some((5, 3)));
    }

    #[test]
    fn voice_constants() {
        assert_eq!(DrumVoice::Kick.note(), 36);
        assert_eq!(DrumVoice::Snare.note(), 38);
        assert_eq!(DrumVoice::ClosedHiHat.note(), 42);
        assert_eq!(DrumVoice::Kick.velocity(), 100);
        assert_eq!(DrumVoice::Snare.velocity(), 80);
        assert_eq!(DrumVoice::ClosedHiHat.velocity(), 50);
    }
}
