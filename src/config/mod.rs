//! Generation configuration: loaded from ~/.dancemidi/config.yaml or an
//! explicit path, validated into a [`Plan`] before anything is generated.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::event::timing::{bpm_to_tempo, DEFAULT_TICKS_PER_BEAT, MAX_DELTA, MAX_TICKS_PER_BEAT};
use crate::event::{VelocityRange, DRUM_HIT_TICKS};
use crate::generate::{BASS_INTERVAL, HARMONY_INTERVAL, HITS_PER_BAR};
use crate::instrument::{Program, Role};
use crate::scale::{transpose, Scale, A_MINOR_PENTATONIC};
use crate::smf::{span_len, TRACK_PREAMBLE_LEN};

/// Largest body an `MTrk` chunk length field can describe.
const MAX_TRACK_LEN: u64 = u32::MAX as u64;

/// Settings for one melodic role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Program numbers to choose from.
    pub palette: Vec<u8>,
    pub velocity: VelocityRange,
    /// How long each note sounds, in ticks.
    pub note_ticks: u32,
}

/// Top-level generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    pub tempo_bpm: u32,
    pub ticks_per_beat: u16,
    /// Signed; negative counts are rejected by `validate`.
    pub bars: i64,
    pub notes_per_bar: u32,
    /// Length of the drum loop, independent of `bars`.
    pub drum_bars: i64,
    pub scale: Vec<u8>,
    pub main: RoleConfig,
    pub bass: RoleConfig,
    pub harmony: RoleConfig,
    /// Fixed seed for reproducible output. None = drawn from entropy.
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 128,
            ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
            bars: 16,
            notes_per_bar: 4,
            drum_bars: 6,
            scale: A_MINOR_PENTATONIC.to_vec(),
            main: RoleConfig {
                palette: vec![80, 81, 82],
                velocity: VelocityRange { min: 100, max: 127 },
                note_ticks: 240,
            },
            bass: RoleConfig {
                palette: vec![38, 39],
                velocity: VelocityRange { min: 90, max: 110 },
                note_ticks: 240,
            },
            harmony: RoleConfig {
                palette: vec![88, 89],
                velocity: VelocityRange { min: 60, max: 90 },
                note_ticks: 480,
            },
            seed: None,
        }
    }
}

/// A melodic role's settings after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePlan {
    pub palette: Vec<Program>,
    pub velocity: VelocityRange,
    pub note_ticks: u32,
}

/// A fully validated configuration. Generation only ever sees a `Plan`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Microseconds per beat.
    pub tempo: u32,
    pub ticks_per_beat: u16,
    pub bars: u32,
    pub notes_per_bar: u32,
    pub drum_bars: u32,
    pub scale: Scale,
    pub main: RolePlan,
    pub bass: RolePlan,
    pub harmony: RolePlan,
}

impl GenConfig {
    /// Check every parameter and resolve it into a [`Plan`].
    pub fn validate(&self) -> Result<Plan> {
        let tempo = bpm_to_tempo(self.tempo_bpm)?;
        if self.ticks_per_beat == 0 || self.ticks_per_beat > MAX_TICKS_PER_BEAT {
            return Err(GenError::config(format!(
                "ticks_per_beat must be within 1-{MAX_TICKS_PER_BEAT}, got {}",
                self.ticks_per_beat
            )));
        }
        let bars = match u32::try_from(self.bars) {
            Ok(bars) if bars > 0 => bars,
            _ => {
                return Err(GenError::config(format!(
                    "bars must be a positive count, got {}",
                    self.bars
                )))
            }
        };
        let drum_bars = u32::try_from(self.drum_bars).map_err(|_| {
            GenError::config(format!(
                "drum_bars must not be negative, got {}",
                self.drum_bars
            ))
        })?;
        if self.notes_per_bar == 0 {
            return Err(GenError::config("notes_per_bar must be at least 1"));
        }
        let notes = bars as u64 * self.notes_per_bar as u64;

        let scale = Scale::new(self.scale.clone())?;
        transpose(scale.root(), BASS_INTERVAL)?;
        for &pitch in scale.pitches() {
            transpose(pitch, HARMONY_INTERVAL)?;
        }

        let main = self.main.validate(Role::Main)?;
        let bass = self.bass.validate(Role::Bass)?;
        let harmony = self.harmony.validate(Role::Harmony)?;
        let melodic = [
            (Role::Main, &main),
            (Role::Bass, &bass),
            (Role::Harmony, &harmony),
        ];
        for (role, plan) in melodic {
            if track_len(notes, span_len(plan.note_ticks, plan.note_ticks)) > MAX_TRACK_LEN {
                return Err(GenError::config(format!(
                    "{} track of {notes} notes would not fit in one MIDI track",
                    role.name()
                )));
            }
        }
        let drum_gap = (self.ticks_per_beat as u32).max(DRUM_HIT_TICKS);
        let hits = drum_bars as u64 * HITS_PER_BAR as u64;
        if track_len(hits, span_len(drum_gap, DRUM_HIT_TICKS)) > MAX_TRACK_LEN {
            return Err(GenError::config(format!(
                "{drum_bars} drum bars would not fit in one MIDI track"
            )));
        }

        Ok(Plan {
            tempo,
            ticks_per_beat: self.ticks_per_beat,
            bars,
            notes_per_bar: self.notes_per_bar,
            drum_bars,
            scale,
            main,
            bass,
            harmony,
        })
    }

    /// Load a config file. Missing fields take their default values;
    /// malformed YAML is a ConfigError, an unreadable file an IOError.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| GenError::config(format!("{}: {e}", path.display())))
    }

    /// Load from the default location, falling back to built-in defaults
    /// when no file exists there.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Upper bound on the encoded size of a track holding `spans` notes.
fn track_len(spans: u64, span_bytes: u64) -> u64 {
    spans.saturating_mul(span_bytes).saturating_add(TRACK_PREAMBLE_LEN)
}

impl RoleConfig {
    fn validate(&self, role: Role) -> Result<RolePlan> {
        if self.palette.is_empty() {
            return Err(GenError::config(format!(
                "{} palette must list at least one program",
                role.name()
            )));
        }
        let palette = self
            .palette
            .iter()
            .map(|&n| Program::for_role(role, n))
            .collect::<Result<Vec<_>>>()?;
        self.velocity.validate()?;
        if self.note_ticks == 0 || self.note_ticks > MAX_DELTA {
            return Err(GenError::config(format!(
                "{} note_ticks must be within 1-{MAX_DELTA}, got {}",
                role.name(),
                self.note_ticks
            )));
        }
        Ok(RolePlan {
            palette,
            velocity: self.velocity,
            note_ticks: self.note_ticks,
        })
    }
}

/// ~/.dancemidi/config.yaml, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dancemidi").join("config.yaml"))
}
