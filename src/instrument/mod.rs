//! Instruments: track roles, their MIDI channels, and the closed set of
//! General MIDI programs each role may use.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{GenError, Result};

/// The General MIDI percussion channel (channel 10 in 1-based numbering).
pub const PERCUSSION_CHANNEL: u8 = 9;

/// The instrument role that owns a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Main,
    Bass,
    Harmony,
    Percussion,
}

impl Role {
    /// Track order within a composition.
    pub const ALL: [Role; 4] = [Role::Main, Role::Bass, Role::Harmony, Role::Percussion];

    pub fn channel(self) -> u8 {
        match self {
            Role::Main => 0,
            Role::Bass => 1,
            Role::Harmony => 2,
            Role::Percussion => PERCUSSION_CHANNEL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Main => "main",
            Role::Bass => "bass",
            Role::Harmony => "harmony",
            Role::Percussion => "percussion",
        }
    }

    /// Programs this role accepts. Empty for percussion, which uses the
    /// channel's implicit drum kit.
    pub fn programs(self) -> &'static [Program] {
        match self {
            Role::Main => &[
                Program::Lead1Square,
                Program::Lead2Sawtooth,
                Program::Lead3Calliope,
            ],
            Role::Bass => &[Program::SynthBass1, Program::SynthBass2],
            Role::Harmony => &[Program::Pad1NewAge, Program::Pad2Warm],
            Role::Percussion => &[],
        }
    }
}

/// General MIDI programs available to the melodic roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Program {
    SynthBass1 = 38,
    SynthBass2 = 39,
    Lead1Square = 80,
    Lead2Sawtooth = 81,
    Lead3Calliope = 82,
    Pad1NewAge = 88,
    Pad2Warm = 89,
}

impl Program {
    /// Raw program number as sent in a Program Change.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Resolve a program number against the closed set of `role`.
    pub fn for_role(role: Role, number: u8) -> Result<Self> {
        role.programs()
            .iter()
            .copied()
            .find(|p| p.number() == number)
            .ok_or_else(|| {
                GenError::config(format!(
                    "program {number} is not available for the {} role",
                    role.name()
                ))
            })
    }
}

/// Pick one program uniformly from `palette`.
pub fn choose_program<R: Rng + ?Sized>(palette: &[Program], rng: &mut R) -> Result<Program> {
    palette
        .choose(rng)
        .copied()
        .ok_or_else(|| GenError::config("instrument palette is empty"))
}
