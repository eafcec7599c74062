//! The generation pipeline: plan → programs → sequences → events → tracks.
//!
//! Randomness is drawn in a fixed order (programs for main, bass, harmony;
//! melody pitches; then velocities for main, bass, harmony) so a seed always
//! reproduces the same composition.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::{assemble, Composition, Track};
use crate::config::Plan;
use crate::error::Result;
use crate::event::{encode, encode_percussion};
use crate::generate::{self, percussion_pattern};
use crate::instrument::{choose_program, Role};

/// Build a composition from a validated plan using `rng` for every random
/// choice.
pub fn compose<R: Rng + ?Sized>(plan: &Plan, rng: &mut R) -> Result<Composition> {
    let main_program = choose_program(&plan.main.palette, rng)?;
    let bass_program = choose_program(&plan.bass.palette, rng)?;
    let harmony_program = choose_program(&plan.harmony.palette, rng)?;
    info!(
        main = main_program.number(),
        bass = bass_program.number(),
        harmony = harmony_program.number(),
        "programs selected"
    );

    let length = generate::sequence_length(plan.bars as usize, plan.notes_per_bar as usize)?;
    let melody = generate::melody(&plan.scale, length, rng);
    let bass = generate::bass(&plan.scale, length)?;
    let harmony = generate::harmony(&plan.scale, length)?;
    debug!(length, "pitch sequences generated");

    let main_notes = encode(
        &melody,
        Role::Main.channel(),
        plan.main.note_ticks,
        plan.main.velocity,
        rng,
    )?;
    let bass_notes = encode(
        &bass,
        Role::Bass.channel(),
        plan.bass.note_ticks,
        plan.bass.velocity,
        rng,
    )?;
    let harmony_notes = encode(
        &harmony,
        Role::Harmony.channel(),
        plan.harmony.note_ticks,
        plan.harmony.velocity,
        rng,
    )?;
    let drum_notes = encode_percussion(
        &percussion_pattern(plan.drum_bars),
        plan.ticks_per_beat as u32,
    );
    debug!(drum_bars = plan.drum_bars, "events encoded");

    let tracks: Vec<Track> = vec![
        assemble(Role::Main, Some(main_program), plan.tempo, main_notes),
        assemble(Role::Bass, Some(bass_program), plan.tempo, bass_notes),
        assemble(Role::Harmony, Some(harmony_program), plan.tempo, harmony_notes),
        assemble(Role::Percussion, None, plan.tempo, drum_notes),
    ];

    Ok(Composition {
        ticks_per_beat: plan.ticks_per_beat,
        tempo: plan.tempo,
        tracks,
    })
}

/// Owns a seeded generator and a plan, producing reproducible compositions.
pub struct Composer {
    plan: Plan,
    rng: ChaCha8Rng,
}

impl Composer {
    /// Create a composer for `plan` seeded with `seed`.
    pub fn new(plan: Plan, seed: u64) -> Self {
        Self {
            plan,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Get a mutable reference to the RNG for follow-up seeded choices.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn compose(&mut self) -> Result<Composition> {
        compose(&self.plan, &mut self.rng)
    }
}
