//! dancemidi: a seeded four-track dance loop generator that writes
//! Standard MIDI Files.
//!
//! The pipeline runs one way: [`scale`] → [`generate`] → [`event`] →
//! [`track`] → [`smf`]. [`build`] runs all of it in memory; nothing touches
//! the filesystem until [`output::write_atomic`].

pub mod config;
pub mod error;
pub mod event;
pub mod generate;
pub mod instrument;
pub mod output;
pub mod scale;
pub mod smf;
pub mod track;

use std::path::PathBuf;

use tracing::info;

pub use config::GenConfig;
pub use error::{ErrorKind, GenError, Result};
pub use track::{Composer, Composition};

/// Everything produced by one generation run.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Seed that reproduces this run.
    pub seed: u64,
    pub composition: Composition,
    /// The complete SMF image.
    pub bytes: Vec<u8>,
    /// Suggested output name, drawn after composition.
    pub file_name: PathBuf,
}

/// Validate `config`, compose, and serialize.
///
/// Without a configured seed one is drawn from entropy and reported in the
/// result so the run can be repeated.
pub fn build(config: &GenConfig) -> Result<Rendered> {
    let plan = config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "composing");

    let mut composer = Composer::new(plan, seed);
    let composition = composer.compose()?;
    let bytes = smf::serialize(&composition)?;
    let file_name = output::default_file_name(composer.rng());

    Ok(Rendered {
        seed,
        composition,
        bytes,
        file_name,
    })
}
