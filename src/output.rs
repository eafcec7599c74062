//! Output: atomic file writes and default file naming.

use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::Result;

/// `dance_track_NNNN.mid` with a random four-digit suffix.
pub fn default_file_name<R: Rng + ?Sized>(rng: &mut R) -> PathBuf {
    let suffix: u32 = rng.gen_range(1000..=9999);
    PathBuf::from(format!("dance_track_{suffix}.mid"))
}

/// Write `bytes` to `path` so that `path` either holds the full content or is
/// left untouched.
///
/// Data goes to a temporary file in the destination directory first and is
/// renamed into place once flushed. The temporary file is removed on failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}
