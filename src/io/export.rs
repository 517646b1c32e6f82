//! Save the raw downloaded feed to disk.
//!
//! The snapshot is the exact text that was parsed, which makes a surprising
//! verdict easy to re-run later with `--input`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Write the raw feed text to `path`, replacing any existing file.
pub fn write_feed_snapshot(path: &Path, raw: &str) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create snapshot '{}': {e}", path.display())))?;

    file.write_all(raw.as_bytes())
        .map_err(|e| AppError::config(format!("Failed to write snapshot '{}': {e}", path.display())))?;

    Ok(())
}
