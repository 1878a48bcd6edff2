//! Backup creation for env documents
//!
//! A document keeps exactly one backup: a byte-for-byte copy of the file as
//! it was immediately before the most recent save.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EnvError, EnvResult};
use crate::storage::file_io::with_suffix;

/// Suffix appended to the document path to form its backup path
pub const BACKUP_SUFFIX: &str = ".bak";

/// The backup path for a document (`.env` -> `.env.bak`)
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, BACKUP_SUFFIX)
}

/// Copy the current file to its backup path, overwriting any older backup
///
/// Returns `None` when there is nothing to back up.
pub fn create_backup(path: &Path) -> EnvResult<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let target = backup_path(path);
    fs::copy(path, &target).map_err(|e| {
        EnvError::Io(format!(
            "Failed to back up {} to {}: {}",
            path.display(),
            target.display(),
            e
        ))
    })?;
    debug!(source = %path.display(), backup = %target.display(), "backup written");

    Ok(Some(target))
}
