//! Backup restoration for env documents

use std::path::Path;

use tracing::info;

use crate::error::EnvResult;
use crate::storage::file_io::{read_required, write_file};

use super::manager::backup_path;

/// Result of a restore operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    /// Bytes copied back into the document
    pub bytes_restored: usize,
    /// Whether the document existed before the restore
    pub replaced_existing: bool,
}

impl RestoreResult {
    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        if self.replaced_existing {
            format!("Restored {} bytes over the current file", self.bytes_restored)
        } else {
            format!("Restored {} bytes into a new file", self.bytes_restored)
        }
    }
}

/// Copy `<path>.bak` back over `path`
///
/// The backup itself is left in place.
pub fn restore_backup(path: &Path) -> EnvResult<RestoreResult> {
    let source = backup_path(path);
    let contents = read_required(&source)?;

    let replaced_existing = path.exists();
    write_file(path, &contents)?;
    info!(path = %path.display(), "document restored from backup");

    Ok(RestoreResult {
        bytes_restored: contents.len(),
        replaced_existing,
    })
}
