//! File I/O utilities
//!
//! Plain reads and writes for documents, plus atomic writes (temp file then
//! rename) used for key and ciphertext material.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{EnvError, EnvResult};

/// Read a file's bytes, returning `None` if the file doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> EnvResult<Option<Vec<u8>>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read(path)
        .map(Some)
        .map_err(|e| EnvError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read a file's bytes, returning `EnvError::NotFound` if it doesn't exist
pub fn read_required<P: AsRef<Path>>(path: P) -> EnvResult<Vec<u8>> {
    let path = path.as_ref();
    read_optional(path)?.ok_or_else(|| EnvError::not_found(path))
}

/// Read a file as trimmed text, returning `EnvError::NotFound` if it doesn't exist
pub fn read_trimmed<P: AsRef<Path>>(path: P) -> EnvResult<String> {
    let path = path.as_ref();
    let bytes = read_required(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim().to_string())
}

/// Write bytes to a file, replacing its contents
pub fn write_file<P: AsRef<Path>>(path: P, contents: &[u8]) -> EnvResult<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, contents)
        .map_err(|e| EnvError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

/// Path of the staging file used for an atomic write of `path`
pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

/// Append a literal suffix to the final path component (`.env` + `.bak`)
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Write bytes to a staging file next to `path` and sync it, without renaming
///
/// Returns the staging path; pair with [`commit_staged`].
pub fn stage_file(path: &Path, contents: &[u8]) -> EnvResult<PathBuf> {
    ensure_parent(path)?;

    // Temp file must live in the same directory for the rename to be atomic
    let staged = temp_path(path);

    let file = File::create(&staged)
        .map_err(|e| EnvError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| EnvError::Io(format!("Failed to write temp file: {}", e)))?;
    writer
        .flush()
        .map_err(|e| EnvError::Io(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| EnvError::Io(format!("Failed to sync data: {}", e)))?;

    Ok(staged)
}

/// Rename a staged file over its final path, discarding it on failure
pub fn commit_staged(staged: &Path, path: &Path) -> EnvResult<()> {
    rename_staged(staged, path).map_err(|e| {
        let _ = fs::remove_file(staged);
        e
    })
}

/// Rename a staged file over its final path
///
/// On failure the staged file stays where it is.
pub fn rename_staged(staged: &Path, path: &Path) -> EnvResult<()> {
    fs::rename(staged, path)
        .map_err(|e| EnvError::Io(format!("Failed to rename temp file: {}", e)))
}

/// Write bytes to a file atomically (write to temp, then rename)
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> EnvResult<()> {
    let path = path.as_ref();
    let staged = stage_file(path, contents)?;
    commit_staged(&staged, path)
}

/// Restrict a file to owner read/write
#[cfg(unix)]
pub fn restrict_permissions(path: &Path) -> EnvResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
        EnvError::Io(format!(
            "Failed to set permissions on {}: {}",
            path.display(),
            e
        ))
    })
}

/// Restrict a file to owner read/write
#[cfg(not(unix))]
pub fn restrict_permissions(_path: &Path) -> EnvResult<()> {
    Ok(())
}

/// Remove a file if it exists
pub fn remove_if_exists(path: &Path) -> EnvResult<()> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| EnvError::Io(format!("Failed to remove {}: {}", path.display(), e)))?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> EnvResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                EnvError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
