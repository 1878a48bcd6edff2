//! Path management for envguard
//!
//! Resolves every file a command touches relative to one base directory.
//! Explicit overrides (from the command line) win over settings.

use std::path::{Path, PathBuf};

use crate::backup::backup_path;

use super::settings::{Settings, SETTINGS_FILE};

/// Manages all paths used by envguard
#[derive(Debug, Clone)]
pub struct EnvPaths {
    base_dir: PathBuf,
    env_file: PathBuf,
    key_file: PathBuf,
    encrypted_file: PathBuf,
    example_file: PathBuf,
    audit_log: PathBuf,
}

impl EnvPaths {
    /// Resolve paths from settings, relative to `base_dir`
    pub fn from_settings(base_dir: impl Into<PathBuf>, settings: &Settings) -> Self {
        let base_dir = base_dir.into();
        Self {
            env_file: base_dir.join(&settings.env_file),
            key_file: base_dir.join(&settings.key_file),
            encrypted_file: base_dir.join(&settings.encrypted_file),
            example_file: base_dir.join(&settings.example_file),
            audit_log: base_dir.join(&settings.audit.log_file),
            base_dir,
        }
    }

    /// Default settings file location for a base directory
    pub fn settings_file_in(base_dir: &Path) -> PathBuf {
        base_dir.join(SETTINGS_FILE)
    }

    /// Override the env document path (relative paths resolve against the base)
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = self.base_dir.join(path);
        self
    }

    /// Override the key file path (relative paths resolve against the base)
    pub fn with_key_file(mut self, path: impl AsRef<Path>) -> Self {
        self.key_file = self.base_dir.join(path);
        self
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the env document path
    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Get the key file path
    pub fn key_file(&self) -> &Path {
        &self.key_file
    }

    /// Get the ciphertext path
    pub fn encrypted_file(&self) -> &Path {
        &self.encrypted_file
    }

    /// Get the template path
    pub fn example_file(&self) -> &Path {
        &self.example_file
    }

    /// Get the backup path of the env document
    pub fn backup_file(&self) -> PathBuf {
        backup_path(&self.env_file)
    }

    /// Get the settings file path
    pub fn settings_file(&self) -> PathBuf {
        Self::settings_file_in(&self.base_dir)
    }

    /// Get the audit log path
    pub fn audit_log(&self) -> &Path {
        &self.audit_log
    }

    /// Resolve an arbitrary user-supplied path against the base directory
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }
}
