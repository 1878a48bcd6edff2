//! User settings for envguard
//!
//! Settings live in an optional `.envguard.json` next to the env file and
//! name the files each command works with.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnvError, EnvResult};

/// File name of the settings file inside the base directory
pub const SETTINGS_FILE: &str = ".envguard.json";

/// Audit log settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Whether mutating commands are recorded
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file, relative to the base directory
    #[serde(default = "default_audit_log")]
    pub log_file: String,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            log_file: default_audit_log(),
        }
    }
}

/// User settings for envguard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The working env document
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Base64 key file
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Ciphertext file
    #[serde(default = "default_encrypted_file")]
    pub encrypted_file: String,

    /// Template document listing required keys
    #[serde(default = "default_example_file")]
    pub example_file: String,

    /// Mask sensitive values when listing
    #[serde(default = "default_mask_sensitive")]
    pub mask_sensitive: bool,

    /// Audit log policy
    #[serde(default)]
    pub audit: AuditSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_key_file() -> String {
    ".env.key".to_string()
}

fn default_encrypted_file() -> String {
    ".env.enc".to_string()
}

fn default_example_file() -> String {
    ".env.example".to_string()
}

fn default_mask_sensitive() -> bool {
    true
}

fn default_audit_log() -> String {
    ".envguard-audit.log".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            env_file: default_env_file(),
            key_file: default_key_file(),
            encrypted_file: default_encrypted_file(),
            example_file: default_example_file(),
            mask_sensitive: default_mask_sensitive(),
            audit: AuditSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or use defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> EnvResult<Self> {
        if !path.exists() {
            // Don't create the file - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| EnvError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| EnvError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> EnvResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| EnvError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| EnvError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
