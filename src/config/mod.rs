//! Configuration module for envguard
//!
//! This module provides configuration management including:
//! - Path resolution for the env, key, ciphertext, template and backup files
//! - Settings persistence (`.envguard.json`)

pub mod paths;
pub mod settings;

pub use paths::EnvPaths;
pub use settings::{AuditSettings, Settings, SETTINGS_FILE};
