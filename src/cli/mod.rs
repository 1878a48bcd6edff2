//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing in `main.rs` with the document and crypto layers.
//! Only this layer prints to the terminal.

pub mod audit;
pub mod backup;
pub mod encrypt;
pub mod export;
pub mod template;
pub mod variables;

use std::path::Path;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{EnvPaths, Settings};
use crate::error::EnvResult;

pub use audit::handle_audit_command;
pub use backup::handle_restore_command;
pub use encrypt::{handle_decrypt_command, handle_encrypt_command, handle_rotate_command};
pub use export::{handle_export_command, ExportFormat};
pub use template::{handle_example_command, handle_validate_command};
pub use variables::{
    handle_assign_command, handle_get_command, handle_list_command, handle_set_command,
    handle_unset_command, parse_assignment,
};

/// Resolved settings and paths shared by every command
pub struct Context {
    pub settings: Settings,
    pub paths: EnvPaths,
}

impl Context {
    /// Load settings from `base_dir` and apply command-line overrides
    pub fn load(
        base_dir: &Path,
        env_file: Option<&Path>,
        key_file: Option<&Path>,
    ) -> EnvResult<Self> {
        let settings = Settings::load_or_default(&EnvPaths::settings_file_in(base_dir))?;
        let mut paths = EnvPaths::from_settings(base_dir, &settings);

        if let Some(env_file) = env_file {
            paths = paths.with_env_file(env_file);
        }
        if let Some(key_file) = key_file {
            paths = paths.with_key_file(key_file);
        }

        Ok(Self { settings, paths })
    }

    /// Append an audit entry when auditing is enabled
    ///
    /// The operation has already happened, so a failing audit write is
    /// reported as a warning rather than an error.
    pub fn record(&self, entry: AuditEntry) {
        if !self.settings.audit.enabled {
            return;
        }
        let logger = AuditLogger::new(self.paths.audit_log());
        if let Err(e) = logger.log(&entry) {
            warn!(error = %e, "failed to write audit entry");
        }
    }

    /// Display form of a path for status messages
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(self.paths.base_dir())
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
