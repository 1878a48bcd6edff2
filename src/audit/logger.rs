//! JSONL audit trail for mutating envguard commands
//!
//! One line per `set`, `unset`, `encrypt`, `rotate`, ... naming the file and
//! the keys touched. Values never reach this file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{EnvError, EnvResult};
use crate::storage::file_io::read_optional;

use super::entry::AuditEntry;

/// Appends to and reads back the audit log next to the env files
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Record one operation, creating the log on first use
    pub fn log(&self, entry: &AuditEntry) -> EnvResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| EnvError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| EnvError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", line)
            .map_err(|e| EnvError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// The last `count` operations, oldest first
    ///
    /// A log that was never written reads as empty.
    pub fn read_recent(&self, count: usize) -> EnvResult<Vec<AuditEntry>> {
        let Some(bytes) = read_optional(&self.log_path)? else {
            return Ok(Vec::new());
        };
        let text = String::from_utf8_lossy(&bytes);

        let mut entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    EnvError::Json(format!("Bad audit entry on line {}: {}", index + 1, e))
                })
            })
            .collect::<EnvResult<Vec<AuditEntry>>>()?;

        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }
}
