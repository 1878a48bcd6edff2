//! Audit entry data structures
//!
//! Defines the operations that can be audited and the entry format. Entries
//! carry key names and file paths only, never values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Keys were assigned
    Set,
    /// Keys were removed
    Unset,
    /// A template document was generated
    Example,
    /// The document was encrypted
    Encrypt,
    /// A ciphertext was decrypted into the document
    Decrypt,
    /// The encryption key was rotated
    Rotate,
    /// The document was restored from its backup
    Restore,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Set => write!(f, "SET"),
            Operation::Unset => write!(f, "UNSET"),
            Operation::Example => write!(f, "EXAMPLE"),
            Operation::Encrypt => write!(f, "ENCRYPT"),
            Operation::Decrypt => write!(f, "DECRYPT"),
            Operation::Rotate => write!(f, "ROTATE"),
            Operation::Restore => write!(f, "RESTORE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// The file the operation wrote
    pub target: String,

    /// Keys touched by the operation, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

impl AuditEntry {
    /// Create a new audit entry stamped with the current time
    pub fn new(operation: Operation, target: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            target: target.into(),
            keys: Vec::new(),
        }
    }

    /// Attach the affected key names
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.target
        );

        if !self.keys.is_empty() {
            output.push_str(&format!(" ({})", self.keys.join(", ")));
        }

        output
    }
}
