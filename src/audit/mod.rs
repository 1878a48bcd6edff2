//! Audit logging system for envguard
//!
//! Records mutating operations (set, unset, encrypt, rotate, ...) in an
//! append-only, line-delimited JSON log. Entries name the file and the keys
//! touched; values are never written.
//!
//! # Example
//!
//! ```rust,ignore
//! use envguard::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(".envguard-audit.log");
//! logger.log(&AuditEntry::new(Operation::Set, ".env").with_keys(["APP_ENV"]))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
