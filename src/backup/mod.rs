//! Backup system for envguard
//!
//! Every save copies the previous document bytes to `<path>.bak`; a single
//! backup is kept and overwritten on each save. `restore_backup` copies it
//! back.
//!
//! # Example
//!
//! ```rust,ignore
//! use envguard::backup::{create_backup, restore_backup};
//!
//! create_backup(Path::new(".env"))?;
//! let result = restore_backup(Path::new(".env"))?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{backup_path, create_backup, BACKUP_SUFFIX};
pub use restore::{restore_backup, RestoreResult};
