//! Storage layer for envguard
//!
//! Byte-level file access shared by the document store, the crypto vault,
//! and the backup helpers.

pub mod file_io;

pub use file_io::{
    read_optional, read_required, read_trimmed, remove_if_exists, write_atomic, write_file,
};
