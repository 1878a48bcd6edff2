//! envguard - comment-preserving .env file management
//!
//! This library reads and edits `.env` documents without losing comments,
//! blank lines, or ordering, derives value-free templates from them, checks
//! documents against a template's required keys, and encrypts whole files
//! with XChaCha20-Poly1305 under a locally stored random key.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `document`: Line model, document store, templates and validation
//! - `crypto`: Key files, sealing/opening, file-level encrypt/decrypt/rotate
//! - `storage`: Byte-level file access and atomic writes
//! - `backup`: `.bak` copies written before every save
//! - `config`: Settings file and derived paths
//! - `audit`: Append-only log of mutating operations
//! - `export`: JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `envguard` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use envguard::Document;
//!
//! let mut doc = Document::open(".env")?;
//! doc.set("APP_ENV", "production", Some("deployment target")).save()?;
//! let port = doc.get_int("PORT", 8080);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod document;
pub mod error;
pub mod export;
pub mod storage;

pub use document::Document;
pub use error::{EnvError, EnvResult};
