//! Format-preserving env document model
//!
//! - `line`: the typed representation of one physical line and its parser
//! - `store`: the `Document` aggregate (parse, query, mutate, save)
//! - `template`: value-stripped `.env.example` generation
//! - `validate`: required-key checks
//!
//! # Example
//!
//! ```rust,ignore
//! use envguard::document::Document;
//!
//! let mut doc = Document::open(".env")?;
//! doc.set("APP_ENV", "production", Some("Deployment target"));
//! doc.unset("LEGACY_FLAG");
//! doc.require(&["APP_NAME", "APP_ENV"])?;
//! doc.save()?;
//! doc.create_example(".env.example")?;
//! ```

pub mod line;
pub mod store;
pub mod template;
pub mod validate;

pub use line::{parse_lines, Line};
pub use store::{is_sensitive_key, Document, MASK, SENSITIVE_MARKERS};
pub use validate::{missing_keys, validate_against_template};
