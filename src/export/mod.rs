//! Export module for envguard
//!
//! Provides export of the key/value mapping in two formats:
//! - JSON: machine-readable
//! - YAML: human-readable

pub mod json;
pub mod yaml;

pub use json::{export_json, to_json};
pub use yaml::export_yaml;
