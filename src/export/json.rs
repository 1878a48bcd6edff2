//! JSON Export functionality
//!
//! Exports the document's key/value mapping as a JSON object.

use std::collections::BTreeMap;
use std::io::Write;

use crate::document::Document;
use crate::error::{EnvError, EnvResult};

/// Render the mapping as pretty-printed JSON
pub fn to_json(document: &Document, mask_sensitive: bool) -> EnvResult<String> {
    let values: BTreeMap<String, String> = document.get_all(mask_sensitive);
    serde_json::to_string_pretty(&values).map_err(|e| EnvError::Export(e.to_string()))
}

/// Write the mapping as pretty-printed JSON
pub fn export_json<W: Write>(
    document: &Document,
    mask_sensitive: bool,
    writer: &mut W,
) -> EnvResult<()> {
    let json = to_json(document, mask_sensitive)?;
    writeln!(writer, "{}", json).map_err(|e| EnvError::Export(e.to_string()))
}
