//! YAML Export functionality
//!
//! Exports the document's key/value mapping as a YAML mapping.

use std::io::Write;

use crate::document::Document;
use crate::error::{EnvError, EnvResult};

/// Write the mapping as YAML, preceded by a header comment
pub fn export_yaml<W: Write>(
    document: &Document,
    mask_sensitive: bool,
    writer: &mut W,
) -> EnvResult<()> {
    writeln!(writer, "# Exported from {}", document.path().display())
        .map_err(|e| EnvError::Export(e.to_string()))?;
    if mask_sensitive {
        writeln!(writer, "# Sensitive values are masked")
            .map_err(|e| EnvError::Export(e.to_string()))?;
    }

    serde_yaml::to_writer(writer, &document.get_all(mask_sensitive))
        .map_err(|e| EnvError::Export(e.to_string()))?;

    Ok(())
}
