//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::document::Document;
use crate::error::{EnvError, EnvResult};
use crate::export::{export_json, export_yaml};

use super::Context;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON object
    Json,
    /// YAML mapping, human-readable
    Yaml,
}

/// Export the mapping to stdout or a file
pub fn handle_export_command(
    ctx: &Context,
    format: ExportFormat,
    mask: bool,
    output: Option<&Path>,
) -> EnvResult<()> {
    let document = Document::open(ctx.paths.env_file())?;

    match output {
        Some(path) => {
            let path = ctx.paths.resolve(path);
            let file = File::create(&path)
                .map_err(|e| EnvError::Export(format!("Failed to create output file: {}", e)))?;
            let mut writer = BufWriter::new(file);
            write_export(&document, format, mask, &mut writer)?;
            writer
                .flush()
                .map_err(|e| EnvError::Export(e.to_string()))?;
            println!("Exported {} variable(s) to {}", document.len(), ctx.display(&path));
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_export(&document, format, mask, &mut handle)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    document: &Document,
    format: ExportFormat,
    mask: bool,
    writer: &mut W,
) -> EnvResult<()> {
    match format {
        ExportFormat::Json => export_json(document, mask, writer),
        ExportFormat::Yaml => export_yaml(document, mask, writer),
    }
}
