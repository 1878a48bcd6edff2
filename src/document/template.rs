//! Template generation
//!
//! A template keeps every comment and blank line of a document and every
//! key, with all values emptied. It is what gets committed as `.env.example`.

use std::path::Path;

use tracing::info;

use crate::error::EnvResult;
use crate::storage::file_io::write_file;

use super::line::Line;
use super::store::Document;

impl Document {
    /// Render the value-stripped template text
    pub fn render_example(&self) -> String {
        self.lines()
            .iter()
            .map(Line::render_blank)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the template to `target`
    pub fn create_example(&self, target: impl AsRef<Path>) -> EnvResult<()> {
        let target = target.as_ref();
        write_file(target, self.render_example().as_bytes())?;
        info!(source = %self.path().display(), target = %target.display(), "template written");
        Ok(())
    }
}
