//! Template CLI commands
//!
//! Implements `example` (write a value-stripped template) and `validate`
//! (check the document against a template's keys).

use std::path::Path;

use crate::audit::{AuditEntry, Operation};
use crate::document::{validate_against_template, Document};
use crate::error::{EnvError, EnvResult};

use super::Context;

/// Write the template for the current document
pub fn handle_example_command(ctx: &Context, output: Option<&Path>) -> EnvResult<()> {
    let target = output
        .map(|p| ctx.paths.resolve(p))
        .unwrap_or_else(|| ctx.paths.example_file().to_path_buf());

    let document = Document::open(ctx.paths.env_file())?;
    document.create_example(&target)?;

    ctx.record(AuditEntry::new(Operation::Example, ctx.display(&target)));
    println!("{} created successfully.", ctx.display(&target));
    Ok(())
}

/// Validate the document against a template
pub fn handle_validate_command(ctx: &Context, template: Option<&Path>) -> EnvResult<()> {
    let template_path = template
        .map(|p| ctx.paths.resolve(p))
        .unwrap_or_else(|| ctx.paths.example_file().to_path_buf());

    if !template_path.exists() {
        return Err(EnvError::not_found(template_path));
    }

    let template = Document::open(&template_path)?;
    let document = Document::open(ctx.paths.env_file())?;
    validate_against_template(&document, &template)?;

    println!(
        "Validation passed: {} required key(s) present.",
        template.len()
    );
    Ok(())
}
