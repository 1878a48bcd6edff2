//! Variable CLI commands
//!
//! Implements list, get, set, assign and unset.

use crate::audit::{AuditEntry, Operation};
use crate::display::format_variable_list;
use crate::document::Document;
use crate::error::EnvResult;

use super::Context;

/// Parse a `KEY=VALUE` argument
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid assignment '{}': expected KEY=VALUE", raw)),
    }
}

/// List all variables
pub fn handle_list_command(ctx: &Context, reveal: bool) -> EnvResult<()> {
    let document = Document::open(ctx.paths.env_file())?;
    let mask = ctx.settings.mask_sensitive && !reveal;

    println!("{}", format_variable_list(&document.entries(mask)));
    Ok(())
}

/// Print a single value
pub fn handle_get_command(ctx: &Context, key: &str, default: Option<&str>) -> EnvResult<()> {
    let document = Document::open(ctx.paths.env_file())?;
    println!("{}", document.get_or(key, default.unwrap_or("")));
    Ok(())
}

/// Set a single variable
pub fn handle_set_command(
    ctx: &Context,
    key: &str,
    value: &str,
    comment: Option<&str>,
) -> EnvResult<()> {
    let mut document = Document::open(ctx.paths.env_file())?;
    document.set(key, value, comment).save()?;

    ctx.record(
        AuditEntry::new(Operation::Set, ctx.display(ctx.paths.env_file())).with_keys([key]),
    );
    println!("{} set successfully.", key);
    Ok(())
}

/// Set several variables at once
pub fn handle_assign_command(ctx: &Context, pairs: &[(String, String)]) -> EnvResult<()> {
    let mut document = Document::open(ctx.paths.env_file())?;
    document
        .set_many(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .save()?;

    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    ctx.record(
        AuditEntry::new(Operation::Set, ctx.display(ctx.paths.env_file())).with_keys(keys.clone()),
    );
    println!("{} variable(s) set: {}", keys.len(), keys.join(", "));
    Ok(())
}

/// Remove a variable
pub fn handle_unset_command(ctx: &Context, key: &str) -> EnvResult<()> {
    let mut document = Document::open(ctx.paths.env_file())?;

    if !document.contains_key(key) {
        println!("{} is not set.", key);
        return Ok(());
    }

    document.unset(key).save()?;

    ctx.record(
        AuditEntry::new(Operation::Unset, ctx.display(ctx.paths.env_file())).with_keys([key]),
    );
    println!("{} removed.", key);
    Ok(())
}
