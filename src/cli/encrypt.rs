//! Encryption CLI commands
//!
//! Implements `encrypt`, `decrypt` and `rotate`.

use std::path::Path;

use crate::audit::{AuditEntry, Operation};
use crate::crypto::{encrypt_file, rotate};
use crate::document::Document;
use crate::error::EnvResult;

use super::Context;

/// Encrypt the env document
pub fn handle_encrypt_command(ctx: &Context, output: Option<&Path>) -> EnvResult<()> {
    let output = output
        .map(|p| ctx.paths.resolve(p))
        .unwrap_or_else(|| ctx.paths.encrypted_file().to_path_buf());

    let status = encrypt_file(ctx.paths.env_file(), ctx.paths.key_file(), &output)?;

    ctx.record(AuditEntry::new(Operation::Encrypt, ctx.display(&output)));
    println!("{}", status);
    Ok(())
}

/// Decrypt a ciphertext into the env document (or `output`)
pub fn handle_decrypt_command(
    ctx: &Context,
    input: Option<&Path>,
    output: Option<&Path>,
) -> EnvResult<()> {
    let input = input
        .map(|p| ctx.paths.resolve(p))
        .unwrap_or_else(|| ctx.paths.encrypted_file().to_path_buf());
    let target = output
        .map(|p| ctx.paths.resolve(p))
        .unwrap_or_else(|| ctx.paths.env_file().to_path_buf());

    let mut document = Document::new(&target);
    document.decrypt(&input, ctx.paths.key_file())?;

    ctx.record(
        AuditEntry::new(Operation::Decrypt, ctx.display(&target)).with_keys(document.keys()),
    );
    println!(
        "Decrypted {} to {} ({} variable(s)).",
        ctx.display(&input),
        ctx.display(&target),
        document.len()
    );
    Ok(())
}

/// Rotate the encryption key
pub fn handle_rotate_command(ctx: &Context) -> EnvResult<()> {
    let report = rotate(ctx.paths.encrypted_file(), ctx.paths.key_file())?;

    ctx.record(AuditEntry::new(
        Operation::Rotate,
        ctx.display(&report.encrypted_path),
    ));
    println!(
        "Key rotated: {} re-encrypted with new key in {}.",
        ctx.display(&report.encrypted_path),
        ctx.display(&report.key_path)
    );
    Ok(())
}
