//! Audit CLI commands

use crate::audit::AuditLogger;
use crate::error::EnvResult;

use super::Context;

/// Show the most recent audit entries
pub fn handle_audit_command(ctx: &Context, limit: usize) -> EnvResult<()> {
    if !ctx.settings.audit.enabled {
        println!("Audit logging is disabled.");
        println!(
            "Enable it with \"audit\": {{\"enabled\": true}} in {}.",
            ctx.display(&ctx.paths.settings_file())
        );
        return Ok(());
    }

    let entries = AuditLogger::new(ctx.paths.audit_log()).read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
