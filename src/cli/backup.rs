//! Backup CLI commands

use crate::audit::{AuditEntry, Operation};
use crate::backup::restore_backup;
use crate::error::EnvResult;

use super::Context;

/// Restore the env document from its backup
pub fn handle_restore_command(ctx: &Context) -> EnvResult<()> {
    let result = restore_backup(ctx.paths.env_file())?;

    ctx.record(AuditEntry::new(
        Operation::Restore,
        ctx.display(ctx.paths.env_file()),
    ));
    println!(
        "{} from {}.",
        result.summary(),
        ctx.display(&ctx.paths.backup_file())
    );
    Ok(())
}
