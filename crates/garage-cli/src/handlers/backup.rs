use crate::cli::BackupAction;
use crate::context::CliContext;
use crate::output;
use garage_persistence::BackupSummary;

pub async fn handle(ctx: &CliContext, action: BackupAction) -> anyhow::Result<()> {
    match action {
        BackupAction::Create => match ctx.backups.perform_backup().await {
            Some(record) => output::output_success(BackupSummary::from(&record)),
            None => anyhow::bail!("Backup failed; set GARAGE_DEBUG_LOG for details"),
        },
        BackupAction::List => {
            let history = ctx.backups.get_backup_history().await;
            output::output_list(history.iter().map(BackupSummary::from).collect());
        }
        BackupAction::Restore { id } => {
            if !ctx.backups.restore_from_backup(&id).await? {
                return output::output_error(&format!("Backup not found: {}", id));
            }
            output::output_success(serde_json::json!({"restored": id}));
        }
        BackupAction::Delete { id } => {
            ctx.backups.delete_backup(&id).await?;
            output::output_success(serde_json::json!({"deleted": id}));
        }
        BackupAction::Export { id, out } => {
            let sink = ctx.sink(out.out);
            let receipt = ctx.backups.export_backup(&id, &sink).await?;
            output::output_success(&receipt);
        }
    }
    Ok(())
}

/// Take a backup only if the schedule says one is due
pub async fn handle_check(ctx: &CliContext) -> anyhow::Result<()> {
    let record = ctx.backups.check_and_perform_backup().await;
    output::output_success(serde_json::json!({
        "performed": record.is_some(),
        "backup": record.as_ref().map(BackupSummary::from),
    }));
    Ok(())
}
