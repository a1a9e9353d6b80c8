use crate::context::CliContext;
use crate::output;
use garage_persistence::{BackupScheduler, SchedulerOptions};

/// Run the backup scheduler until Ctrl-C
pub async fn handle(ctx: &CliContext) -> anyhow::Result<()> {
    let options = SchedulerOptions::from(&ctx.config);
    let scheduler = BackupScheduler::start(ctx.backups.clone(), options);

    let signal = tokio::signal::ctrl_c().await;
    scheduler.shutdown().await;
    signal?;

    let config = ctx.backups.get_backup_config().await;
    output::output_success(serde_json::json!({
        "stopped": true,
        "backupCount": config.backup_count,
        "lastBackup": config.last_backup,
    }));
    Ok(())
}
