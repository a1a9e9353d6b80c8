use crate::cli::{ConfigAction, ConfigSetArgs};
use crate::context::CliContext;
use crate::output;
use garage_persistence::BackupConfigUpdate;

pub async fn handle(ctx: &CliContext, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ctx.backups.get_backup_config().await;
            output::output_success(&config);
        }
        ConfigAction::Set(args) => {
            let update = to_update(args);
            if update.is_empty() {
                anyhow::bail!("Nothing to change: pass --enabled, --frequency or --max-backups");
            }
            let config = ctx.backups.set_backup_config(update).await?;
            output::output_success(&config);
        }
    }
    Ok(())
}

fn to_update(args: ConfigSetArgs) -> BackupConfigUpdate {
    BackupConfigUpdate {
        enabled: args.enabled,
        frequency: args.frequency,
        max_backups: args.max_backups,
    }
}
