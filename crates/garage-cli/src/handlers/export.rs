use crate::cli::{ExportArgs, OutArgs};
use crate::context::CliContext;
use crate::output;

pub async fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let receipt = ctx
        .export_service(args.out.out)
        .export_data_as_format(args.scope, args.format)
        .await?;
    output::output_success(&receipt);
    Ok(())
}

pub async fn handle_export_all(ctx: &CliContext, args: OutArgs) -> anyhow::Result<()> {
    let receipt = ctx.export_service(args.out).export_all_data().await?;
    output::output_success(&receipt);
    Ok(())
}
