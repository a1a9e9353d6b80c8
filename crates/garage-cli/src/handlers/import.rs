use crate::cli::ImportArgs;
use crate::context::CliContext;
use crate::output;

pub async fn handle_import(ctx: &CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let summary = ctx.import_handler().import_data(&args.file).await?;
    output::output_success(&summary);
    Ok(())
}
