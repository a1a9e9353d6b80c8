mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("GARAGE_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "garage", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = CliContext::load(cli.data_dir).await;

    let result = match cli.command {
        Commands::Backup(backup_cmd) => handlers::backup::handle(&ctx, backup_cmd.action).await,
        Commands::Check => handlers::backup::handle_check(&ctx).await,
        Commands::Export(args) => handlers::export::handle_export(&ctx, args).await,
        Commands::ExportAll(args) => handlers::export::handle_export_all(&ctx, args).await,
        Commands::Import(args) => handlers::import::handle_import(&ctx, args).await,
        Commands::Config(config_cmd) => handlers::config::handle(&ctx, config_cmd.action).await,
        Commands::Daemon => handlers::daemon::handle(&ctx).await,
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}
