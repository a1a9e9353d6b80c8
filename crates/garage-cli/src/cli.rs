use clap::{Args, Parser, Subcommand};
use garage_domain::export::{ExportFormat, ExportScope};
use garage_persistence::BackupFrequency;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "garage")]
#[command(about = "Backups, exports and imports for garage service-shop data", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GARAGE_BUILD_COMMIT"), ")"))]
pub struct Cli {
    /// Directory holding the data collections (or set GARAGE_DATA_DIR env var)
    #[arg(long, value_name = "DIR", env = "GARAGE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Backup operations
    Backup(BackupCommand),
    /// Take a backup if one is due
    Check,
    /// Export collections as JSON, CSV or Excel
    Export(ExportArgs),
    /// Export every collection, users included, as one JSON file
    ExportAll(OutArgs),
    /// Replace collections with the ones in a backup file
    Import(ImportArgs),
    /// Backup schedule settings
    Config(ConfigCommand),
    /// Run the backup scheduler until interrupted
    Daemon,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct BackupCommand {
    #[command(subcommand)]
    pub action: BackupAction,
}

#[derive(Subcommand)]
pub enum BackupAction {
    /// Take a backup now
    Create,
    /// List retained backups, most recent first
    List,
    /// Overwrite current data with a backup
    Restore {
        #[arg(long)]
        id: String,
    },
    /// Delete a backup
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Write a backup to a JSON file
    Export {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        out: OutArgs,
    },
}

#[derive(Args)]
pub struct OutArgs {
    /// Output directory (defaults to export_dir from the config file)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// vehicles, maintenance, invoices or all
    #[arg(long, default_value = "all")]
    pub scope: ExportScope,
    /// json, csv or excel
    #[arg(long, default_value = "json")]
    pub format: ExportFormat,
    #[command(flatten)]
    pub out: OutArgs,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Backup or export file to import
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the backup settings
    Show,
    /// Change the backup settings
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    #[arg(long)]
    pub enabled: Option<bool>,
    /// daily, weekly or monthly
    #[arg(long)]
    pub frequency: Option<BackupFrequency>,
    #[arg(long)]
    pub max_backups: Option<usize>,
}
