pub mod config;
pub mod record;
pub mod scheduler;
pub mod service;

pub use config::{BackupConfig, BackupConfigUpdate, BackupFrequency, DEFAULT_MAX_BACKUPS};
pub use record::{BackupIdGenerator, BackupRecord, BackupSummary};
pub use scheduler::{BackupScheduler, SchedulerOptions};
pub use service::BackupService;
