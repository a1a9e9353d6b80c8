use crate::backup::service::BackupService;
use garage_core::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Timing of the periodic backup check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    pub check_interval: Duration,
    /// Delay between enabling backups and the re-check it triggers
    pub recheck_delay: Duration,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SchedulerOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            check_interval: config.backup_check_interval(),
            recheck_delay: config.recheck_delay(),
        }
    }
}

/// Background task that takes backups when they fall due
///
/// Checks once at startup, then on every tick of `check_interval`, and once
/// more shortly after backups are switched on. All checks go through
/// [`BackupService::check_and_perform_backup`], which serializes them with
/// manual backups.
pub struct BackupScheduler {
    shutdown_tx: mpsc::UnboundedSender<()>,
    handle: JoinHandle<()>,
}

impl BackupScheduler {
    pub fn start(service: Arc<BackupService>, options: SchedulerOptions) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel::<()>();
        let period = options.check_interval.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            tracing::info!(
                "Backup scheduler started (interval {:?})",
                options.check_interval
            );
            service.check_and_perform_backup().await;

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        service.check_and_perform_backup().await;
                    }
                    _ = service.recheck_requested() => {
                        tokio::select! {
                            _ = shutdown_rx.recv() => break,
                            _ = sleep(options.recheck_delay) => {
                                service.check_and_perform_backup().await;
                            }
                        }
                    }
                }
            }

            tracing::info!("Backup scheduler stopped");
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop the task; a check already in progress runs to completion
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.handle.await {
            tracing::error!("Backup scheduler task failed: {}", e);
        }
    }
}
