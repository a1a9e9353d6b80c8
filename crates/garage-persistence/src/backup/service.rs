use crate::backup::config::{BackupConfig, BackupConfigUpdate};
use crate::backup::record::{BackupIdGenerator, BackupRecord};
use crate::export::{ExportReceipt, FileSink};
use crate::store::CollectionStore;
use crate::traits::{KeyValueStore, StorageKey};
use chrono::{DateTime, Utc};
use garage_core::{GarageError, GarageResult};
use garage_domain::DomainSnapshot;
use std::sync::Arc;
use tokio::sync::{futures::Notified, Mutex, Notify};

const SETTINGS_BACKUP_KEY: &str = "backup";

/// Creates, retains, restores and deletes backups of the domain collections
///
/// # Serialization
///
/// Every operation that reads or writes the backup history or the backup
/// config holds the `state` lock for its whole duration, so two backups
/// (for example a scheduler tick and a manual backup) can never interleave.
///
/// # Failure behavior
///
/// A failed backup leaves the stored history and config exactly as they
/// were: the snapshot is assembled and serialized before anything is
/// written, the history is written before the config and put back if the
/// config write fails, and the in-memory config only changes after the
/// stored one did.
pub struct BackupService {
    collections: CollectionStore,
    state: Mutex<BackupConfig>,
    ids: BackupIdGenerator,
    recheck: Notify,
}

impl BackupService {
    /// Load the backup config from `settings.backup` and build the service
    pub async fn init(store: Arc<dyn KeyValueStore>) -> Arc<Self> {
        let collections = CollectionStore::new(store);
        let config = Self::load_config(&collections).await;
        tracing::debug!(
            "Backup config loaded: enabled={}, frequency={}, maxBackups={}",
            config.enabled,
            config.frequency,
            config.max_backups
        );

        Arc::new(Self {
            collections,
            state: Mutex::new(config),
            ids: BackupIdGenerator::new(),
            recheck: Notify::new(),
        })
    }

    async fn load_config(collections: &CollectionStore) -> BackupConfig {
        let settings = collections.get_object(StorageKey::Settings).await;
        match settings.get(SETTINGS_BACKUP_KEY) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                tracing::warn!("Invalid backup settings, using defaults: {}", e);
                BackupConfig::default()
            }),
            None => BackupConfig::default(),
        }
    }

    /// Write the config into `settings.backup`, keeping other settings
    async fn persist_config(&self, config: &BackupConfig) -> GarageResult<()> {
        let mut settings = self.collections.get_object(StorageKey::Settings).await;
        let value =
            serde_json::to_value(config).map_err(|e| GarageError::Serialization(e.to_string()))?;
        settings.insert(SETTINGS_BACKUP_KEY.to_string(), value);
        self.collections
            .set_object(StorageKey::Settings, &settings)
            .await
    }

    pub fn collections(&self) -> &CollectionStore {
        &self.collections
    }

    pub async fn get_backup_config(&self) -> BackupConfig {
        self.state.lock().await.clone()
    }

    /// Merge and persist a partial config
    /// Enabling backups asks a running scheduler to re-check shortly
    pub async fn set_backup_config(
        &self,
        update: BackupConfigUpdate,
    ) -> GarageResult<BackupConfig> {
        let mut state = self.state.lock().await;
        let mut updated = state.clone();
        let became_enabled = updated.apply(&update)?;

        self.persist_config(&updated).await?;
        *state = updated.clone();

        if became_enabled {
            tracing::info!("Backups enabled; scheduling a re-check");
            self.recheck.notify_one();
        }
        Ok(updated)
    }

    /// Resolves when a config change asked for an out-of-band check
    pub(crate) fn recheck_requested(&self) -> Notified<'_> {
        self.recheck.notified()
    }

    pub async fn check_and_perform_backup(&self) -> Option<BackupRecord> {
        self.check_and_perform_backup_at(Utc::now()).await
    }

    /// Take a backup if one is due at `now`
    pub async fn check_and_perform_backup_at(&self, now: DateTime<Utc>) -> Option<BackupRecord> {
        let mut state = self.state.lock().await;
        if !state.backup_due(now) {
            tracing::debug!("No backup due at {}", now);
            return None;
        }
        self.backup_locked(&mut state, now).await
    }

    /// Take a backup now, regardless of schedule
    /// Returns `None` (and logs) if the backup could not be created
    pub async fn perform_backup(&self) -> Option<BackupRecord> {
        let mut state = self.state.lock().await;
        self.backup_locked(&mut state, Utc::now()).await
    }

    async fn backup_locked(
        &self,
        config: &mut BackupConfig,
        now: DateTime<Utc>,
    ) -> Option<BackupRecord> {
        match self.try_backup(config, now).await {
            Ok(record) => {
                tracing::info!(
                    "Created backup {} ({} bytes, #{})",
                    record.id,
                    record.size,
                    config.backup_count
                );
                Some(record)
            }
            Err(e) => {
                tracing::error!("Backup failed: {}", e);
                None
            }
        }
    }

    async fn try_backup(
        &self,
        config: &mut BackupConfig,
        now: DateTime<Utc>,
    ) -> GarageResult<BackupRecord> {
        let snapshot = DomainSnapshot::capture(
            self.collections.vehicles().await,
            self.collections.maintenance().await,
            self.collections.invoices().await,
            self.collections.users().await,
            now,
        );
        let size = serde_json::to_vec(&snapshot)
            .map_err(|e| GarageError::Serialization(e.to_string()))?
            .len() as u64;

        let history = self.get_backup_history().await;
        let mut id = self.ids.next_id(now);
        while history.iter().any(|r| r.id == id) {
            id = self.ids.next_id(now);
        }

        let record = BackupRecord {
            id,
            data: snapshot,
            date: now,
            size,
        };
        self.store_record(history.clone(), record.clone(), config.max_backups).await?;

        let mut updated = config.clone();
        updated.last_backup = Some(now);
        updated.backup_count += 1;
        if let Err(e) = self.persist_config(&updated).await {
            if let Err(rollback) = self
                .collections
                .set(StorageKey::BackupHistory, &history)
                .await
            {
                tracing::error!("Failed to roll back backup history: {}", rollback);
            }
            return Err(e);
        }
        *config = updated;

        Ok(record)
    }

    /// Prepend `record` to the history and evict the oldest past the limit
    pub async fn save_backup(&self, record: BackupRecord) -> GarageResult<()> {
        let state = self.state.lock().await;
        let history = self.get_backup_history().await;
        self.store_record(history, record, state.max_backups).await
    }

    async fn store_record(
        &self,
        mut history: Vec<BackupRecord>,
        record: BackupRecord,
        max_backups: usize,
    ) -> GarageResult<()> {
        history.retain(|r| r.id != record.id);
        history.insert(0, record);
        if history.len() > max_backups {
            let evicted = history.len() - max_backups;
            history.truncate(max_backups);
            tracing::debug!("Evicted {} old backup(s)", evicted);
        }
        self.collections
            .set(StorageKey::BackupHistory, &history)
            .await
    }

    /// Retained backups, most recent first
    pub async fn get_backup_history(&self) -> Vec<BackupRecord> {
        self.collections.get(StorageKey::BackupHistory).await
    }

    pub async fn get_backup(&self, id: &str) -> Option<BackupRecord> {
        self.get_backup_history()
            .await
            .into_iter()
            .find(|r| r.id == id)
    }

    /// Overwrite the stored collections with the ones carried by backup `id`
    ///
    /// Returns `Ok(false)` when no such backup exists. Collections absent
    /// from the backup are left as they are. Writes are not transactional:
    /// if one fails, collections restored before it stay restored and the
    /// error is returned.
    pub async fn restore_from_backup(&self, id: &str) -> GarageResult<bool> {
        let _state = self.state.lock().await;
        let Some(record) = self.get_backup(id).await else {
            tracing::warn!("Restore requested for unknown backup {}", id);
            return Ok(false);
        };

        let data = record.data;
        if let Some(vehicles) = &data.vehicles {
            self.collections.set(StorageKey::Vehicles, vehicles).await?;
        }
        if let Some(maintenance) = &data.maintenance {
            self.collections
                .set(StorageKey::Maintenance, maintenance)
                .await?;
        }
        if let Some(invoices) = &data.invoices {
            self.collections.set(StorageKey::Invoices, invoices).await?;
        }
        if let Some(users) = &data.users {
            self.collections.set(StorageKey::Users, users).await?;
        }

        tracing::info!("Restored backup {}", id);
        Ok(true)
    }

    /// Remove backup `id` from the history
    /// Deleting an id that is not present succeeds without changes
    pub async fn delete_backup(&self, id: &str) -> GarageResult<()> {
        let _state = self.state.lock().await;
        let mut history = self.get_backup_history().await;
        let before = history.len();
        history.retain(|r| r.id != id);

        if history.len() == before {
            tracing::debug!("Backup {} already absent", id);
            return Ok(());
        }
        self.collections
            .set(StorageKey::BackupHistory, &history)
            .await?;
        tracing::info!("Deleted backup {}", id);
        Ok(())
    }

    /// Deliver one backup record as a pretty-printed JSON file
    pub async fn export_backup(
        &self,
        id: &str,
        sink: &dyn FileSink,
    ) -> GarageResult<ExportReceipt> {
        let record = self
            .get_backup(id)
            .await
            .ok_or_else(|| GarageError::NotFound(format!("Backup {}", id)))?;
        let content = serde_json::to_vec_pretty(&record)
            .map_err(|e| GarageError::Serialization(e.to_string()))?;
        let filename = format!("{}_{}.json", record.id, Utc::now().format("%Y-%m-%d"));

        ExportReceipt::deliver(sink, &filename, content, "application/json", false).await
    }
}
