use garage_core::AppConfig;
use garage_persistence::{
    BackupService, CollectionStore, DirectorySink, ExportService, ImportHandler, JsonDirStore,
    KeyValueStore,
};
use std::path::PathBuf;
use std::sync::Arc;

pub struct CliContext {
    pub config: AppConfig,
    pub backups: Arc<BackupService>,
}

impl CliContext {
    pub async fn load(data_dir: Option<PathBuf>) -> Self {
        let mut config = AppConfig::load();
        if let Some(dir) = data_dir {
            config.data_dir = Some(dir);
        }

        let data_dir = config.effective_data_dir();
        tracing::debug!("Using data directory {}", data_dir.display());
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonDirStore::new(&data_dir));
        let backups = BackupService::init(store).await;

        Self { config, backups }
    }

    pub fn collections(&self) -> &CollectionStore {
        self.backups.collections()
    }

    pub fn sink(&self, out: Option<PathBuf>) -> DirectorySink {
        DirectorySink::new(out.unwrap_or_else(|| self.config.effective_export_dir()))
    }

    pub fn export_service(&self, out: Option<PathBuf>) -> ExportService {
        ExportService::new(
            Arc::new(self.collections().clone()),
            Arc::new(self.sink(out)),
        )
    }

    pub fn import_handler(&self) -> ImportHandler {
        ImportHandler::new(self.collections().clone(), self.config.import_timeout())
    }
}
