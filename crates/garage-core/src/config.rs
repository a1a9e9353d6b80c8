use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60 * 60;
const DEFAULT_RECHECK_DELAY_MS: u64 = 1000;
const DEFAULT_IMPORT_TIMEOUT_SECS: u64 = 30;

/// Application settings read from `garage/config.toml`.
///
/// Every field is optional in the file; missing values fall back to the
/// defaults below. Backup cadence is not configured here, it lives in the
/// data store next to the data it protects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub backup_check_interval_secs: Option<u64>,
    #[serde(default)]
    pub recheck_delay_ms: Option<u64>,
    #[serde(default)]
    pub import_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/garage/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("garage/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("garage\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("garage")))
            .unwrap_or_else(|| PathBuf::from(".garage"))
    }

    pub fn effective_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn backup_check_interval(&self) -> Duration {
        Duration::from_secs(
            self.backup_check_interval_secs
                .unwrap_or(DEFAULT_CHECK_INTERVAL_SECS),
        )
    }

    pub fn recheck_delay(&self) -> Duration {
        Duration::from_millis(self.recheck_delay_ms.unwrap_or(DEFAULT_RECHECK_DELAY_MS))
    }

    pub fn import_timeout(&self) -> Duration {
        Duration::from_secs(self.import_timeout_secs.unwrap_or(DEFAULT_IMPORT_TIMEOUT_SECS))
    }
}
