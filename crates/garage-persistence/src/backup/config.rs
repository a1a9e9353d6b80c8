use chrono::{DateTime, Datelike, Utc};
use garage_core::{GarageError, GarageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_BACKUPS: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackupFrequency {
    type Err = GarageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(GarageError::Validation(format!(
                "Unknown backup frequency '{}'. Expected daily, weekly or monthly",
                other
            ))),
        }
    }
}

/// Whether a backup taken at `last` is stale at `now`.
///
/// Daily and weekly compare whole elapsed days; monthly compares calendar
/// months, so a backup on the 31st is due again on the 1st.
pub fn is_due(now: DateTime<Utc>, last: DateTime<Utc>, frequency: BackupFrequency) -> bool {
    match frequency {
        BackupFrequency::Daily => (now - last).num_days() >= 1,
        BackupFrequency::Weekly => (now - last).num_days() >= 7,
        BackupFrequency::Monthly => (now.year(), now.month()) != (last.year(), last.month()),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_backups() -> usize {
    DEFAULT_MAX_BACKUPS
}

/// Backup cadence and bookkeeping, stored as `settings.backup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub frequency: BackupFrequency,
    #[serde(default)]
    pub last_backup: Option<DateTime<Utc>>,
    #[serde(default)]
    pub backup_count: u64,
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            frequency: BackupFrequency::default(),
            last_backup: None,
            backup_count: 0,
            max_backups: default_max_backups(),
        }
    }
}

impl BackupConfig {
    /// Whether the scheduler should take a backup at `now`.
    /// Never-backed-up stores are always due.
    pub fn backup_due(&self, now: DateTime<Utc>) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_backup {
            None => true,
            Some(last) => is_due(now, last, self.frequency),
        }
    }

    /// Merge `update` over this config.
    ///
    /// Returns true when the update switched backups from disabled to enabled.
    pub fn apply(&mut self, update: &BackupConfigUpdate) -> GarageResult<bool> {
        if update.max_backups == Some(0) {
            return Err(GarageError::Validation(
                "maxBackups must be at least 1".to_string(),
            ));
        }

        let was_enabled = self.enabled;
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(max_backups) = update.max_backups {
            self.max_backups = max_backups;
        }
        Ok(!was_enabled && self.enabled)
    }
}

/// Partial update for [`BackupConfig`]; `None` leaves a field unchanged.
///
/// `lastBackup` and `backupCount` are bookkeeping and only change when a
/// backup succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfigUpdate {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub frequency: Option<BackupFrequency>,
    #[serde(default)]
    pub max_backups: Option<usize>,
}

impl BackupConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.frequency.is_none() && self.max_backups.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_daily_due_after_full_day() {
        let last = at("2024-05-10T08:00:00Z");
        assert!(!is_due(last + Duration::hours(23), last, BackupFrequency::Daily));
        assert!(is_due(last + Duration::hours(24), last, BackupFrequency::Daily));
    }

    #[test]
    fn test_weekly_due_after_seven_days() {
        let last = at("2024-05-10T08:00:00Z");
        assert!(!is_due(last + Duration::days(6), last, BackupFrequency::Weekly));
        assert!(is_due(last + Duration::days(7), last, BackupFrequency::Weekly));
    }

    #[test]
    fn test_monthly_compares_calendar_month() {
        let last = at("2024-05-31T23:00:00Z");
        assert!(is_due(at("2024-06-01T00:30:00Z"), last, BackupFrequency::Monthly));
        assert!(!is_due(
            at("2024-05-01T00:00:00Z"),
            at("2024-05-30T00:00:00Z"),
            BackupFrequency::Monthly
        ));
        assert!(is_due(
            at("2025-05-01T00:00:00Z"),
            at("2024-05-30T00:00:00Z"),
            BackupFrequency::Monthly
        ));
    }

    #[test]
    fn test_clock_moving_backwards_is_not_due() {
        let last = at("2024-05-10T08:00:00Z");
        assert!(!is_due(last - Duration::days(3), last, BackupFrequency::Daily));
    }

    #[test]
    fn test_first_run_is_due() {
        let config = BackupConfig::default();
        assert!(config.backup_due(Utc::now()));
    }

    #[test]
    fn test_disabled_is_never_due() {
        let config = BackupConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(!config.backup_due(Utc::now()));
    }

    #[test]
    fn test_defaults_from_empty_object() {
        let config: BackupConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BackupConfig::default());
        assert_eq!(config.max_backups, 30);
        assert!(config.enabled);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let config = BackupConfig {
            last_backup: Some(at("2024-05-10T08:00:00Z")),
            backup_count: 3,
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["maxBackups"], 30);
        assert_eq!(value["backupCount"], 3);
        assert_eq!(value["frequency"], "daily");
        assert!(value["lastBackup"].as_str().unwrap().starts_with("2024-05-10T08:00:00"));
    }

    #[test]
    fn test_apply_reports_enable_transition() {
        let mut config = BackupConfig {
            enabled: false,
            ..Default::default()
        };
        let enable = BackupConfigUpdate {
            enabled: Some(true),
            ..Default::default()
        };

        assert!(config.apply(&enable).unwrap());
        assert!(!config.apply(&enable).unwrap());
    }

    #[test]
    fn test_apply_rejects_zero_retention() {
        let mut config = BackupConfig::default();
        let update = BackupConfigUpdate {
            frequency: Some(BackupFrequency::Weekly),
            max_backups: Some(0),
            ..Default::default()
        };

        assert!(config.apply(&update).is_err());
        assert_eq!(config.frequency, BackupFrequency::Daily);
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!("Weekly".parse::<BackupFrequency>().unwrap(), BackupFrequency::Weekly);
        assert!("hourly".parse::<BackupFrequency>().is_err());
    }
}
