use chrono::{DateTime, Utc};
use garage_domain::DomainSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// One retained backup: the snapshot plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub id: String,
    pub data: DomainSnapshot,
    pub date: DateTime<Utc>,
    /// Serialized size of `data` in bytes.
    pub size: u64,
}

/// Summary row for listings, without the bundled data.
#[derive(Debug, Clone, Serialize)]
pub struct BackupSummary {
    pub id: String,
    pub date: DateTime<Utc>,
    pub size: u64,
    pub collections: Vec<(&'static str, usize)>,
}

impl From<&BackupRecord> for BackupSummary {
    fn from(record: &BackupRecord) -> Self {
        Self {
            id: record.id.clone(),
            date: record.date,
            size: record.size,
            collections: record.data.present_collections(),
        }
    }
}

/// Generates `backup_YYYYMMDD_<epoch-ms>` ids.
///
/// The millisecond component never repeats within a process: if the clock
/// has not advanced (or went backwards) since the last id, the previous
/// value plus one is used instead.
#[derive(Debug, Default)]
pub struct BackupIdGenerator {
    last_millis: AtomicI64,
}

impl BackupIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let wanted = now.timestamp_millis();
        let previous = self
            .last_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(wanted.max(last + 1))
            })
            .unwrap_or(wanted);
        let millis = wanted.max(previous + 1);
        format!("backup_{}_{}", now.format("%Y%m%d"), millis)
    }
}
