use crate::store::CollectionStore;
use crate::traits::StorageKey;
use garage_core::{GarageError, GarageResult};
use garage_domain::DomainSnapshot;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

/// One collection overwritten by an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedCollection {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub replaced: Vec<ImportedCollection>,
}

/// Replaces stored collections with the ones carried by a backup file
pub struct ImportHandler {
    collections: CollectionStore,
    timeout: Duration,
}

impl ImportHandler {
    pub fn new(collections: CollectionStore, timeout: Duration) -> Self {
        Self {
            collections,
            timeout,
        }
    }

    /// Read, validate and commit the bundle in `path`
    ///
    /// The deadline covers opening, reading and parsing. Nothing is written
    /// until the whole file has parsed, so a timed-out or rejected import
    /// leaves every collection untouched.
    pub async fn import_data(&self, path: &Path) -> GarageResult<ImportSummary> {
        let read = async {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::NotFound => {
                        GarageError::NotFound(format!("Import file {}", path.display()))
                    }
                    _ => GarageError::Io(e),
                })?;
            Self::read_bundle(file).await
        };
        self.import_within(&path.display().to_string(), read).await
    }

    /// Same as [`import_data`](Self::import_data) for an already opened stream
    pub async fn import_reader<R>(&self, source: &str, reader: R) -> GarageResult<ImportSummary>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.import_within(source, Self::read_bundle(reader)).await
    }

    async fn import_within(
        &self,
        source: &str,
        read: impl Future<Output = GarageResult<DomainSnapshot>>,
    ) -> GarageResult<ImportSummary> {
        let snapshot = tokio::time::timeout(self.timeout, read)
            .await
            .map_err(|_| GarageError::Timeout {
                operation: format!("import of {}", source),
                seconds: self.timeout.as_secs(),
            })??;

        let summary = self.commit(&snapshot).await?;
        tracing::info!(
            "Imported {} collection(s) from {}",
            summary.replaced.len(),
            source
        );
        Ok(summary)
    }

    async fn read_bundle<R: AsyncRead + Unpin>(mut reader: R) -> GarageResult<DomainSnapshot> {
        let mut text = String::new();
        reader.read_to_string(&mut text).await?;
        parse_bundle(&text)
    }

    async fn commit(&self, snapshot: &DomainSnapshot) -> GarageResult<ImportSummary> {
        if let Some(vehicles) = &snapshot.vehicles {
            self.collections.set(StorageKey::Vehicles, vehicles).await?;
        }
        if let Some(maintenance) = &snapshot.maintenance {
            self.collections
                .set(StorageKey::Maintenance, maintenance)
                .await?;
        }
        if let Some(invoices) = &snapshot.invoices {
            self.collections.set(StorageKey::Invoices, invoices).await?;
        }
        if let Some(users) = &snapshot.users {
            self.collections.set(StorageKey::Users, users).await?;
        }

        Ok(ImportSummary {
            replaced: snapshot
                .present_collections()
                .into_iter()
                .map(|(name, count)| ImportedCollection { name, count })
                .collect(),
        })
    }
}

/// Parse a bare bundle or an exported backup record (`{"data": {...}}`)
pub fn parse_bundle(text: &str) -> GarageResult<DomainSnapshot> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        GarageError::Serialization(format!("Import file is not valid JSON: {}", e))
    })?;

    let Value::Object(mut object) = value else {
        return Err(GarageError::Validation(
            "Import file must contain a JSON object".to_string(),
        ));
    };

    let is_record = object.get("data").is_some_and(Value::is_object)
        && !object.contains_key("vehicles");
    let bundle = match (is_record, object.remove("data")) {
        (true, Some(data)) => data,
        _ => Value::Object(object),
    };

    let snapshot: DomainSnapshot = serde_json::from_value(bundle).map_err(|e| {
        GarageError::Serialization(format!("Import file has an invalid collection: {}", e))
    })?;

    if snapshot.carries_nothing() {
        return Err(GarageError::Validation(
            "Import file has none of: vehicles, maintenance, invoices, users".to_string(),
        ));
    }
    Ok(snapshot)
}
