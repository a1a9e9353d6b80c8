use crate::export::sink::{ExportReceipt, FileSink};
use crate::traits::DomainDataProvider;
use chrono::{DateTime, Utc};
use garage_core::{GarageError, GarageResult};
use garage_domain::export::{DataExporter, ExportData, ExportFile, ExportFormat, ExportScope};
use garage_domain::SNAPSHOT_VERSION;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Reads domain data, renders it and hands the file to a [`FileSink`]
pub struct ExportService {
    provider: Arc<dyn DomainDataProvider>,
    sink: Arc<dyn FileSink>,
}

impl ExportService {
    pub fn new(provider: Arc<dyn DomainDataProvider>, sink: Arc<dyn FileSink>) -> Self {
        Self { provider, sink }
    }

    async fn export_data(&self, scope: ExportScope) -> ExportData {
        let vehicles = match scope {
            ExportScope::Vehicles | ExportScope::All => self.provider.get_vehicles().await,
            _ => Vec::new(),
        };
        let maintenance = match scope {
            ExportScope::Maintenance | ExportScope::All => {
                self.provider.get_maintenance_records().await
            }
            _ => Vec::new(),
        };
        let invoices = match scope {
            ExportScope::Invoices | ExportScope::All => self.provider.get_invoices().await,
            _ => Vec::new(),
        };
        ExportData::new(vehicles, maintenance, invoices)
    }

    /// Render without delivering
    pub async fn render(
        &self,
        scope: ExportScope,
        format: ExportFormat,
    ) -> GarageResult<ExportFile> {
        let data = self.export_data(scope).await;
        DataExporter::render(scope, format, &data, Utc::now())
    }

    /// Render `scope` as `format` and deliver it through the sink
    pub async fn export_data_as_format(
        &self,
        scope: ExportScope,
        format: ExportFormat,
    ) -> GarageResult<ExportReceipt> {
        let result = async {
            let file = self.render(scope, format).await?;
            ExportReceipt::deliver(
                self.sink.as_ref(),
                &file.filename,
                file.content,
                file.mime_type,
                file.used_fallback,
            )
            .await
        }
        .await;

        if let Err(e) = &result {
            tracing::error!("Export of {} as {} failed: {}", scope, format, e);
        }
        result
    }

    /// Deliver every collection, users included, as one JSON document
    pub async fn export_all_data(&self) -> GarageResult<ExportReceipt> {
        let now = Utc::now();
        let content = self.full_document(now).await?;
        let filename = format!("full-backup_all_{}.json", now.format("%Y-%m-%d"));

        ExportReceipt::deliver(
            self.sink.as_ref(),
            &filename,
            content,
            ExportFormat::Json.mime_type(),
            false,
        )
        .await
        .inspect_err(|e| tracing::error!("Full data export failed: {}", e))
    }

    async fn full_document(&self, now: DateTime<Utc>) -> GarageResult<Vec<u8>> {
        let to_value = |value: Result<Value, serde_json::Error>| {
            value.map_err(|e| GarageError::Serialization(e.to_string()))
        };

        let mut doc = Map::new();
        doc.insert(
            "vehicles".to_string(),
            to_value(serde_json::to_value(self.provider.get_vehicles().await))?,
        );
        doc.insert(
            "maintenance".to_string(),
            to_value(serde_json::to_value(
                self.provider.get_maintenance_records().await,
            ))?,
        );
        doc.insert(
            "invoices".to_string(),
            to_value(serde_json::to_value(self.provider.get_invoices().await))?,
        );
        doc.insert(
            "users".to_string(),
            to_value(serde_json::to_value(self.provider.get_users().await))?,
        );
        doc.insert("exportDate".to_string(), Value::String(now.to_rfc3339()));
        doc.insert(
            "version".to_string(),
            Value::String(SNAPSHOT_VERSION.to_string()),
        );

        serde_json::to_vec_pretty(&Value::Object(doc))
            .map_err(|e| GarageError::Serialization(e.to_string()))
    }
}
