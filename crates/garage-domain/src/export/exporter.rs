//! Format dispatch and the fallback policy.

use super::delimited::render_csv;
use super::fallback::sample_data;
use super::format::{ExportFormat, ExportScope, ExportSection};
use super::models::{ExportData, ExportFile};
use super::spreadsheet::render_workbook;
use super::table::ExportTable;
use crate::snapshot::SNAPSHOT_VERSION;
use chrono::{DateTime, Utc};
use garage_core::{GarageError, GarageResult};
use serde_json::{Map, Value};

/// Renders domain data into downloadable export files.
///
/// An export is never empty: when the requested scope has no records, or
/// rendering the real records fails, deterministic sample content from
/// [`sample_data`] is rendered instead and the file is flagged with
/// `used_fallback`. Only when that also fails is an error returned.
pub struct DataExporter;

impl DataExporter {
    /// `export_<scope>_<YYYY-MM-DD>.<ext>`
    pub fn file_name(scope: ExportScope, format: ExportFormat, at: DateTime<Utc>) -> String {
        format!(
            "export_{}_{}.{}",
            scope.as_str(),
            at.format("%Y-%m-%d"),
            format.extension()
        )
    }

    pub fn render(
        scope: ExportScope,
        format: ExportFormat,
        data: &ExportData,
        at: DateTime<Utc>,
    ) -> GarageResult<ExportFile> {
        let (content, used_fallback) = if data.is_empty_for(scope) {
            tracing::warn!(
                "No {} records to export; using sample content",
                scope.as_str()
            );
            (Self::render_content(scope, format, &sample_data(), at)?, true)
        } else {
            match Self::render_content(scope, format, data, at) {
                Ok(content) => (content, false),
                Err(e) => {
                    tracing::warn!(
                        "Rendering {} export failed ({}); using sample content",
                        format.as_str(),
                        e
                    );
                    (Self::render_content(scope, format, &sample_data(), at)?, true)
                }
            }
        };

        if content.trim_start_matches('\u{feff}').trim().is_empty() {
            return Err(GarageError::Export(format!(
                "{} export of {} produced no content",
                format.as_str(),
                scope.as_str()
            )));
        }

        Ok(ExportFile {
            filename: Self::file_name(scope, format, at),
            mime_type: format.mime_type(),
            content: content.into_bytes(),
            used_fallback,
        })
    }

    fn render_content(
        scope: ExportScope,
        format: ExportFormat,
        data: &ExportData,
        at: DateTime<Utc>,
    ) -> GarageResult<String> {
        let titled = scope == ExportScope::All;
        match format {
            ExportFormat::Json => Self::render_json(scope, data, at),
            ExportFormat::Csv => render_csv(&Self::tables(scope, data), titled),
            ExportFormat::Excel => {
                render_workbook(scope.worksheet_name(), &Self::tables(scope, data), titled)
            }
        }
    }

    fn tables(scope: ExportScope, data: &ExportData) -> Vec<ExportTable> {
        scope
            .sections()
            .iter()
            .map(|section| ExportTable::for_section(*section, data))
            .collect()
    }

    fn render_json(
        scope: ExportScope,
        data: &ExportData,
        at: DateTime<Utc>,
    ) -> GarageResult<String> {
        let mut doc = Map::new();
        doc.insert("exportDate".to_string(), Value::String(at.to_rfc3339()));
        doc.insert(
            "version".to_string(),
            Value::String(SNAPSHOT_VERSION.to_string()),
        );

        for section in scope.sections() {
            let value = match section {
                ExportSection::Vehicles => serde_json::to_value(&data.vehicles),
                ExportSection::Invoices => serde_json::to_value(&data.invoices),
                ExportSection::Maintenance => serde_json::to_value(&data.maintenance),
            }
            .map_err(|e| GarageError::Serialization(e.to_string()))?;
            doc.insert(section.key().to_string(), value);
        }

        serde_json::to_string_pretty(&Value::Object(doc))
            .map_err(|e| GarageError::Serialization(e.to_string()))
    }
}
