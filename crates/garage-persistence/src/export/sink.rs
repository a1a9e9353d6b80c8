use crate::store::AtomicWriter;
use async_trait::async_trait;
use garage_core::{GarageError, GarageResult};
use serde::Serialize;
use std::path::PathBuf;

/// Destination for rendered export files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Deliver `content` under `filename` and return where it ended up
    async fn write(&self, filename: &str, content: &[u8], mime_type: &str) -> GarageResult<String>;
}

/// Writes export files into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FileSink for DirectorySink {
    async fn write(&self, filename: &str, content: &[u8], mime_type: &str) -> GarageResult<String> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == ".."
        {
            return Err(GarageError::Validation(format!(
                "Invalid export file name '{}'",
                filename
            )));
        }

        let path = self.dir.join(filename);
        AtomicWriter::write_atomic(&path, content).await?;
        tracing::info!(
            "Exported {} ({}, {} bytes)",
            path.display(),
            mime_type,
            content.len()
        );
        Ok(path.display().to_string())
    }
}

/// Outcome of a delivered export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub filename: String,
    pub location: String,
    pub bytes: usize,
    pub used_fallback: bool,
}

impl ExportReceipt {
    pub(crate) async fn deliver(
        sink: &dyn FileSink,
        filename: &str,
        content: Vec<u8>,
        mime_type: &str,
        used_fallback: bool,
    ) -> GarageResult<Self> {
        let location = sink.write(filename, &content, mime_type).await?;
        Ok(Self {
            filename: filename.to_string(),
            location,
            bytes: content.len(),
            used_fallback,
        })
    }
}
