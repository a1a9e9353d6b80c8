//! Data export rendering.
//!
//! Turns domain collections into JSON, CSV or spreadsheet-XML bytes. Nothing
//! here touches the filesystem: delivery is the caller's concern, so every
//! format can be inspected before it is written anywhere.

pub mod delimited;
pub mod exporter;
pub mod fallback;
pub mod format;
pub mod models;
pub mod spreadsheet;
pub mod table;

pub use exporter::DataExporter;
pub use format::{ExportFormat, ExportScope, ExportSection};
pub use models::{ExportData, ExportFile};
pub use table::{Cell, ExportTable};
