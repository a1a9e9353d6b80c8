pub mod backup;
pub mod export;
pub mod import;
pub mod store;
pub mod traits;

pub use backup::*;
pub use export::{DirectorySink, ExportReceipt, ExportService, FileSink};
pub use import::{parse_bundle, ImportHandler, ImportSummary, ImportedCollection};
pub use store::*;
pub use traits::*;
