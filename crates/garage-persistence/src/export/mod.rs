pub mod service;
pub mod sink;

pub use service::ExportService;
pub use sink::{DirectorySink, ExportReceipt, FileSink};

#[cfg(test)]
pub use sink::MockFileSink;
