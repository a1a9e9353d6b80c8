//! Export input and output types.

use super::format::{ExportScope, ExportSection};
use crate::{Invoice, MaintenanceRecord, Vehicle};

/// The collections a format export reads from.
#[derive(Debug, Clone, Default)]
pub struct ExportData {
    pub vehicles: Vec<Vehicle>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub invoices: Vec<Invoice>,
}

impl ExportData {
    pub fn new(
        vehicles: Vec<Vehicle>,
        maintenance: Vec<MaintenanceRecord>,
        invoices: Vec<Invoice>,
    ) -> Self {
        Self {
            vehicles,
            maintenance,
            invoices,
        }
    }

    fn section_len(&self, section: ExportSection) -> usize {
        match section {
            ExportSection::Vehicles => self.vehicles.len(),
            ExportSection::Invoices => self.invoices.len(),
            ExportSection::Maintenance => self.maintenance.len(),
        }
    }

    /// True when no section of `scope` has a single record.
    pub fn is_empty_for(&self, scope: ExportScope) -> bool {
        scope
            .sections()
            .iter()
            .all(|section| self.section_len(*section) == 0)
    }
}

/// A rendered export, ready for delivery.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: Vec<u8>,
    /// Whether sample content replaced empty source data.
    pub used_fallback: bool,
}

impl ExportFile {
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}
