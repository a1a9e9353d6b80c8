//! Row projection shared by the CSV and spreadsheet renderers.

use super::format::ExportSection;
use super::models::ExportData;
use crate::{Invoice, MaintenanceRecord, Vehicle};

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn optional(value: &Option<String>) -> Self {
        Self::Text(value.clone().unwrap_or_default())
    }

    /// Plain-text rendering, as written into a CSV field.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

const VEHICLE_HEADERS: &[&str] = &[
    "ID",
    "License Plate",
    "Brand",
    "Model",
    "Color",
    "Owner",
    "Owner Phone",
    "Status",
    "Entry Time",
    "Exit Time",
];

const INVOICE_HEADERS: &[&str] = &[
    "ID",
    "Invoice Number",
    "License Plate",
    "Customer",
    "Amount",
    "Tax",
    "Total",
    "Status",
    "Issue Date",
    "Due Date",
];

const MAINTENANCE_HEADERS: &[&str] = &[
    "ID",
    "Vehicle ID",
    "License Plate",
    "Service Type",
    "Description",
    "Technician",
    "Cost",
    "Status",
    "Start Date",
    "Completion Date",
];

/// Header row plus data rows for one export section.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    pub fn for_section(section: ExportSection, data: &ExportData) -> Self {
        match section {
            ExportSection::Vehicles => Self::vehicles(&data.vehicles),
            ExportSection::Invoices => Self::invoices(&data.invoices),
            ExportSection::Maintenance => Self::maintenance(&data.maintenance),
        }
    }

    pub fn vehicles(vehicles: &[Vehicle]) -> Self {
        let rows = vehicles
            .iter()
            .map(|v| {
                vec![
                    Cell::text(&v.id),
                    Cell::text(&v.license_plate),
                    Cell::text(&v.brand),
                    Cell::text(&v.model),
                    Cell::text(&v.color),
                    Cell::text(&v.owner_name),
                    Cell::text(&v.owner_phone),
                    Cell::text(&v.status),
                    Cell::optional(&v.entry_time),
                    Cell::optional(&v.exit_time),
                ]
            })
            .collect();

        Self {
            title: ExportSection::Vehicles.title(),
            headers: VEHICLE_HEADERS,
            rows,
        }
    }

    pub fn invoices(invoices: &[Invoice]) -> Self {
        let rows = invoices
            .iter()
            .map(|i| {
                vec![
                    Cell::text(&i.id),
                    Cell::text(&i.invoice_number),
                    Cell::text(&i.license_plate),
                    Cell::text(&i.customer_name),
                    Cell::Number(i.amount),
                    Cell::Number(i.tax),
                    Cell::Number(i.total_amount),
                    Cell::text(&i.status),
                    Cell::optional(&i.issue_date),
                    Cell::optional(&i.due_date),
                ]
            })
            .collect();

        Self {
            title: ExportSection::Invoices.title(),
            headers: INVOICE_HEADERS,
            rows,
        }
    }

    pub fn maintenance(records: &[MaintenanceRecord]) -> Self {
        let rows = records
            .iter()
            .map(|m| {
                vec![
                    Cell::text(&m.id),
                    Cell::text(&m.vehicle_id),
                    Cell::text(&m.license_plate),
                    Cell::text(&m.service_type),
                    Cell::text(&m.description),
                    Cell::text(&m.technician),
                    Cell::Number(m.cost),
                    Cell::text(&m.status),
                    Cell::optional(&m.start_date),
                    Cell::optional(&m.completion_date),
                ]
            })
            .collect();

        Self {
            title: ExportSection::Maintenance.title(),
            headers: MAINTENANCE_HEADERS,
            rows,
        }
    }
}
