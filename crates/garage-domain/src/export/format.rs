use garage_core::GarageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which slice of the domain data an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    Vehicles,
    Maintenance,
    Invoices,
    All,
}

impl ExportScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Maintenance => "maintenance",
            Self::Invoices => "invoices",
            Self::All => "all",
        }
    }

    /// Sections rendered for this scope, in output order.
    pub fn sections(self) -> &'static [ExportSection] {
        match self {
            Self::Vehicles => &[ExportSection::Vehicles],
            Self::Maintenance => &[ExportSection::Maintenance],
            Self::Invoices => &[ExportSection::Invoices],
            Self::All => &[
                ExportSection::Vehicles,
                ExportSection::Invoices,
                ExportSection::Maintenance,
            ],
        }
    }

    pub fn worksheet_name(self) -> &'static str {
        match self {
            Self::Vehicles => "Vehicles",
            Self::Maintenance => "Maintenance",
            Self::Invoices => "Invoices",
            Self::All => "All Data",
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportScope {
    type Err = GarageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vehicles" => Ok(Self::Vehicles),
            "maintenance" => Ok(Self::Maintenance),
            "invoices" => Ok(Self::Invoices),
            "all" => Ok(Self::All),
            other => Err(GarageError::Validation(format!(
                "Unknown export scope '{}'. Expected vehicles, maintenance, invoices or all",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Excel => "xls",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv;charset=utf-8",
            Self::Excel => "application/vnd.ms-excel",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = GarageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "excel" | "xls" => Ok(Self::Excel),
            other => Err(GarageError::Validation(format!(
                "Unknown export format '{}'. Expected json, csv or excel",
                other
            ))),
        }
    }
}

/// One titled block of rows inside an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSection {
    Vehicles,
    Invoices,
    Maintenance,
}

impl ExportSection {
    /// Key used for this section in JSON exports.
    pub fn key(self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Invoices => "invoices",
            Self::Maintenance => "maintenance",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Vehicles => "Vehicles",
            Self::Invoices => "Invoices",
            Self::Maintenance => "Maintenance Records",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scope_case_insensitive() {
        assert_eq!("Vehicles".parse::<ExportScope>().unwrap(), ExportScope::Vehicles);
        assert_eq!("ALL".parse::<ExportScope>().unwrap(), ExportScope::All);
        assert!("users".parse::<ExportScope>().is_err());
    }

    #[test]
    fn test_parse_format_accepts_xls_alias() {
        assert_eq!("xls".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!(ExportFormat::Excel.extension(), "xls");
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_all_scope_section_order() {
        assert_eq!(
            ExportScope::All.sections(),
            &[
                ExportSection::Vehicles,
                ExportSection::Invoices,
                ExportSection::Maintenance
            ]
        );
    }
}
