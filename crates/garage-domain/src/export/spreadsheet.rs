//! Minimal SpreadsheetML (Excel 2003 XML) rendering.

use super::table::{Cell, ExportTable};
use garage_core::{GarageError, GarageResult};
use std::fmt::{self, Write};

const XML_HEADER: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<?mso-application progid=\"Excel.Sheet\"?>\n";
const WORKBOOK_OPEN: &str = "<Workbook xmlns=\"urn:schemas-microsoft-com:office:spreadsheet\" xmlns:ss=\"urn:schemas-microsoft-com:office:spreadsheet\">\n";

/// Render tables into a single worksheet, one block per table.
///
/// Blocks are separated by an empty row, mirroring the blank lines of the
/// CSV rendering.
pub fn render_workbook(
    worksheet: &str,
    tables: &[ExportTable],
    titled: bool,
) -> GarageResult<String> {
    write_workbook(worksheet, tables, titled)
        .map_err(|e| GarageError::Export(format!("Spreadsheet writer error: {}", e)))
}

fn write_workbook(
    worksheet: &str,
    tables: &[ExportTable],
    titled: bool,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    out.push_str(XML_HEADER);
    out.push_str(WORKBOOK_OPEN);
    writeln!(out, " <Worksheet ss:Name=\"{}\">", escape(worksheet))?;
    out.push_str("  <Table>\n");

    for (index, table) in tables.iter().enumerate() {
        if index > 0 {
            out.push_str("   <Row/>\n");
        }
        if titled {
            write_row(&mut out, &[Cell::text(table.title)])?;
        }
        let headers: Vec<Cell> = table.headers.iter().map(|h| Cell::text(*h)).collect();
        write_row(&mut out, &headers)?;
        for row in &table.rows {
            write_row(&mut out, row)?;
        }
    }

    out.push_str("  </Table>\n </Worksheet>\n</Workbook>\n");
    Ok(out)
}

fn write_row(out: &mut String, cells: &[Cell]) -> fmt::Result {
    out.push_str("   <Row>");
    for cell in cells {
        match cell {
            Cell::Text(text) => write!(
                out,
                "<Cell><Data ss:Type=\"String\">{}</Data></Cell>",
                escape(text)
            )?,
            Cell::Number(n) => write!(out, "<Cell><Data ss:Type=\"Number\">{}</Data></Cell>", n)?,
        }
    }
    out.push_str("</Row>\n");
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Invoice, Vehicle};

    #[test]
    fn test_workbook_structure() {
        let table = ExportTable::vehicles(&[Vehicle::new("v1", "京A12345")]);
        let xml = render_workbook("Vehicles", &[table], false).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<Worksheet ss:Name=\"Vehicles\">"));
        assert!(xml.contains("<Data ss:Type=\"String\">京A12345</Data>"));
        assert_eq!(xml.matches("<Worksheet ").count(), 1);
        assert!(xml.trim_end().ends_with("</Workbook>"));
    }

    #[test]
    fn test_numbers_are_typed() {
        let table = ExportTable::invoices(&[Invoice::new("i1", "INV-1").with_amount(250.5, 0.0)]);
        let xml = render_workbook("Invoices", &[table], false).unwrap();

        assert!(xml.contains("<Data ss:Type=\"Number\">250.5</Data>"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut vehicle = Vehicle::new("v1", "A&B");
        vehicle.owner_name = "<Lee>".to_string();
        let xml = render_workbook("Vehicles", &[ExportTable::vehicles(&[vehicle])], false).unwrap();

        assert!(xml.contains("A&amp;B"));
        assert!(xml.contains("&lt;Lee&gt;"));
        assert!(!xml.contains("<Lee>"));
    }

    #[test]
    fn test_titled_blocks_are_separated_by_empty_row() {
        let tables = vec![
            ExportTable::vehicles(&[Vehicle::new("v1", "ABC")]),
            ExportTable::invoices(&[Invoice::new("i1", "INV-1")]),
        ];
        let xml = render_workbook("All Data", &tables, true).unwrap();

        assert_eq!(xml.matches("<Row/>").count(), 1);
        assert!(xml.contains("<Data ss:Type=\"String\">Vehicles</Data>"));
        assert!(xml.contains("<Data ss:Type=\"String\">Invoices</Data>"));
    }
}
