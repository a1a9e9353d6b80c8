//! CSV rendering.

use super::table::{Cell, ExportTable};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use garage_core::{GarageError, GarageResult};

/// Byte-order mark prepended so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &str = "\u{feff}";

/// Render tables as one CSV document.
///
/// With `titled`, each table starts with a one-field title record; tables
/// are separated by a blank line.
pub fn render_csv(tables: &[ExportTable], titled: bool) -> GarageResult<String> {
    let sections = tables
        .iter()
        .map(|table| render_section(table, titled))
        .collect::<GarageResult<Vec<String>>>()?;

    Ok(format!("{}{}", UTF8_BOM, sections.join("\n")))
}

fn render_section(table: &ExportTable, titled: bool) -> GarageResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(vec![]);

    if titled {
        writer.write_record([table.title]).map_err(csv_error)?;
    }
    writer.write_record(table.headers).map_err(csv_error)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(Cell::to_text))
            .map_err(csv_error)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| GarageError::Export(format!("CSV writer error: {}", e)))?;
    String::from_utf8(data)
        .map_err(|e| GarageError::Export(format!("UTF-8 conversion error: {}", e)))
}

fn csv_error(err: csv::Error) -> GarageError {
    GarageError::Export(format!("CSV writer error: {}", err))
}
