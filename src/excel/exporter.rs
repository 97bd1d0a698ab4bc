//! Workbook exporter - hierarchical document → .xlsx.

use crate::error::{StrataError, StrataResult};
use crate::flatten::{column_order, column_widths, sanitize_sheet_name, split_sheets, to_rows, SheetSplit};
use crate::tree::scalar_text;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Exporter for writing a document to a workbook.
pub struct WorkbookExporter {
    document: Value,
}

impl WorkbookExporter {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Export to an .xlsx file.
    ///
    /// A failure on one sheet does not roll back sheets already written to
    /// the in-memory workbook.
    pub fn export(&self, output_path: &Path) -> StrataResult<()> {
        let mut workbook = Workbook::new();

        match split_sheets(&self.document) {
            SheetSplit::PerKey(sheets) => {
                for (key, value) in sheets {
                    self.export_sheet(&mut workbook, &key, value)?;
                }
            }
            SheetSplit::Single(value) => {
                self.export_sheet(&mut workbook, "Sheet1", value)?;
            }
        }

        workbook
            .save(output_path)
            .map_err(|e| StrataError::Export(format!("Failed to save workbook: {}", e)))?;

        Ok(())
    }

    fn export_sheet(
        &self,
        workbook: &mut Workbook,
        name: &str,
        value: &Value,
    ) -> StrataResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sanitize_sheet_name(name))
            .map_err(|e| StrataError::Export(format!("Failed to set sheet name: {}", e)))?;

        let rows = to_rows(value);
        if rows.is_empty() {
            // Empty sheet gets a placeholder instead of a bare header
            worksheet
                .write_string(0, 0, name)
                .and_then(|ws| ws.write_string(1, 0, "(empty)"))
                .map_err(|e| StrataError::Export(format!("Failed to write placeholder: {}", e)))?;
            return Ok(());
        }

        let columns = column_order(&rows);

        // Header row
        for (col_idx, column) in columns.iter().enumerate() {
            worksheet
                .write_string(0, col_idx as u16, column)
                .map_err(|e| StrataError::Export(format!("Failed to write header: {}", e)))?;
        }

        // Data rows
        for (row_idx, row) in rows.iter().enumerate() {
            write_row(worksheet, (row_idx + 1) as u32, &columns, row)?;
        }

        // Presentation-only width hints
        for (col_idx, width) in column_widths(&columns, &rows).iter().enumerate() {
            worksheet
                .set_column_width(col_idx as u16, *width as f64)
                .map_err(|e| StrataError::Export(format!("Failed to set column width: {}", e)))?;
        }

        Ok(())
    }
}

fn write_row(
    worksheet: &mut Worksheet,
    excel_row: u32,
    columns: &[String],
    row: &Mapping,
) -> StrataResult<()> {
    for (col_idx, column) in columns.iter().enumerate() {
        let key = Value::String(column.clone());
        let Some(value) = row.get(&key) else { continue };
        write_cell(worksheet, excel_row, col_idx as u16, value)?;
    }
    Ok(())
}

/// Write a single typed cell; nulls leave the cell blank.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
) -> StrataResult<()> {
    let result = match value {
        Value::Null => return Ok(()),
        Value::Number(n) => match n.as_f64() {
            Some(f) => worksheet.write_number(row, col, f),
            None => worksheet.write_string(row, col, n.to_string()),
        },
        Value::Bool(b) => worksheet.write_boolean(row, col, *b),
        Value::String(s) => worksheet.write_string(row, col, s),
        other => worksheet.write_string(row, col, scalar_text(other)),
    };

    result.map_err(|e| StrataError::Export(format!("Failed to write cell: {}", e)))?;
    Ok(())
}
