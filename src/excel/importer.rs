//! Workbook importer - spreadsheet → hierarchical document.

use crate::error::{StrataError, StrataResult};
use crate::hierarchy::{build_tree, normalize_flat};
use crate::layout::detect_layout;
use crate::types::{Cell, Grid};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// A document assembled from a workbook, with the provenance needed for the
/// generated-from header.
#[derive(Debug)]
pub struct ImportedDocument {
    pub source: String,
    pub sheets: Vec<String>,
    pub document: Value,
}

/// Importer for converting workbooks (or delimited text) to documents.
pub struct WorkbookImporter {
    path: PathBuf,
}

impl WorkbookImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the file into a root mapping keyed by sheet name.
    ///
    /// Undecodable input fails the whole import; there is no partial-sheet
    /// recovery.
    pub fn import(&self) -> StrataResult<ImportedDocument> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" => self.import_workbook(),
            "csv" | "tsv" | "txt" => self.import_delimited(&extension),
            other => Err(StrataError::Import(format!(
                "Unsupported file type '.{}' (expected .xlsx, .xlsm, .csv, .tsv or .txt)",
                other
            ))),
        }
    }

    /// Import a multi-sheet .xlsx workbook.
    fn import_workbook(&self) -> StrataResult<ImportedDocument> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| StrataError::Import(format!("Failed to open workbook: {}", e)))?;

        let sheet_names = workbook.sheet_names().to_vec();
        let mut root = Mapping::new();

        for sheet_name in &sheet_names {
            let range = workbook
                .worksheet_range(sheet_name)
                .map_err(|e| StrataError::Import(format!("Failed to read sheet '{}': {}", sheet_name, e)))?;
            let grid = grid_from_range(&range);
            root.insert(Value::String(sheet_name.clone()), sheet_to_value(&grid));
        }

        Ok(ImportedDocument {
            source: self.source_name(),
            sheets: sheet_names,
            document: Value::Mapping(root),
        })
    }

    /// Import delimited text as one implicit sheet named after the file stem.
    fn import_delimited(&self, extension: &str) -> StrataResult<ImportedDocument> {
        let content = std::fs::read_to_string(&self.path)?;
        let delimiter = if extension == "tsv" { '\t' } else { ',' };
        let grid = parse_delimited(&content, delimiter);

        let sheet_name = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Sheet1")
            .to_string();

        let mut root = Mapping::new();
        root.insert(Value::String(sheet_name.clone()), sheet_to_value(&grid));

        Ok(ImportedDocument {
            source: self.source_name(),
            sheets: vec![sheet_name],
            document: Value::Mapping(root),
        })
    }

    fn source_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// Convert one sheet's grid: hierarchical when a layout is detected, flat
/// row-mappings otherwise. Detection failure is a defined fallback, never an
/// error.
pub fn sheet_to_value(grid: &Grid) -> Value {
    match detect_layout(grid) {
        Some(layout) => Value::Mapping(build_tree(grid, &layout)),
        None => normalize_flat(grid),
    }
}

/// Decode a calamine cell range into the raw grid model.
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => Cell::Text(s.clone()),
                    Data::Float(f) => Cell::Number(*f),
                    Data::Int(i) => Cell::Number(*i as f64),
                    Data::Bool(b) => Cell::Bool(*b),
                    Data::Empty => Cell::Empty,
                    other => Cell::Text(other.to_string()),
                })
                .collect()
        })
        .collect()
}

/// Minimal quote-aware delimited-text decoder (no csv dependency): handles
/// quoted fields, doubled quotes and CRLF line endings.
fn parse_delimited(content: &str, delimiter: char) -> Grid {
    let mut grid = Grid::new();

    for line in content.lines() {
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if in_quotes {
                if ch == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(ch);
                }
            } else if ch == '"' && field.is_empty() {
                in_quotes = true;
            } else if ch == delimiter {
                row.push(infer_cell(&field));
                field.clear();
            } else {
                field.push(ch);
            }
        }
        row.push(infer_cell(&field));
        grid.push(row);
    }

    grid
}

/// String-to-typed-value inference for delimited cells, mirroring what a
/// spreadsheet reader produces for workbooks.
fn infer_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return Cell::Number(number);
    }
    match trimmed {
        "true" => Cell::Bool(true),
        "false" => Cell::Bool(false),
        _ => Cell::Text(field.to_string()),
    }
}
