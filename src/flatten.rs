//! Document flattening for tabular export.
//!
//! Nested mappings inline into dot-joined composite keys; sequences collapse
//! into a comma-joined cell. Nested structure inside such a cell cannot be
//! reconstructed afterwards — the loss is accepted for spreadsheet display.

use crate::tree::{key_text, scalar_text};
use serde_yaml::{Mapping, Value};

/// Excel refuses sheet names longer than this.
const MAX_SHEET_NAME: usize = 31;
/// Characters Excel disallows in sheet names.
const INVALID_SHEET_CHARS: [char; 6] = ['\\', '/', '?', '*', '[', ']'];

/// Fixed padding added to the widest cell when sizing a column.
const WIDTH_PADDING: usize = 2;
/// Column width ceiling.
const MAX_COLUMN_WIDTH: usize = 50;
/// Width assumed for null cells.
const NULL_WIDTH: usize = 4;

/// How a document maps onto workbook sheets.
#[derive(Debug, PartialEq)]
pub enum SheetSplit<'a> {
    /// Root mapping with at least one container value: one sheet per key.
    PerKey(Vec<(String, &'a Value)>),
    /// Everything else lands on a single "Sheet1".
    Single(&'a Value),
}

/// Decide the sheet-splitting policy for a document.
pub fn split_sheets(document: &Value) -> SheetSplit<'_> {
    if let Value::Mapping(map) = document {
        let has_container = map
            .values()
            .any(|v| matches!(v, Value::Mapping(_) | Value::Sequence(_)));
        if has_container {
            return SheetSplit::PerKey(
                map.iter().map(|(k, v)| (key_text(k), v)).collect(),
            );
        }
    }
    SheetSplit::Single(document)
}

/// Derive flat rows from one sheet's worth of document.
pub fn to_rows(data: &Value) -> Vec<Mapping> {
    match data {
        Value::Sequence(seq) => seq
            .iter()
            .map(|item| match item {
                Value::Mapping(map) => flatten_object(map),
                other => single_value_row(other),
            })
            .collect(),
        Value::Mapping(map) => vec![flatten_object(map)],
        other => vec![single_value_row(other)],
    }
}

fn single_value_row(value: &Value) -> Mapping {
    let mut row = Mapping::new();
    row.insert(Value::String("value".to_string()), value.clone());
    row
}

/// Flatten a mapping into a single row with dot-joined composite keys.
pub fn flatten_object(map: &Mapping) -> Mapping {
    let mut row = Mapping::new();
    flatten_into(map, "", &mut row);
    row
}

fn flatten_into(map: &Mapping, prefix: &str, out: &mut Mapping) {
    for (key, value) in map {
        let key = key_text(key);
        let full_key = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Mapping(nested) => flatten_into(nested, &full_key, out),
            Value::Sequence(seq) => {
                // Arrays become a comma-joined cell for display
                out.insert(Value::String(full_key), Value::String(join_sequence(seq)));
            }
            other => {
                out.insert(Value::String(full_key), other.clone());
            }
        }
    }
}

fn join_sequence(seq: &[Value]) -> String {
    seq.iter()
        .map(|v| match v {
            Value::Null => String::new(),
            other => scalar_text(other),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Column order for a set of rows: first-seen key order across all rows.
pub fn column_order(rows: &[Mapping]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            let key = key_text(key);
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
    }
    columns
}

/// Cell text used for display-width measurement.
fn cell_width(value: Option<&Value>) -> usize {
    match value {
        None | Some(Value::Null) => NULL_WIDTH,
        Some(other) => scalar_text(other).chars().count(),
    }
}

/// Presentation-only column width hints: widest of header and cells, padded
/// and capped.
pub fn column_widths(columns: &[String], rows: &[Mapping]) -> Vec<usize> {
    columns
        .iter()
        .map(|column| {
            let key = Value::String(column.clone());
            let widest = rows
                .iter()
                .map(|row| cell_width(row.get(&key)))
                .max()
                .unwrap_or(0)
                .max(column.chars().count());
            (widest + WIDTH_PADDING).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Replace characters Excel disallows and clamp to 31 characters.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let mut sanitized: String = raw
        .chars()
        .map(|ch| if INVALID_SHEET_CHARS.contains(&ch) { '_' } else { ch })
        .collect();
    if sanitized.chars().count() > MAX_SHEET_NAME {
        sanitized = sanitized.chars().take(MAX_SHEET_NAME).collect();
    }
    sanitized
}
