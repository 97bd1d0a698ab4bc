//! Sheet layout detection.
//!
//! Scans the leading header rows of a raw grid for "level" markers (一級,
//! 二級, ... or `Level 1`, `Level 2`, ...) and derives which columns carry
//! the implicit hierarchy, which column (if any) carries a sticky category,
//! and which remaining columns carry row metadata.

use crate::types::{cell_text, DataColumn, Grid, SheetLayout};
use regex::Regex;
use std::sync::OnceLock;

/// Rows scanned for a level marker before giving up.
const MARKER_SCAN_ROWS: usize = 6;
/// Rows checked below the headers when verifying a data column is non-empty.
const DATA_SCAN_ROWS: usize = 30;

/// Bilingual category column labels (exact trimmed match).
const CATEGORY_LABELS: [&str; 2] = ["類別", "Category"];
/// Header labels that never name a data column.
const SKIP_HEADERS: [&str; 3] = ["", "功能模組", "Function Module"];

fn level_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[一二三四五六七八九十]+級$|^Level\s*\d+$").expect("valid level marker regex")
    })
}

/// True when a trimmed header cell marks a hierarchy depth column.
pub fn is_level_marker(text: &str) -> bool {
    level_marker().is_match(text)
}

/// Infer the sheet layout from a raw grid, or `None` when the sheet carries
/// no detectable hierarchy.
pub fn detect_layout(grid: &Grid) -> Option<SheetLayout> {
    // Find the row containing level names (一級, 二級, ...)
    let level_row = grid
        .iter()
        .take(MARKER_SCAN_ROWS)
        .position(|row| row.iter().any(|cell| is_level_marker(&cell.trimmed())))?;

    let header_rows = level_row + 1;

    // Collect hierarchy columns, left to right (shallow → deep)
    let hierarchy_columns: Vec<usize> = grid[level_row]
        .iter()
        .enumerate()
        .filter(|(_, cell)| is_level_marker(&cell.trimmed()))
        .map(|(col, _)| col)
        .collect();

    if hierarchy_columns.is_empty() {
        return None;
    }

    // Category column sits left of the first hierarchy column; when the label
    // appears more than once the last match (row-major) wins
    let mut category_column = None;
    for row in 0..header_rows {
        for col in 0..hierarchy_columns[0] {
            let text = cell_text(grid, row, col);
            if CATEGORY_LABELS.contains(&text.as_str()) {
                category_column = Some(col);
            }
        }
    }

    // Remaining columns become data columns when they have a usable header
    // and at least one non-blank value below the headers
    let width = grid.first().map(|row| row.len()).unwrap_or(0);
    let mut data_columns = Vec::new();
    for col in 0..width {
        if hierarchy_columns.contains(&col) || category_column == Some(col) {
            continue;
        }

        let name = (0..header_rows)
            .map(|row| cell_text(grid, row, col))
            .find(|text| !SKIP_HEADERS.contains(&text.as_str()));
        let Some(name) = name else { continue };

        let data_end = (header_rows + DATA_SCAN_ROWS).min(grid.len());
        let has_data = (header_rows..data_end).any(|row| !cell_text(grid, row, col).is_empty());
        if has_data {
            data_columns.push(DataColumn { column: col, name });
        }
    }

    Some(SheetLayout {
        header_rows,
        hierarchy_columns,
        category_column,
        data_columns,
    })
}
