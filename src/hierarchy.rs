//! Hierarchy builder and flat-sheet normalizer.
//!
//! The builder walks data rows once, tracking the current node name at each
//! hierarchy depth in a per-sheet stack. Adjacent rows encode parent/child
//! relations purely by column position: a blank level cell inherits the value
//! above it, a non-blank cell replaces it and invalidates everything deeper.

use crate::types::{cell_text, Grid, SheetLayout};
use serde_yaml::{Mapping, Value};

/// Build a nested mapping from a grid with a detected hierarchy layout.
pub fn build_tree(grid: &Grid, layout: &SheetLayout) -> Mapping {
    let mut tree = Mapping::new();

    // Stack tracks the current node name at each hierarchy level
    let mut stack: Vec<String> = Vec::new();
    let mut current_category = String::new();

    for row in layout.header_rows..grid.len() {
        // Sticky category: blank cells inherit the last non-blank value
        if let Some(col) = layout.category_column {
            let category = cell_text(grid, row, col);
            if !category.is_empty() {
                current_category = category;
            }
        }

        // Record values at each hierarchy depth, tracking the deepest
        let mut deepest: Option<usize> = None;
        for (depth, &col) in layout.hierarchy_columns.iter().enumerate() {
            let name = cell_text(grid, row, col);
            if !name.is_empty() {
                if stack.len() <= depth {
                    stack.resize(depth + 1, String::new());
                }
                stack[depth] = name;
                deepest = Some(depth);
            }
        }

        // Rows with no hierarchy cell are dropped entirely, metadata included
        let Some(deepest) = deepest else { continue };

        // Discard stale deeper labels left over from a sibling branch
        stack.truncate(deepest + 1);

        let mut full_path: Vec<&str> = Vec::with_capacity(stack.len() + 1);
        if !current_category.is_empty() {
            full_path.push(&current_category);
        }
        full_path.extend(stack.iter().map(String::as_str));

        // Collect non-blank metadata for this row
        let mut metadata = Mapping::new();
        for data_column in &layout.data_columns {
            let text = cell_text(grid, row, data_column.column);
            if !text.is_empty() {
                metadata.insert(
                    Value::String(data_column.name.clone()),
                    Value::String(text),
                );
            }
        }

        insert_path(&mut tree, &full_path, metadata);
    }

    tree
}

/// Walk/create mapping nodes along `path` and attach `metadata` at the end.
///
/// Structural keys take priority: a scalar already sitting on an interior
/// path segment is replaced by an empty mapping. At the final segment,
/// metadata merges into an existing mapping with last-write-wins per key.
fn insert_path(tree: &mut Mapping, path: &[&str], metadata: Mapping) {
    match path {
        [] => {}
        [leaf] => {
            let key = Value::String((*leaf).to_string());
            if !metadata.is_empty() {
                if let Some(Value::Mapping(existing)) = tree.get_mut(&key) {
                    // Already exists as a container: merge, same keys overwritten
                    for (k, v) in metadata {
                        existing.insert(k, v);
                    }
                } else {
                    tree.insert(key, Value::Mapping(metadata));
                }
            } else if !tree.contains_key(&key) {
                tree.insert(key, Value::Mapping(Mapping::new()));
            }
        }
        [segment, rest @ ..] => {
            let key = Value::String((*segment).to_string());
            if !matches!(tree.get(&key), Some(Value::Mapping(_))) {
                tree.insert(key.clone(), Value::Mapping(Mapping::new()));
            }
            if let Some(Value::Mapping(next)) = tree.get_mut(&key) {
                insert_path(next, rest, metadata);
            }
        }
    }
}

/// Fallback conversion for sheets without a detectable hierarchy: one mapping
/// per data row, keyed by the single header row. Blank cells are omitted and
/// rows that end up empty are dropped.
pub fn normalize_flat(grid: &Grid) -> Value {
    let headers: Vec<String> = grid
        .first()
        .map(|row| row.iter().map(|cell| cell.trimmed()).collect())
        .unwrap_or_default();

    let mut rows = Vec::new();
    for row in grid.iter().skip(1) {
        let mut object = Mapping::new();
        for (col, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = row.get(col).and_then(crate::types::Cell::to_value) {
                object.insert(Value::String(header.clone()), value);
            }
        }
        if !object.is_empty() {
            rows.push(Value::Mapping(object));
        }
    }

    Value::Sequence(rows)
}
