use serde::Serialize;
use serde_yaml::{Mapping, Value};

//==============================================================================
// Raw grid model
//==============================================================================

/// A single spreadsheet cell as decoded from a workbook or delimited text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Textual form of the cell (numbers rendered without a trailing `.0`).
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => String::new(),
        }
    }

    /// Trimmed textual form, used for header matching and hierarchy labels.
    pub fn trimmed(&self) -> String {
        self.display().trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Empty => true,
            _ => false,
        }
    }

    /// Typed YAML value, or `None` for blank cells (blanks are omitted, never
    /// represented as explicit null).
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Cell::Text(s) => {
                if s.trim().is_empty() {
                    None
                } else {
                    Some(Value::String(s.clone()))
                }
            }
            Cell::Number(n) => {
                // Integral floats emit as YAML integers (5, not 5.0)
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                    Some(Value::Number(serde_yaml::Number::from(*n as i64)))
                } else {
                    Some(Value::Number(serde_yaml::Number::from(*n)))
                }
            }
            Cell::Bool(b) => Some(Value::Bool(*b)),
            Cell::Empty => None,
        }
    }
}

/// Ordered rows of ordered cells, as handed to the pipeline by I/O collaborators.
pub type Grid = Vec<Vec<Cell>>;

/// Trimmed text of a cell, or empty string when the cell is out of range.
pub fn cell_text(grid: &Grid, row: usize, col: usize) -> String {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(Cell::trimmed)
        .unwrap_or_default()
}

//==============================================================================
// Detected sheet layout
//==============================================================================

/// A data-bearing column with the header name it was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataColumn {
    pub column: usize,
    pub name: String,
}

/// Layout inferred from a sheet's header rows.
///
/// `hierarchy_columns` is strictly ascending (shallow → deep) and non-empty
/// whenever a layout was detected at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub header_rows: usize,
    pub hierarchy_columns: Vec<usize>,
    pub category_column: Option<usize>,
    pub data_columns: Vec<DataColumn>,
}

//==============================================================================
// Render tree model
//==============================================================================

/// Type tag attached to every render tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Null,
    Boolean,
    Number,
    String,
    #[serde(rename = "array")]
    Sequence,
    #[serde(rename = "object")]
    Mapping,
}

impl NodeType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeType::Null,
            Value::Bool(_) => NodeType::Boolean,
            Value::Number(_) => NodeType::Number,
            Value::String(_) => NodeType::String,
            Value::Sequence(_) => NodeType::Sequence,
            Value::Mapping(_) => NodeType::Mapping,
            Value::Tagged(tagged) => NodeType::of(&tagged.value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Null => "null",
            NodeType::Boolean => "boolean",
            NodeType::Number => "number",
            NodeType::String => "string",
            NodeType::Sequence => "array",
            NodeType::Mapping => "object",
        }
    }
}

/// UI-facing materialization of a document node.
///
/// `is_leaf` and `children` are mutually exclusive: a leaf mapping is rendered
/// inline through `fields` instead of being expanded. `child_count` counts all
/// transitive descendants, not direct children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub key: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RenderNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub is_leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Mapping>,
}

impl RenderNode {
    /// A node with no display heuristics attached yet.
    pub fn bare(key: String, value: Value) -> Self {
        let node_type = NodeType::of(&value);
        Self {
            key,
            value,
            node_type,
            children: None,
            child_count: None,
            array_index: None,
            label: None,
            is_leaf: false,
            fields: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display_forms() {
        assert_eq!(Cell::Number(123.0).display(), "123");
        assert_eq!(Cell::Number(1.5).display(), "1.5");
        assert_eq!(Cell::Bool(true).display(), "true");
        assert_eq!(Cell::Text("  spaced  ".into()).trimmed(), "spaced");
        assert_eq!(Cell::Empty.display(), "");
    }

    #[test]
    fn test_cell_blankness() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("   ".into()).is_blank());
        assert!(!Cell::Text("x".into()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
        assert!(!Cell::Bool(false).is_blank());
    }

    #[test]
    fn test_cell_typed_values() {
        assert_eq!(
            Cell::Number(5.0).to_value(),
            Some(Value::Number(serde_yaml::Number::from(5)))
        );
        assert_eq!(
            Cell::Number(2.5).to_value(),
            Some(Value::Number(serde_yaml::Number::from(2.5)))
        );
        assert_eq!(Cell::Bool(false).to_value(), Some(Value::Bool(false)));
        assert_eq!(Cell::Text(" ".into()).to_value(), None);
        assert_eq!(Cell::Empty.to_value(), None);
    }

    #[test]
    fn test_cell_text_out_of_range() {
        let grid: Grid = vec![vec![Cell::Text("a".into())]];
        assert_eq!(cell_text(&grid, 0, 0), "a");
        assert_eq!(cell_text(&grid, 0, 5), "");
        assert_eq!(cell_text(&grid, 3, 0), "");
    }

    #[test]
    fn test_node_type_of_value() {
        assert_eq!(NodeType::of(&Value::Null), NodeType::Null);
        assert_eq!(NodeType::of(&Value::from(1)), NodeType::Number);
        assert_eq!(NodeType::of(&Value::from("s")), NodeType::String);
        assert_eq!(
            NodeType::of(&Value::Sequence(vec![])),
            NodeType::Sequence
        );
        assert_eq!(
            NodeType::of(&Value::Mapping(Mapping::new())),
            NodeType::Mapping
        );
        assert_eq!(NodeType::Sequence.name(), "array");
        assert_eq!(NodeType::Mapping.name(), "object");
    }
}
