//! Strata - hierarchical spreadsheet ↔ YAML converter
//!
//! This library converts between three representations of semi-structured
//! data: raw tabular grids whose leveled headers encode an implicit
//! hierarchy, an ordered YAML document, and a renderable tree model with
//! display heuristics.
//!
//! # Pipeline
//!
//! - Import: layout detection → hierarchy build (or flat-row fallback) →
//!   YAML text
//! - Export: document → flattened rows → workbook sheets
//! - Display: document → render tree with labels, leaf flattening and
//!   descendant counts
//!
//! # Example
//!
//! ```no_run
//! use strata::excel::WorkbookImporter;
//! use strata::tree::materialize;
//!
//! let imported = WorkbookImporter::new("features.xlsx").import()?;
//! let nodes = materialize(&imported.document);
//!
//! println!("Sheets: {}", imported.sheets.len());
//! println!("Top-level nodes: {}", nodes.len());
//! # Ok::<(), strata::error::StrataError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod flatten;
pub mod hierarchy;
pub mod layout;
pub mod parser;
pub mod tree;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{StrataError, StrataResult};
pub use types::{Cell, DataColumn, Grid, NodeType, RenderNode, SheetLayout};
