//! Workbook import/export.
//!
//! Bidirectional spreadsheet ↔ YAML conversion:
//! - Import: workbook or delimited text → hierarchical document
//! - Export: document → .xlsx with one sheet per top-level container

mod exporter;
mod importer;

pub use exporter::WorkbookExporter;
pub use importer::{ImportedDocument, WorkbookImporter};
