use crate::error::StrataResult;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Serialize a document to YAML text (2-space indent, insertion order kept,
/// no anchors or aliases).
pub fn document_to_string(document: &Value) -> StrataResult<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Serialize with the provenance comment header emitted on imports.
pub fn render_with_header(
    document: &Value,
    source: &str,
    sheets: &[String],
) -> StrataResult<String> {
    let body = document_to_string(document)?;
    Ok(format!(
        "# Generated from: {}\n# Sheets: {}\n\n{}",
        source,
        sheets.join(", "),
        body
    ))
}

/// Write document text to a file.
pub fn write_document(path: &Path, text: &str) -> StrataResult<()> {
    fs::write(path, text)?;
    Ok(())
}
