use crate::error::{StrataError, StrataResult};
use crate::excel::{WorkbookExporter, WorkbookImporter};
use crate::parser::DocumentState;
use crate::tree::scalar_text;
use crate::types::RenderNode;
use crate::{parser, writer};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute the import command: workbook/delimited text → YAML document.
pub fn import(input: PathBuf, output: Option<PathBuf>, verbose: bool) -> StrataResult<()> {
    println!("{}", "📥 Strata - Workbook Import".bold().green());
    println!("   Input: {}", input.display());

    let output = output.unwrap_or_else(|| input.with_extension("yaml"));

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let imported = WorkbookImporter::new(&input).import()?;

    if verbose {
        for sheet in &imported.sheets {
            println!("   Sheet: {}", sheet.bright_blue());
        }
    }

    let text = writer::render_with_header(&imported.document, &imported.source, &imported.sheets)?;
    writer::write_document(&output, &text)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   {} sheets → {}", imported.sheets.len(), output.display());

    Ok(())
}

/// Execute the export command: YAML document → workbook.
pub fn export(input: PathBuf, output: Option<PathBuf>, verbose: bool) -> StrataResult<()> {
    println!("{}", "📤 Strata - Workbook Export".bold().green());
    println!("   Input: {}", input.display());

    let output = output.unwrap_or_else(|| input.with_extension("xlsx"));

    if verbose {
        println!("{}", "📖 Parsing document...".cyan());
    }

    let document = parser::parse_file(&input)?;

    if verbose {
        println!("{}", "📊 Writing workbook...".cyan());
    }

    let exporter = WorkbookExporter::new(document);
    exporter.export(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Output: {}", output.display());

    Ok(())
}

/// Execute the tree command: print the materialized render tree.
pub fn tree(file: PathBuf, depth: Option<usize>) -> StrataResult<()> {
    let content = std::fs::read_to_string(&file)?;
    let state = DocumentState::from_text(&content);

    if let Some(message) = state.error {
        println!("{} {}", "✗".red().bold(), message.red());
        return Err(StrataError::Parse(message));
    }

    // Error state excluded above, so the tree is always present
    let nodes = state.tree.unwrap_or_default();
    let max_depth = depth.unwrap_or(usize::MAX);
    for node in &nodes {
        print_node(node, 0, max_depth);
    }

    Ok(())
}

fn print_node(node: &RenderNode, depth: usize, max_depth: usize) {
    let indent = "  ".repeat(depth);

    if node.is_leaf {
        let fields = node
            .fields
            .as_ref()
            .map(|fields| {
                fields
                    .iter()
                    .map(|(k, v)| format!("{}: {}", scalar_text(k), render_field(v)))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .unwrap_or_default();

        match &node.label {
            Some(label) => println!(
                "{}{} {} {}",
                indent,
                node.key.bold(),
                label.bright_yellow(),
                fields.dimmed()
            ),
            None => println!("{}{} {}", indent, node.key.bold(), fields.dimmed()),
        }
        return;
    }

    match &node.children {
        Some(children) => {
            let badge = node
                .child_count
                .map(|count| format!("({} items)", count))
                .unwrap_or_default();
            println!("{}{} {}", indent, node.key.bold().bright_blue(), badge.dimmed());

            if depth + 1 < max_depth {
                for child in children {
                    print_node(child, depth + 1, max_depth);
                }
            }
        }
        None => println!("{}{}: {}", indent, node.key.bold(), scalar_text(&node.value)),
    }
}

fn render_field(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other),
    }
}

/// Execute the check command: parse validation for one or more documents.
pub fn check(files: Vec<PathBuf>) -> StrataResult<()> {
    let mut failures = 0;

    for file in &files {
        match check_one(file) {
            Ok(()) => println!("{} {}", "✓".green().bold(), file.display()),
            Err(message) => {
                println!("{} {}: {}", "✗".red().bold(), file.display(), message.red());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(StrataError::Parse(format!(
            "{} of {} files failed validation",
            failures,
            files.len()
        )));
    }

    println!("{}", "✅ All files valid".bold().green());
    Ok(())
}

fn check_one(file: &Path) -> Result<(), String> {
    let content = std::fs::read_to_string(file).map_err(|e| e.to_string())?;
    let state = DocumentState::from_text(&content);
    match state.error {
        Some(message) => Err(message),
        None => Ok(()),
    }
}
