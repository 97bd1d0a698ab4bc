//! Workbook import/export integration tests.
//!
//! Workbooks are built with rust_xlsxwriter into a temp directory, imported
//! through the library, and (for exports) read back with calamine.

use calamine::{open_workbook, Data, Reader, Xlsx};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use serde_yaml::Value;
use std::path::Path;
use strata::excel::{WorkbookExporter, WorkbookImporter};
use tempfile::TempDir;

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

fn write_sheet(workbook: &mut Workbook, name: &str, rows: &[&[&str]]) {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name).unwrap();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                worksheet
                    .write_string(row_idx as u32, col_idx as u16, *cell)
                    .unwrap();
            }
        }
    }
}

fn build_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        write_sheet(&mut workbook, name, rows);
    }
    workbook.save(path).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_hierarchical_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("features.xlsx");
    let rows: &[&[&str]] = &[
        &["類別", "一級", "二級", "說明"],
        &["安全", "登入", "密碼重設", "找回密碼流程"],
    ];
    build_workbook(&path, &[("功能", rows)]);

    let imported = WorkbookImporter::new(&path).import().unwrap();
    assert_eq!(imported.source, "features.xlsx");
    assert_eq!(imported.sheets, vec!["功能".to_string()]);

    let expected = yaml(
        r#"{"功能": {"安全": {"登入": {"密碼重設": {"說明": "找回密碼流程"}}}}}"#,
    );
    assert_eq!(imported.document, expected);
}

#[test]
fn test_import_blank_levels_inherit_and_truncate() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tree.xlsx");
    let rows: &[&[&str]] = &[
        &["Level 1", "Level 2", "Level 3"],
        &["A", "B", "C"],
        &["", "D", ""],
        &["E", "", ""],
    ];
    build_workbook(&path, &[("Sheet1", rows)]);

    let imported = WorkbookImporter::new(&path).import().unwrap();
    let expected = yaml(r#"{Sheet1: {A: {B: {C: {}}, D: {}}, E: {}}}"#);
    assert_eq!(imported.document, expected);
}

#[test]
fn test_import_flat_sheet_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("flat.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("People").unwrap();
    worksheet.write_string(0, 0, "name").unwrap();
    worksheet.write_string(0, 1, "count").unwrap();
    worksheet.write_string(1, 0, "alice").unwrap();
    worksheet.write_number(1, 1, 3.0).unwrap();
    worksheet.write_string(2, 0, "bob").unwrap();
    workbook.save(&path).unwrap();

    let imported = WorkbookImporter::new(&path).import().unwrap();
    let expected = yaml(r#"{People: [{name: alice, count: 3}, {name: bob}]}"#);
    assert_eq!(imported.document, expected);
}

#[test]
fn test_import_preserves_sheet_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("multi.xlsx");
    let zeta: &[&[&str]] = &[&["一級"], &["z"]];
    let alpha: &[&[&str]] = &[&["一級"], &["a"]];
    build_workbook(&path, &[("zeta", zeta), ("alpha", alpha)]);

    let imported = WorkbookImporter::new(&path).import().unwrap();
    assert_eq!(imported.sheets, vec!["zeta".to_string(), "alpha".to_string()]);

    let Value::Mapping(root) = &imported.document else {
        panic!("expected mapping root");
    };
    let keys: Vec<String> = root
        .keys()
        .map(|k| k.as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

#[test]
fn test_import_corrupt_workbook_fails_whole_import() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let result = WorkbookImporter::new(&path).import();
    assert!(result.is_err());
}

#[test]
fn test_import_delimited_text() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rows.csv");
    std::fs::write(&path, "name,score\nalice,10\nbob,7.5\n").unwrap();

    let imported = WorkbookImporter::new(&path).import().unwrap();
    assert_eq!(imported.sheets, vec!["rows".to_string()]);
    let expected = yaml(r#"{rows: [{name: alice, score: 10}, {name: bob, score: 7.5}]}"#);
    assert_eq!(imported.document, expected);
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT
// ═══════════════════════════════════════════════════════════════════════════

fn read_cell(path: &Path, sheet: &str, row: u32, col: u32) -> Data {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
}

#[test]
fn test_export_flattens_nested_mappings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested.xlsx");

    // Flat root mapping with a container value splits per top-level key
    let doc = yaml("{report: {a: {b: 1, c: 2}, d: [1, 2, 3]}}");
    WorkbookExporter::new(doc).export(&path).unwrap();

    assert_eq!(read_cell(&path, "report", 0, 0), Data::String("a.b".into()));
    assert_eq!(read_cell(&path, "report", 0, 1), Data::String("a.c".into()));
    assert_eq!(read_cell(&path, "report", 0, 2), Data::String("d".into()));
    assert_eq!(read_cell(&path, "report", 1, 0), Data::Float(1.0));
    assert_eq!(read_cell(&path, "report", 1, 1), Data::Float(2.0));
    assert_eq!(
        read_cell(&path, "report", 1, 2),
        Data::String("1, 2, 3".into())
    );
}

#[test]
fn test_export_sequence_of_mappings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("seq.xlsx");

    let doc = yaml("{users: [{name: a, active: true}, {name: b}]}");
    WorkbookExporter::new(doc).export(&path).unwrap();

    assert_eq!(read_cell(&path, "users", 0, 0), Data::String("name".into()));
    assert_eq!(read_cell(&path, "users", 1, 0), Data::String("a".into()));
    assert_eq!(read_cell(&path, "users", 1, 1), Data::Bool(true));
    assert_eq!(read_cell(&path, "users", 2, 0), Data::String("b".into()));
    assert_eq!(read_cell(&path, "users", 2, 1), Data::Empty);
}

#[test]
fn test_export_scalar_root_single_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scalar.xlsx");

    WorkbookExporter::new(yaml("42")).export(&path).unwrap();

    assert_eq!(
        read_cell(&path, "Sheet1", 0, 0),
        Data::String("value".into())
    );
    assert_eq!(read_cell(&path, "Sheet1", 1, 0), Data::Float(42.0));
}

#[test]
fn test_export_sheet_name_sanitized_and_truncated() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("names.xlsx");

    let long_key = "k".repeat(40);
    let doc = yaml(&format!("{{\"bad/name\": [{{a: 1}}], \"{long_key}\": [{{b: 2}}]}}"));
    WorkbookExporter::new(doc).export(&path).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let names = workbook.sheet_names().to_vec();
    assert!(names.contains(&"bad_name".to_string()));
    assert!(names.contains(&"k".repeat(31)));
}

// ═══════════════════════════════════════════════════════════════════════════
// ROUND TRIP
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_flat_document_survives_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("round.xlsx");

    let doc = yaml("{items: [{name: a, size: 2}, {name: b, size: 5}]}");
    WorkbookExporter::new(doc.clone()).export(&path).unwrap();

    let imported = WorkbookImporter::new(&path).import().unwrap();
    assert_eq!(imported.document, doc);
}
