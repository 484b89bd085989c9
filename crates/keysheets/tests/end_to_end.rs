//! End-to-end tests (create -> write -> save -> reopen -> verify)

use chrono::NaiveDate;
use keysheets::prelude::*;
use pretty_assertions::assert_eq;

/// Test the full keyword flow across a save and reopen
#[test]
fn test_create_save_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("e2e.xlsx");

    let mut session = Session::start();
    session.create_workbook("Data").unwrap();
    session.write_value("Data", 1, 1, "Hello").unwrap();
    session.write_value("Data", 2, 1, "42").unwrap();
    session.save(&path, false).unwrap();
    session.close().unwrap();

    session.open(&path, false).unwrap();
    assert_eq!(
        session.read_cell("Data", "A1").unwrap(),
        CellValue::text("Hello")
    );
    assert_eq!(
        session.read_cell("Data", (1, 2)).unwrap(),
        CellValue::Number(42.0)
    );
    assert_eq!(session.cell_type("Data", 2, 1).unwrap(), CellType::Number);
    session.quit().unwrap();
}

/// Test that every value kind survives the file format
#[test]
fn test_value_kinds_survive_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kinds.xlsx");

    let mut session = Session::start();
    session.create_workbook("Kinds").unwrap();
    session.write_value("Kinds", 1, 1, "7").unwrap();
    session.write_value("Kinds", 1, 2, "2.5").unwrap();
    session.write_string("Kinds", 1, 3, "0042").unwrap();
    session.write_value("Kinds", 1, 4, "plain text").unwrap();
    session.write_date("Kinds", 1, 5, "24-12-2023").unwrap();
    session.save(&path, false).unwrap();

    let mut reopened = Session::start();
    reopened.open(&path, false).unwrap();

    let values = reopened.column_values("Kinds", 1, true).unwrap();
    let expected_date = NaiveDate::from_ymd_opt(2023, 12, 24).unwrap();
    assert_eq!(
        values,
        vec![
            ("A1".to_string(), CellValue::Number(7.0)),
            ("A2".to_string(), CellValue::Number(2.5)),
            ("A3".to_string(), CellValue::text("0042")),
            ("A4".to_string(), CellValue::text("plain text")),
            ("A5".to_string(), CellValue::from(expected_date)),
        ]
    );

    let types: Vec<CellType> = (1..=6)
        .map(|row| reopened.cell_type("Kinds", 1, row).unwrap())
        .collect();
    assert_eq!(
        types,
        vec![
            CellType::Number,
            CellType::Number,
            CellType::String,
            CellType::String,
            CellType::Date,
            CellType::Empty,
        ]
    );
}

/// Test that modifications after reopening persist on the next save
#[test]
fn test_modify_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        temp_dir: dir.path().to_path_buf(),
        ..SessionConfig::default()
    };

    let mut session = Session::with_config(config);
    session.create_workbook("Ledger").unwrap();
    session.write_value("Ledger", 2, 2, "100").unwrap();
    session.write_date("Ledger", 3, 2, "01-01-2024").unwrap();
    session.save("ledger.xlsx", true).unwrap();
    session.close().unwrap();

    session.open("ledger.xlsx", true).unwrap();
    session.modify_cell_with("Ledger", 2, 2, "//", "3").unwrap();
    session.add_to_date("Ledger", 3, 2, 31).unwrap();
    session.save("ledger.xlsx", true).unwrap();
    session.close().unwrap();

    session.open("ledger.xlsx", true).unwrap();
    assert_eq!(
        session.read_cell("Ledger", "B2").unwrap(),
        CellValue::Number(33.0)
    );
    assert_eq!(
        session.read_cell("Ledger", "C2").unwrap(),
        CellValue::from(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
    );
}

/// Test that scans see the same used range after reopening
#[test]
fn test_scan_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.xlsx");

    let mut session = Session::start();
    session.create_workbook("Grid").unwrap();
    for row in 1..=5 {
        for col in 1..=3 {
            session
                .write_value("Grid", col, row, &format!("{}", row * col))
                .unwrap();
        }
    }
    session.save(&path, false).unwrap();
    session.close().unwrap();

    session.open(&path, false).unwrap();
    assert_eq!(session.row_count("Grid").unwrap(), 5);
    assert_eq!(session.column_count("Grid").unwrap(), 3);
    assert_eq!(session.sheet_values("Grid", false).unwrap().len(), 15);
}
