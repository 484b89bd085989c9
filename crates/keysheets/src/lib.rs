//! # keysheets
//!
//! Keyword-style spreadsheet sessions for test automation.
//!
//! Keysheets drives a spreadsheet engine the way a test script would drive
//! a spreadsheet application: start it, open or create a workbook, read and
//! write cells, scan for the used range, save, and quit.
//!
//! ## Features
//!
//! - Open, create, save and close xlsx workbooks
//! - Read cells by label (`"A2"`) or coordinates, with type classification
//! - Write values with number inference, forced text, and dates
//! - Arithmetic and date arithmetic on cells in place
//! - Column, row and sheet dumps in natural label order
//! - Bounded used-range scans with Ctrl+Arrow semantics
//!
//! ## Example
//!
//! ```rust
//! use keysheets::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("report.xlsx");
//!
//! let mut session = Session::start();
//! session.create_workbook("Data").unwrap();
//! session.write_value("Data", 1, 1, "Hello").unwrap();
//! session.write_string("Data", 1, 2, "42").unwrap();
//! session.save(&path, false).unwrap();
//! session.close().unwrap();
//!
//! session.open(&path, false).unwrap();
//! assert_eq!(session.sheet_names(), ["Sheet1", "Data"]);
//! assert_eq!(session.cell_type("Data", 1, 2).unwrap(), CellType::String);
//! ```

pub mod config;
pub mod prelude;
pub mod session;

pub use config::SessionConfig;
pub use session::{LabeledValues, Session};

// Re-export core types
pub use keysheets_core::{
    // Engine capability
    Application,
    ArithmeticOp,
    // Cell types
    CellAddress,
    CellRange,
    CellRef,
    CellType,
    CellValue,
    Direction,
    // Error types
    Error,
    Result,
    WorkbookHandle,

    // Constants
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

pub use keysheets_umya::{UmyaApplication, UmyaWorkbook};
