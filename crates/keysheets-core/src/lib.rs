//! # keysheets-core
//!
//! Core types for the keysheets spreadsheet session library.
//!
//! This crate provides the vocabulary shared by every keysheets crate:
//! - [`CellAddress`], [`CellRange`] and [`CellRef`] - 1-based cell addressing
//! - [`CellValue`] and [`CellType`] - cell contents and their classification
//! - [`ArithmeticOp`] - the operator set accepted when modifying a cell
//! - [`Application`] and [`WorkbookHandle`] - the capability a spreadsheet
//!   engine has to provide
//!
//! ## Example
//!
//! ```rust
//! use keysheets_core::{CellAddress, CellValue, CellType};
//!
//! let addr = CellAddress::parse("B3").unwrap();
//! assert_eq!((addr.row, addr.col), (3, 2));
//! assert_eq!(CellAddress::new(3, 2).to_string(), "B3");
//!
//! let value = CellValue::infer("42");
//! assert_eq!(value, CellValue::Number(42.0));
//! assert_eq!(value.cell_type(), CellType::Number);
//! ```

pub mod application;
pub mod cell;
pub mod date;
pub mod error;
pub mod natural;
pub mod navigation;
pub mod op;

pub use application::{Application, WorkbookHandle};
pub use cell::{CellAddress, CellRange, CellRef, CellType, CellValue};
pub use error::{Error, Result};
pub use natural::{natural_cmp, sort_by_address};
pub use navigation::{end_of_run, Direction};
pub use op::ArithmeticOp;

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Row the upward boundary scan starts from
pub const SCAN_BOTTOM_ROW: u32 = 1_048_575;

/// Column the leftward boundary scan starts from (XFD)
pub const SCAN_RIGHT_COLUMN: u32 = MAX_COLS;

/// Default number of rows scanned by a column count
pub const DEFAULT_SCAN_MAX_ROWS: u32 = 150;

/// Default number of columns scanned by a row count
pub const DEFAULT_SCAN_MAX_COLUMNS: u32 = 100;

/// Default input format for date writes
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Check a sheet name against the spreadsheet naming rules.
///
/// Duplicate detection is left to the workbook, which knows its sheets.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name too long (max {} characters)",
            MAX_SHEET_NAME_LEN
        )));
    }

    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    for c in INVALID_CHARS {
        if name.contains(*c) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }
    }

    Ok(())
}
