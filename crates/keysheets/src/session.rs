//! Spreadsheet sessions
//!
//! A [`Session`] owns one automation application and at most one open
//! workbook. Every keyword-style operation goes through it:
//!
//! ```rust
//! use keysheets::{CellValue, Session};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut session = Session::start();
//!
//! session.create_workbook("Data").unwrap();
//! session.write_value("Data", 1, 1, "Hello").unwrap();
//! session.write_value("Data", 2, 1, "42").unwrap();
//! session.save(dir.path().join("out.xlsx"), false).unwrap();
//!
//! assert_eq!(session.read_cell("Data", "B1").unwrap(), CellValue::Number(42.0));
//! session.quit().unwrap();
//! ```
//!
//! Keyword methods take `column` before `row`, matching the keyword
//! vocabulary. [`Session::read_cell`] accepts either an A1 label or a
//! `(row, column)` pair.

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDateTime};
use keysheets_core::date::{checked_serial, parse_date};
use keysheets_core::{
    sort_by_address, Application, ArithmeticOp, CellAddress, CellRange, CellRef, CellType,
    CellValue, Direction, Error, Result, WorkbookHandle, SCAN_BOTTOM_ROW, SCAN_RIGHT_COLUMN,
};
use keysheets_umya::UmyaApplication;

use crate::config::SessionConfig;

/// `(A1 label, value)` pairs in natural label order
pub type LabeledValues = Vec<(String, CellValue)>;

/// A spreadsheet automation session.
///
/// The application is released exactly once: either explicitly through
/// [`Session::quit`], or when the session is dropped (including during a
/// panic unwind). An attached workbook is closed without saving first.
pub struct Session<A: Application = UmyaApplication> {
    app: Option<A>,
    workbook: Option<A::Workbook>,
    sheet_names: Vec<String>,
    file_name: Option<String>,
    config: SessionConfig,
}

impl Session<UmyaApplication> {
    /// Start a session on the in-process umya application with default options.
    pub fn start() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Start a session on the in-process umya application.
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_application(UmyaApplication::start(), config)
    }
}

impl<A: Application> Session<A> {
    /// Start a session on an already running application.
    pub fn with_application(app: A, config: SessionConfig) -> Self {
        Self {
            app: Some(app),
            workbook: None,
            sheet_names: Vec::new(),
            file_name: None,
            config,
        }
    }

    /// Session options
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the application has not been released yet
    pub fn is_running(&self) -> bool {
        self.app.as_ref().map(|app| app.is_running()).unwrap_or(false)
    }

    /// Whether a workbook is attached
    pub fn has_workbook(&self) -> bool {
        self.workbook.is_some()
    }

    fn app_mut(&mut self) -> Result<&mut A> {
        self.app.as_mut().ok_or(Error::ApplicationClosed)
    }

    fn workbook(&self) -> Result<&A::Workbook> {
        self.workbook.as_ref().ok_or(Error::NoWorkbookOpen)
    }

    fn workbook_mut(&mut self) -> Result<&mut A::Workbook> {
        self.workbook.as_mut().ok_or(Error::NoWorkbookOpen)
    }

    /// The open workbook, once `sheet` is known to be one of its sheets
    fn sheet(&self, sheet: &str) -> Result<&A::Workbook> {
        let workbook = self.workbook()?;
        if !self.sheet_names.iter().any(|name| name == sheet) {
            return Err(Error::SheetNotFound(sheet.to_string()));
        }
        Ok(workbook)
    }

    fn resolve_path(&self, path: &Path, use_temp_dir: bool) -> PathBuf {
        if use_temp_dir {
            self.config.temp_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Attach `workbook`, closing whatever was attached before
    fn attach(&mut self, workbook: A::Workbook, file_name: Option<String>) {
        if let Some(previous) = self.workbook.take() {
            tracing::warn!(
                "Closing {} without saving to keep one workbook open",
                self.file_name.as_deref().unwrap_or("unsaved workbook")
            );
            if let Err(e) = previous.close() {
                tracing::warn!("Failed to close previous workbook: {}", e);
            }
        }
        self.sheet_names = workbook.sheet_names();
        self.file_name = file_name;
        self.workbook = Some(workbook);
    }

    // ---- workbooks ----

    /// Open a workbook file.
    ///
    /// With `use_temp_dir`, `path` is resolved against the configured temp
    /// directory. An already attached workbook is closed without saving.
    pub fn open(&mut self, path: impl AsRef<Path>, use_temp_dir: bool) -> Result<()> {
        let path = self.resolve_path(path.as_ref(), use_temp_dir);
        let workbook = self.app_mut()?.open_workbook(&path)?;
        self.attach(workbook, file_name_of(&path));
        Ok(())
    }

    /// Open a workbook file relative to the current working directory
    pub fn open_in_current_dir(&mut self, file: impl AsRef<Path>) -> Result<()> {
        let cwd = std::env::current_dir().map_err(Error::backend)?;
        self.open(cwd.join(file), false)
    }

    /// Save the open workbook.
    ///
    /// With `use_temp_dir`, `path` is resolved against the configured temp
    /// directory.
    pub fn save(&mut self, path: impl AsRef<Path>, use_temp_dir: bool) -> Result<()> {
        let path = self.resolve_path(path.as_ref(), use_temp_dir);
        self.workbook_mut()?.save(&path)?;
        self.file_name = file_name_of(&path);
        Ok(())
    }

    /// Save the open workbook relative to the current working directory
    pub fn save_in_current_dir(&mut self, file: impl AsRef<Path>) -> Result<()> {
        let cwd = std::env::current_dir().map_err(Error::backend)?;
        self.save(cwd.join(file), false)
    }

    /// Close the open workbook without saving
    pub fn close(&mut self) -> Result<()> {
        let workbook = self.workbook.take().ok_or(Error::NoWorkbookOpen)?;
        self.sheet_names.clear();
        self.file_name = None;
        workbook.close()
    }

    /// Create a blank workbook and append a sheet named `initial_sheet`
    /// after the default first sheet.
    pub fn create_workbook(&mut self, initial_sheet: &str) -> Result<()> {
        let mut workbook = self.app_mut()?.create_workbook()?;
        workbook.add_sheet(initial_sheet)?;
        self.attach(workbook, None);
        Ok(())
    }

    /// Append a sheet to the open workbook
    pub fn add_sheet(&mut self, name: &str) -> Result<()> {
        let workbook = self.workbook_mut()?;
        workbook.add_sheet(name)?;
        let names = workbook.sheet_names();
        self.sheet_names = names;
        Ok(())
    }

    // ---- metadata ----

    /// Sheet names of the open workbook, in file order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Number of sheets in the open workbook
    pub fn sheet_count(&self) -> usize {
        self.sheet_names.len()
    }

    /// File name of the open workbook, if it has been loaded or saved
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    // ---- range discovery ----

    /// Rightmost used column, probing the first rows of the sheet.
    ///
    /// Uses the configured `scan_max_rows`. See [`Session::column_count_within`].
    pub fn column_count(&self, sheet: &str) -> Result<u32> {
        self.column_count_within(sheet, self.config.scan_max_rows)
    }

    /// Rightmost used column over rows `1..scan_max_rows`.
    ///
    /// Each row is checked with a leftward end jump from the last column, so
    /// data below the scanned rows is not seen. An empty sheet yields 1 (the
    /// jump lands on column A); an empty scan range yields 0.
    pub fn column_count_within(&self, sheet: &str, scan_max_rows: u32) -> Result<u32> {
        let workbook = self.sheet(sheet)?;
        let mut most_right = 0;
        for row in 1..scan_max_rows {
            let from = CellAddress::checked(row, SCAN_RIGHT_COLUMN)?;
            let last = workbook.end(sheet, from, Direction::Left)?;
            most_right = most_right.max(last.col);
        }
        tracing::debug!(
            "Column count of {} over {} rows: {}",
            sheet,
            scan_max_rows,
            most_right
        );
        Ok(most_right)
    }

    /// Bottom used row, probing the first columns of the sheet.
    ///
    /// Uses the configured `scan_max_columns`. See [`Session::row_count_within`].
    pub fn row_count(&self, sheet: &str) -> Result<u32> {
        self.row_count_within(sheet, self.config.scan_max_columns)
    }

    /// Bottom used row over columns `1..scan_max_columns`, probing upward
    /// from the bottom of the sheet.
    pub fn row_count_within(&self, sheet: &str, scan_max_columns: u32) -> Result<u32> {
        let workbook = self.sheet(sheet)?;
        let mut most_down = 0;
        for col in 1..scan_max_columns {
            let from = CellAddress::checked(SCAN_BOTTOM_ROW, col)?;
            let last = workbook.end(sheet, from, Direction::Up)?;
            most_down = most_down.max(last.row);
        }
        tracing::debug!(
            "Row count of {} over {} columns: {}",
            sheet,
            scan_max_columns,
            most_down
        );
        Ok(most_down)
    }

    // ---- reads ----

    /// Read one cell by A1 label (`"B3"`) or `(row, column)` pair
    pub fn read_cell(&self, sheet: &str, at: impl Into<CellRef>) -> Result<CellValue> {
        let addr = at.into().resolve()?;
        self.sheet(sheet)?.get_value(sheet, addr)
    }

    /// Read one cell by column and row
    pub fn read_cell_at(&self, sheet: &str, column: u32, row: u32) -> Result<CellValue> {
        self.read_cell(sheet, (row, column))
    }

    /// Classify the contents of one cell
    pub fn cell_type(&self, sheet: &str, column: u32, row: u32) -> Result<CellType> {
        Ok(self.read_cell_at(sheet, column, row)?.cell_type())
    }

    /// Values of `column` from row 1 down to the last used row.
    ///
    /// With `include_empty == false`, falsy values are dropped: empty and
    /// blank cells, but also `0`, `""` and `FALSE`.
    pub fn column_values(&self, sheet: &str, column: u32, include_empty: bool) -> Result<LabeledValues> {
        let workbook = self.sheet(sheet)?;
        let from = CellAddress::checked(SCAN_BOTTOM_ROW, column)?;
        let last = workbook.end(sheet, from, Direction::Up)?;
        self.collect(sheet, CellRange::from_indices(1, column, last.row, column), include_empty)
    }

    /// Values of `row` from column A to the last used column.
    ///
    /// Filtering follows [`Session::column_values`].
    pub fn row_values(&self, sheet: &str, row: u32, include_empty: bool) -> Result<LabeledValues> {
        let workbook = self.sheet(sheet)?;
        let from = CellAddress::checked(row, SCAN_RIGHT_COLUMN)?;
        let last = workbook.end(sheet, from, Direction::Left)?;
        self.collect(sheet, CellRange::from_indices(row, 1, row, last.col), include_empty)
    }

    /// Values of the rectangle from A1 to (row count, column count).
    ///
    /// Filtering follows [`Session::column_values`].
    pub fn sheet_values(&self, sheet: &str, include_empty: bool) -> Result<LabeledValues> {
        let rows = self.row_count(sheet)?;
        let cols = self.column_count(sheet)?;
        if rows == 0 || cols == 0 {
            return Ok(Vec::new());
        }
        self.collect(sheet, CellRange::from_indices(1, 1, rows, cols), include_empty)
    }

    /// [`Session::sheet_values`] for every sheet, in file order
    pub fn workbook_values(&self, include_empty: bool) -> Result<Vec<(String, LabeledValues)>> {
        self.workbook()?;
        self.sheet_names
            .iter()
            .map(|name| Ok((name.clone(), self.sheet_values(name, include_empty)?)))
            .collect()
    }

    fn collect(&self, sheet: &str, range: CellRange, include_empty: bool) -> Result<LabeledValues> {
        let workbook = self.sheet(sheet)?;
        let mut values = Vec::with_capacity(range.cells().len());
        for addr in range.cells() {
            let value = workbook.get_value(sheet, addr)?;
            if include_empty || !value.is_falsy() {
                values.push((addr.to_a1_string(), value));
            }
        }
        sort_by_address(&mut values);
        Ok(values)
    }

    // ---- writes ----

    fn write(&mut self, sheet: &str, column: u32, row: u32, value: &CellValue) -> Result<()> {
        let addr = CellAddress::checked(row, column)?;
        self.sheet(sheet)?;
        self.workbook_mut()?.set_value(sheet, addr, value)
    }

    /// Write text, storing it as a number when it looks like one.
    ///
    /// Digits become an integer, digits with a single `.` a float, and an
    /// empty string clears the cell. Anything else, including signed numbers,
    /// is stored as text.
    pub fn write_value(&mut self, sheet: &str, column: u32, row: u32, value: &str) -> Result<()> {
        self.write(sheet, column, row, &CellValue::infer(value))
    }

    /// Same as [`Session::write_value`]
    pub fn write_number(&mut self, sheet: &str, column: u32, row: u32, value: &str) -> Result<()> {
        self.write_value(sheet, column, row, value)
    }

    /// Write text as text, even when it looks like a number
    pub fn write_string(&mut self, sheet: &str, column: u32, row: u32, value: &str) -> Result<()> {
        self.write(sheet, column, row, &CellValue::text(value))
    }

    /// Write a date given in the configured date format
    pub fn write_date(&mut self, sheet: &str, column: u32, row: u32, value: &str) -> Result<()> {
        let format = self.config.date_format.clone();
        self.write_date_with_format(sheet, column, row, value, &format)
    }

    /// Write a date given in `input_format` (chrono syntax).
    ///
    /// A value whose separator differs from the format's (`12.3.1999`
    /// against `%d-%m-%Y`) is accepted.
    pub fn write_date_with_format(
        &mut self,
        sheet: &str,
        column: u32,
        row: u32,
        value: &str,
        input_format: &str,
    ) -> Result<()> {
        let date = parse_date(value, input_format)?;
        self.write(sheet, column, row, &CellValue::Date(date))
    }

    /// Replace a numeric cell with `current <operator> operand`.
    ///
    /// `operator` is one of `+ - * / //` and `operand` an unsigned decimal.
    /// Empty cells count as 0 and booleans as 1 or 0.
    pub fn modify_cell_with(
        &mut self,
        sheet: &str,
        column: u32,
        row: u32,
        operator: &str,
        operand: &str,
    ) -> Result<()> {
        let op: ArithmeticOp = operator.parse()?;
        let rhs = match CellValue::infer(operand) {
            CellValue::Number(n) => n,
            _ => return Err(Error::InvalidOperand(operand.to_string())),
        };

        let addr = CellAddress::checked(row, column)?;
        let current = self.sheet(sheet)?.get_value(sheet, addr)?;
        let lhs = match current.as_number() {
            Some(n) => n,
            None if matches!(current, CellValue::Empty | CellValue::Blank) => 0.0,
            None => {
                return Err(Error::NotNumeric {
                    address: addr.to_a1_string(),
                    actual: current.type_name(),
                })
            }
        };

        let result = op.apply(lhs, rhs)?;
        self.write(sheet, column, row, &CellValue::Number(result))
    }

    /// Move a date cell forward by `days`; other cells are left unchanged
    pub fn add_to_date(&mut self, sheet: &str, column: u32, row: u32, days: i64) -> Result<()> {
        let current = self.read_cell_at(sheet, column, row)?;
        let Some(date) = current.as_date() else {
            tracing::debug!(
                "{}!{} holds a {} value, not shifting",
                sheet,
                CellAddress::new(row, column),
                current.type_name()
            );
            return Ok(());
        };
        let shifted = shift_days(date, days)
            .ok_or_else(|| Error::DateOutOfRange(format!("{} {:+} days", date, days)))?;
        checked_serial(shifted)?;
        self.write(sheet, column, row, &CellValue::Date(shifted))
    }

    /// Move a date cell back by `days`; other cells are left unchanged
    pub fn subtract_from_date(&mut self, sheet: &str, column: u32, row: u32, days: i64) -> Result<()> {
        self.add_to_date(sheet, column, row, days.saturating_neg())
    }

    // ---- teardown ----

    /// Close any open workbook without saving and quit the application
    pub fn quit(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        let closed = match self.workbook.take() {
            Some(workbook) => {
                self.sheet_names.clear();
                self.file_name = None;
                workbook.close()
            }
            None => Ok(()),
        };
        let quit = match self.app.take() {
            Some(mut app) if app.is_running() => app.quit(),
            _ => Ok(()),
        };
        closed.and(quit)
    }
}

impl<A: Application> Drop for Session<A> {
    fn drop(&mut self) {
        if self.app.is_none() && self.workbook.is_none() {
            return;
        }
        if let Err(e) = self.release() {
            tracing::warn!("Failed to release spreadsheet application: {}", e);
        }
    }
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

fn shift_days(date: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}
