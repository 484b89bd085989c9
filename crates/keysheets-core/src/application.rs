//! The capability a spreadsheet engine has to provide
//!
//! A session drives an [`Application`] (the automation host, launched once and
//! quit once) and at most one [`WorkbookHandle`] obtained from it. Engines
//! implement both traits; the session never touches engine types directly.

use std::path::Path;

use crate::cell::{CellAddress, CellValue};
use crate::error::Result;
use crate::navigation::Direction;

/// A running spreadsheet automation application
pub trait Application {
    /// The workbook type this application opens
    type Workbook: WorkbookHandle;

    /// Load an existing workbook file
    fn open_workbook(&mut self, path: &Path) -> Result<Self::Workbook>;

    /// Create a blank workbook with the engine's default first sheet
    fn create_workbook(&mut self) -> Result<Self::Workbook>;

    /// Shut the application down. Later calls fail with
    /// [`Error::ApplicationClosed`](crate::Error::ApplicationClosed).
    fn quit(&mut self) -> Result<()>;

    /// Whether the application is still running
    fn is_running(&self) -> bool;
}

/// A workbook attached to an [`Application`]
pub trait WorkbookHandle {
    /// Sheet names in file order
    fn sheet_names(&self) -> Vec<String>;

    /// Append a new sheet after the existing ones
    fn add_sheet(&mut self, name: &str) -> Result<()>;

    /// Read a cell; cells that were never written read as [`CellValue::Empty`]
    fn get_value(&self, sheet: &str, at: CellAddress) -> Result<CellValue>;

    /// Write a cell; [`CellValue::Empty`] clears it
    fn set_value(&mut self, sheet: &str, at: CellAddress, value: &CellValue) -> Result<()>;

    /// Ctrl+Arrow jump from `from` in `direction`
    fn end(&self, sheet: &str, from: CellAddress, direction: Direction) -> Result<CellAddress>;

    /// Write the workbook to `path`
    fn save(&mut self, path: &Path) -> Result<()>;

    /// Release the workbook without saving
    fn close(self) -> Result<()>;
}
