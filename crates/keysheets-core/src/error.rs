//! Error types for keysheets

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a spreadsheet session
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (valid: 1..={1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (valid: 1..={1})")]
    ColumnOutOfBounds(u32, u32),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// The operation needs an open workbook
    #[error("No workbook is open")]
    NoWorkbookOpen,

    /// The automation application has already quit
    #[error("The spreadsheet application is no longer running")]
    ApplicationClosed,

    /// Workbook file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Workbook file exists but could not be loaded
    #[error("Failed to open '{}': {message}", .path.display())]
    Open { path: PathBuf, message: String },

    /// Workbook could not be written
    #[error("Failed to save '{}': {message}", .path.display())]
    Save { path: PathBuf, message: String },

    /// Date text did not match the input format
    #[error("Cannot parse date '{value}' with format '{format}': {source}")]
    InvalidDate {
        value: String,
        format: String,
        source: chrono::ParseError,
    },

    /// Date has no serial in the 1900 date system
    #[error("Date {0} is outside the supported range (1900-01-01 onward)")]
    DateOutOfRange(String),

    /// Operator outside the supported arithmetic set
    #[error("Invalid operator '{0}' (expected one of + - * / //)")]
    InvalidOperator(String),

    /// Operand is not an unsigned decimal number
    #[error("Invalid operand '{0}' (expected an unsigned decimal number)")]
    InvalidOperand(String),

    /// Cell does not hold a value arithmetic can be applied to
    #[error("Cell {address} holds a {actual} value, expected a number")]
    NotNumeric {
        address: String,
        actual: &'static str,
    },

    /// Division or integer division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Error reported by the spreadsheet engine
    #[error("Spreadsheet engine error: {0}")]
    Backend(String),
}

impl Error {
    /// Create a new backend error from any displayable engine error
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Error::Backend(err.to_string())
    }
}
