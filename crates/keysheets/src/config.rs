//! Session configuration

use std::path::PathBuf;

use keysheets_core::{DEFAULT_DATE_FORMAT, DEFAULT_SCAN_MAX_COLUMNS, DEFAULT_SCAN_MAX_ROWS};

/// Options for a spreadsheet session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory used when a path is resolved against the temp dir
    /// (default: the platform temp directory)
    pub temp_dir: PathBuf,
    /// Rows scanned by a column count (default: 150)
    pub scan_max_rows: u32,
    /// Columns scanned by a row count (default: 100)
    pub scan_max_columns: u32,
    /// chrono format used by date writes (default: `%d-%m-%Y`)
    pub date_format: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            scan_max_rows: DEFAULT_SCAN_MAX_ROWS,
            scan_max_columns: DEFAULT_SCAN_MAX_COLUMNS,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}
