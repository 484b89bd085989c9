//! # keysheets-umya
//!
//! In-process spreadsheet automation backed by
//! [`umya-spreadsheet`](https://crates.io/crates/umya-spreadsheet).
//!
//! [`UmyaApplication`] plays the part of the automation host: it has no
//! window and no external process, but it follows the same lifecycle (start,
//! open or create workbooks, quit) that a session expects from any
//! [`Application`](keysheets_core::Application).
//!
//! ## Example
//!
//! ```rust
//! use keysheets_core::{Application, CellAddress, CellValue, WorkbookHandle};
//! use keysheets_umya::UmyaApplication;
//!
//! let mut app = UmyaApplication::start();
//! let mut book = app.create_workbook().unwrap();
//!
//! let a1 = CellAddress::new(1, 1);
//! book.set_value("Sheet1", a1, &CellValue::Number(42.0)).unwrap();
//! assert_eq!(book.get_value("Sheet1", a1).unwrap(), CellValue::Number(42.0));
//!
//! book.close().unwrap();
//! app.quit().unwrap();
//! ```

mod application;
mod workbook;

pub use application::UmyaApplication;
pub use workbook::UmyaWorkbook;
