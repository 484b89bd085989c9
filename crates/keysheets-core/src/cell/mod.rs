//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1" or row 1, column 1)
//! - [`CellRange`] - A rectangle of cells (e.g., "A1:B10")
//! - [`CellRef`] - Either form of address as accepted by the session API
//! - [`CellValue`] and [`CellType`] - What a cell holds and how it classifies

mod address;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator, CellRef};
pub use value::{CellType, CellValue};
