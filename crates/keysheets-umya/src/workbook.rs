//! Workbook handle over an in-memory umya spreadsheet

use std::path::{Path, PathBuf};

use keysheets_core::date::{checked_serial, is_date_format_code, serial_to_date};
use keysheets_core::{
    end_of_run, validate_sheet_name, CellAddress, CellValue, Direction, Error, Result,
    WorkbookHandle, MAX_COLS, MAX_ROWS,
};
use umya_spreadsheet::{Cell, CellRawValue, NumberingFormat, Spreadsheet, Worksheet};

/// A workbook loaded into umya-spreadsheet.
///
/// All edits happen in memory; nothing touches disk until [`save`] is called.
///
/// [`save`]: WorkbookHandle::save
pub struct UmyaWorkbook {
    book: Spreadsheet,
    path: Option<PathBuf>,
}

impl UmyaWorkbook {
    pub(crate) fn new() -> Self {
        Self {
            book: umya_spreadsheet::new_file(),
            path: None,
        }
    }

    pub(crate) fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            book,
            path: Some(path.to_path_buf()),
        })
    }

    /// Where the workbook was last loaded from or saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn sheet(&self, name: &str) -> Result<&Worksheet> {
        self.book
            .get_sheet_by_name(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }
}

/// Convert a umya cell into a keysheets value
fn cell_value(cell: &Cell) -> CellValue {
    let cv = cell.get_cell_value();
    match cv.get_raw_value() {
        CellRawValue::Empty => CellValue::Empty,
        CellRawValue::Numeric(n) => {
            if has_date_format(cell) {
                if let Some(dt) = serial_to_date(*n) {
                    return CellValue::Date(dt);
                }
            }
            CellValue::Number(*n)
        }
        CellRawValue::Bool(b) => CellValue::Boolean(*b),
        CellRawValue::String(s) => text_value(s.to_string()),
        CellRawValue::RichText(rt) => text_value(rt.get_text().to_string()),
        CellRawValue::Lazy(s) => text_value(s.to_string()),
        CellRawValue::Error(_) => CellValue::Error(cv.get_value().to_string()),
    }
}

fn text_value(s: String) -> CellValue {
    if s.is_empty() {
        CellValue::Blank
    } else {
        CellValue::Text(s)
    }
}

fn has_date_format(cell: &Cell) -> bool {
    cell.get_style()
        .get_number_format()
        .map(|nf| is_date_format_code(nf.get_format_code()))
        .unwrap_or(false)
}

/// Drop a date format left behind by an earlier date write, so the new
/// value is not read back as a date
fn clear_date_format(ws: &mut Worksheet, coord: (u32, u32)) {
    if ws.get_cell(coord).is_some_and(has_date_format) {
        ws.get_style_mut(coord)
            .get_number_format_mut()
            .set_format_code(NumberingFormat::FORMAT_GENERAL);
    }
}

/// Whether a cell counts as occupied for end jumps, without converting it
fn is_occupied(cell: &Cell) -> bool {
    !matches!(cell.get_cell_value().get_raw_value(), CellRawValue::Empty)
}

impl WorkbookHandle for UmyaWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        (0..self.book.get_sheet_count())
            .filter_map(|i| self.book.get_sheet(&i))
            .map(|ws| ws.get_name().to_string())
            .collect()
    }

    fn add_sheet(&mut self, name: &str) -> Result<()> {
        validate_sheet_name(name)?;
        if self
            .sheet_names()
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(name))
        {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        self.book.new_sheet(name).map_err(Error::backend)?;
        tracing::info!("Added sheet: {}", name);
        Ok(())
    }

    fn get_value(&self, sheet: &str, at: CellAddress) -> Result<CellValue> {
        at.validate()?;
        let ws = self.sheet(sheet)?;
        Ok(ws
            .get_cell((at.col, at.row))
            .map(cell_value)
            .unwrap_or(CellValue::Empty))
    }

    fn set_value(&mut self, sheet: &str, at: CellAddress, value: &CellValue) -> Result<()> {
        at.validate()?;
        let ws = self.sheet_mut(sheet)?;
        // umya addresses cells as (col, row)
        let coord = (at.col, at.row);

        match value {
            CellValue::Empty | CellValue::Blank => {
                if ws.get_cell(coord).is_some() {
                    ws.get_cell_mut(coord).set_blank();
                }
            }
            CellValue::Number(n) => {
                clear_date_format(ws, coord);
                ws.get_cell_mut(coord).set_value_number(*n);
            }
            CellValue::Text(s) => {
                clear_date_format(ws, coord);
                ws.get_cell_mut(coord).set_value_string(s.clone());
            }
            CellValue::Boolean(b) => {
                clear_date_format(ws, coord);
                ws.get_cell_mut(coord).set_value_bool(*b);
            }
            CellValue::Error(e) => {
                ws.get_cell_mut(coord).set_value(e.clone());
            }
            CellValue::Date(dt) => {
                let serial = checked_serial(*dt)?;
                ws.get_cell_mut(coord).set_value_number(serial);
                ws.get_style_mut(coord)
                    .get_number_format_mut()
                    .set_format_code(NumberingFormat::FORMAT_DATE_XLSX14);
            }
        }
        Ok(())
    }

    fn end(&self, sheet: &str, from: CellAddress, direction: Direction) -> Result<CellAddress> {
        from.validate()?;
        let ws = self.sheet(sheet)?;
        let vertical = direction.is_vertical();

        let mut occupied: Vec<u32> = ws
            .get_cell_collection()
            .into_iter()
            .filter_map(|cell| {
                let coord = cell.get_coordinate();
                let (col, row) = (*coord.get_col_num(), *coord.get_row_num());
                let pos = if vertical {
                    (col == from.col).then_some(row)
                } else {
                    (row == from.row).then_some(col)
                };
                pos.filter(|_| is_occupied(cell))
            })
            .collect();
        occupied.sort_unstable();
        occupied.dedup();

        Ok(if vertical {
            CellAddress::new(end_of_run(&occupied, from.row, direction, MAX_ROWS), from.col)
        } else {
            CellAddress::new(from.row, end_of_run(&occupied, from.col, direction, MAX_COLS))
        })
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|e| Error::Save {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!("Saved workbook: {}", path.display());
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn close(self) -> Result<()> {
        match &self.path {
            Some(path) => tracing::info!("Closed workbook: {}", path.display()),
            None => tracing::info!("Closed unsaved workbook"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keysheets_core::date::parse_date;
    use pretty_assertions::assert_eq;

    fn date_value(text: &str) -> CellValue {
        CellValue::Date(parse_date(text, "%d-%m-%Y").unwrap())
    }

    fn addr(label: &str) -> CellAddress {
        CellAddress::parse(label).unwrap()
    }

    #[test]
    fn test_values_read_back() {
        let mut book = UmyaWorkbook::new();

        book.set_value("Sheet1", addr("A1"), &CellValue::Number(42.0)).unwrap();
        book.set_value("Sheet1", addr("A2"), &CellValue::text("Hello")).unwrap();
        book.set_value("Sheet1", addr("A3"), &CellValue::Boolean(true)).unwrap();
        book.set_value("Sheet1", addr("A4"), &date_value("12-03-1999")).unwrap();

        assert_eq!(book.get_value("Sheet1", addr("A1")).unwrap(), CellValue::Number(42.0));
        assert_eq!(book.get_value("Sheet1", addr("A2")).unwrap(), CellValue::text("Hello"));
        assert_eq!(book.get_value("Sheet1", addr("A3")).unwrap(), CellValue::Boolean(true));
        assert_eq!(book.get_value("Sheet1", addr("A4")).unwrap(), date_value("12-03-1999"));
        assert_eq!(book.get_value("Sheet1", addr("Z99")).unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_numeric_text_stays_text() {
        let mut book = UmyaWorkbook::new();
        book.set_value("Sheet1", addr("B2"), &CellValue::text("42")).unwrap();
        assert_eq!(book.get_value("Sheet1", addr("B2")).unwrap(), CellValue::text("42"));
    }

    #[test]
    fn test_clear_cell() {
        let mut book = UmyaWorkbook::new();
        book.set_value("Sheet1", addr("C3"), &CellValue::Number(1.0)).unwrap();
        book.set_value("Sheet1", addr("C3"), &CellValue::Empty).unwrap();
        assert_eq!(book.get_value("Sheet1", addr("C3")).unwrap(), CellValue::Empty);

        // Clearing a cell that was never written leaves it absent
        book.set_value("Sheet1", addr("D4"), &CellValue::Empty).unwrap();
        assert_eq!(book.get_value("Sheet1", addr("D4")).unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_unknown_sheet() {
        let mut book = UmyaWorkbook::new();
        assert!(matches!(
            book.get_value("Nope", addr("A1")),
            Err(Error::SheetNotFound(_))
        ));
        assert!(matches!(
            book.set_value("Nope", addr("A1"), &CellValue::Number(1.0)),
            Err(Error::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_add_sheet() {
        let mut book = UmyaWorkbook::new();
        book.add_sheet("Data").unwrap();
        assert_eq!(book.sheet_names(), vec!["Sheet1".to_string(), "Data".to_string()]);

        assert!(matches!(book.add_sheet("data"), Err(Error::DuplicateSheetName(_))));
        assert!(matches!(book.add_sheet("a/b"), Err(Error::InvalidSheetName(_))));
        assert!(matches!(book.add_sheet(""), Err(Error::InvalidSheetName(_))));
    }

    #[test]
    fn test_end_navigation() {
        let mut book = UmyaWorkbook::new();
        for row in 1..=5 {
            book.set_value("Sheet1", CellAddress::new(row, 1), &CellValue::Number(row as f64))
                .unwrap();
        }
        book.set_value("Sheet1", addr("D1"), &CellValue::text("x")).unwrap();

        let bottom = CellAddress::new(1_048_575, 1);
        assert_eq!(book.end("Sheet1", bottom, Direction::Up).unwrap(), addr("A5"));
        assert_eq!(book.end("Sheet1", addr("A1"), Direction::Down).unwrap(), addr("A5"));

        let right = CellAddress::new(1, MAX_COLS);
        assert_eq!(book.end("Sheet1", right, Direction::Left).unwrap(), addr("D1"));
        assert_eq!(book.end("Sheet1", addr("B1"), Direction::Right).unwrap(), addr("D1"));

        // Empty column runs to the edge
        let empty = CellAddress::new(1_048_575, 3);
        assert_eq!(book.end("Sheet1", empty, Direction::Up).unwrap(), addr("C1"));
    }

    #[test]
    fn test_number_over_date_is_not_a_date() {
        let mut book = UmyaWorkbook::new();
        book.set_value("Sheet1", addr("A1"), &date_value("01-01-2024")).unwrap();
        book.set_value("Sheet1", addr("A1"), &CellValue::Number(42.0)).unwrap();
        assert_eq!(book.get_value("Sheet1", addr("A1")).unwrap(), CellValue::Number(42.0));

        // A later date write puts the format back
        book.set_value("Sheet1", addr("A1"), &date_value("02-01-2024")).unwrap();
        assert_eq!(book.get_value("Sheet1", addr("A1")).unwrap(), date_value("02-01-2024"));
    }

    #[test]
    fn test_date_before_1900_rejected() {
        let mut book = UmyaWorkbook::new();
        assert!(matches!(
            book.set_value("Sheet1", addr("A1"), &date_value("01-01-1800")),
            Err(Error::DateOutOfRange(_))
        ));
        assert_eq!(book.get_value("Sheet1", addr("A1")).unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_end_only_sees_its_own_line() {
        let mut book = UmyaWorkbook::new();
        for row in 1..=50 {
            for col in 1..=10 {
                if col != 3 {
                    book.set_value("Sheet1", CellAddress::new(row, col), &CellValue::text("x"))
                        .unwrap();
                }
            }
        }
        // Blank text still counts as occupied
        book.set_value("Sheet1", addr("C7"), &CellValue::text("")).unwrap();

        let bottom = CellAddress::new(1_048_575, 3);
        assert_eq!(book.end("Sheet1", bottom, Direction::Up).unwrap(), addr("C7"));

        let right = CellAddress::new(20, MAX_COLS);
        assert_eq!(book.end("Sheet1", right, Direction::Left).unwrap(), addr("J20"));
        assert_eq!(book.end("Sheet1", addr("A20"), Direction::Right).unwrap(), addr("B20"));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.xlsx");

        let mut book = UmyaWorkbook::new();
        book.add_sheet("Data").unwrap();
        book.set_value("Data", addr("A1"), &CellValue::text("Hello")).unwrap();
        book.set_value("Data", addr("B1"), &CellValue::Number(42.0)).unwrap();
        book.set_value("Data", addr("C1"), &CellValue::text("42")).unwrap();
        book.set_value("Data", addr("D1"), &date_value("01-01-2024")).unwrap();
        book.save(&path).unwrap();
        assert_eq!(book.path(), Some(path.as_path()));
        book.close().unwrap();

        let book = UmyaWorkbook::open(&path).unwrap();
        assert_eq!(book.sheet_names(), vec!["Sheet1".to_string(), "Data".to_string()]);
        assert_eq!(book.get_value("Data", addr("A1")).unwrap(), CellValue::text("Hello"));
        assert_eq!(book.get_value("Data", addr("B1")).unwrap(), CellValue::Number(42.0));
        assert_eq!(book.get_value("Data", addr("C1")).unwrap(), CellValue::text("42"));
        assert_eq!(book.get_value("Data", addr("D1")).unwrap(), date_value("01-01-2024"));
    }

    #[test]
    fn test_open_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        assert!(matches!(UmyaWorkbook::open(&path), Err(Error::Open { .. })));
    }
}
