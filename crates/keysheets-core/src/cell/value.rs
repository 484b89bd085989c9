//! Cell value types

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Represents the value read from or written to a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// No cell at this position
    #[default]
    Empty,

    /// Cell exists but holds no text
    Blank,

    /// Numeric value (integers are stored as f64 too)
    Number(f64),

    /// Text value
    Text(String),

    /// Date (and optional time of day)
    Date(NaiveDateTime),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Error literal (#DIV/0!, #N/A, etc.)
    Error(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Infer a value from keyword text
    ///
    /// - all ASCII digits: an integer number
    /// - ASCII digits with exactly one `.`: a float
    /// - empty text: [`CellValue::Empty`], which clears the cell when written
    /// - anything else: text
    ///
    /// Signs and exponents are not recognised, so `"-5"` stays text.
    pub fn infer(text: &str) -> Self {
        if text.is_empty() {
            return CellValue::Empty;
        }
        if Self::looks_numeric(text) {
            if let Ok(n) = text.parse::<f64>() {
                return CellValue::Number(n);
            }
        }
        CellValue::Text(text.to_string())
    }

    /// True for unsigned decimal text: digits with at most one `.`
    pub fn looks_numeric(text: &str) -> bool {
        let mut digits = 0usize;
        let mut dots = 0usize;
        for c in text.chars() {
            match c {
                '0'..='9' => digits += 1,
                '.' => dots += 1,
                _ => return false,
            }
        }
        digits > 0 && dots <= 1
    }

    /// Whether the value counts as "no value" when filtering range reads.
    ///
    /// `Empty`, `Blank`, `Number(0.0)`, `Text("")` and `Boolean(false)` are
    /// falsy. A numeric zero is therefore dropped along with empty cells.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Blank => true,
            CellValue::Number(n) => *n == 0.0,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Boolean(b) => !*b,
            CellValue::Date(_) | CellValue::Error(_) => false,
        }
    }

    /// Classify the value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Empty => CellType::Empty,
            CellValue::Blank => CellType::Blank,
            CellValue::Text(s) if s.is_empty() => CellType::Blank,
            CellValue::Text(_) => CellType::String,
            CellValue::Number(_) => CellType::Number,
            CellValue::Date(_) => CellType::Date,
            CellValue::Boolean(_) => CellType::Boolean,
            CellValue::Error(_) => CellType::Unknown,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Get the value as an integer when it is a whole number
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }

    /// Try to get the value as a date-time
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        self.cell_type().as_str()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty | CellValue::Blank => write!(f, ""),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

/// Classification of a cell's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellType {
    Number,
    String,
    Date,
    Boolean,
    Blank,
    Empty,
    Unknown,
}

impl CellType {
    /// Lowercase name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::Number => "number",
            CellType::String => "string",
            CellType::Date => "date",
            CellType::Boolean => "boolean",
            CellType::Blank => "blank",
            CellType::Empty => "empty",
            CellType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
