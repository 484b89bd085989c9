//! Date parsing and spreadsheet date serials
//!
//! Spreadsheets store dates as serial numbers (days since a base date) plus a
//! number format that tells the reader to display them as dates. This module
//! uses the 1900 date system:
//! - serial 1 is 1900-01-01
//! - the 1900 leap-year bug is kept: serial 60 is the non-existent
//!   1900-02-29, so every later serial is one day ahead of a plain count
//! - the fractional part is the time of day

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Separator between the first two digit groups of a date value
static VALUE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(\D+)\d").expect("valid value separator regex")
});

/// Either a strftime directive or a run of literal punctuation
static FORMAT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%[-_0^#]?[A-Za-z%]|([^%A-Za-z0-9]+)").expect("valid format token regex")
});

/// Serial of the fictional 1900-02-29
const LEAP_BUG_SERIAL: i64 = 60;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Serial 0
fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 31).expect("valid base date")
}

/// Parse `value` with a chrono `format`.
///
/// When the direct parse fails and the value separates its fields differently
/// from the format (`12.3.1999` against `%d-%m-%Y`), the value's separator is
/// rewritten to the format's and the parse retried. The error reported is the
/// one from the direct parse.
pub fn parse_date(value: &str, format: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    let first = match parse_with(value, format) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };

    if let Some(normalized) = normalize_separator(value, format) {
        if let Ok(dt) = parse_with(&normalized, format) {
            return Ok(dt);
        }
    }

    Err(Error::InvalidDate {
        value: value.to_string(),
        format: format.to_string(),
        source: first,
    })
}

fn parse_with(value: &str, format: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, format).or_else(|e| {
        NaiveDate::parse_from_str(value, format)
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| e)
    })
}

/// First literal separator in a chrono format string
fn format_separator(format: &str) -> Option<&str> {
    FORMAT_TOKEN
        .captures_iter(format)
        .find_map(|caps| caps.get(1).map(|m| m.as_str()))
}

fn normalize_separator(value: &str, format: &str) -> Option<String> {
    let target = format_separator(format)?;
    let current = VALUE_SEPARATOR.captures(value)?.get(1)?.as_str();
    if current == target {
        return None;
    }
    Some(value.replace(current, target))
}

/// Convert a date-time to a 1900-system serial number.
///
/// Returns `None` for dates before 1900-01-01, which have no serial.
pub fn date_to_serial(dt: NaiveDateTime) -> Option<f64> {
    let mut days = (dt.date() - base_date()).num_days();
    if days < 1 {
        return None;
    }
    if days >= LEAP_BUG_SERIAL {
        days += 1;
    }
    let seconds = dt.time().signed_duration_since(NaiveTime::MIN).num_seconds();
    Some(days as f64 + seconds as f64 / SECONDS_PER_DAY)
}

/// Serial of `dt`, or [`Error::DateOutOfRange`] when it predates the 1900
/// date system
pub fn checked_serial(dt: NaiveDateTime) -> Result<f64> {
    date_to_serial(dt).ok_or_else(|| Error::DateOutOfRange(dt.to_string()))
}

/// Convert a 1900-system serial number to a date-time.
///
/// Returns `None` for negative or non-finite serials and for serial 60,
/// which names a day that does not exist.
pub fn serial_to_date(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let day = serial.floor() as i64;
    if day == LEAP_BUG_SERIAL {
        return None;
    }
    let adjusted = if day > LEAP_BUG_SERIAL { day - 1 } else { day };
    let date = base_date().checked_add_signed(Duration::days(adjusted))?;

    let seconds = ((serial - day as f64) * SECONDS_PER_DAY).round() as i64;
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::seconds(seconds))
}

/// Whether a number format code displays its number as a date or time.
///
/// Quoted literals, bracketed sections (colors, conditions, locales) and
/// escaped characters are ignored; any remaining `d`, `m`, `y`, `h` or `s`
/// makes it a date format. `General` is not.
pub fn is_date_format_code(code: &str) -> bool {
    if code.eq_ignore_ascii_case("general") {
        return false;
    }

    let mut chars = code.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                for q in chars.by_ref() {
                    if q == '"' {
                        break;
                    }
                }
            }
            '[' => {
                for q in chars.by_ref() {
                    if q == ']' {
                        break;
                    }
                }
            }
            '\\' => {
                chars.next();
            }
            'd' | 'D' | 'm' | 'M' | 'y' | 'Y' | 'h' | 'H' | 's' | 'S' => return true,
            _ => {}
        }
    }
    false
}
