//! Lenient date coercion for incident date cells.
//!
//! Values that cannot be read as a date become `None` and the row is later
//! discarded, never rejected with an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::Cell;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%m/%d/%y",
    "%d-%b-%y",
];

/// `%Y` also accepts one to three digit years; those are never incident dates.
const MIN_YEAR: i32 = 1000;

/// Integer cells in this range are read as compact `YYYYMMDD` dates.
const COMPACT_DATES: std::ops::RangeInclusive<f64> = 10_000_101.0..=99_991_231.0;

/// Convert a cell to a calendar date, or `None` when it does not hold one.
pub fn coerce_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Text(s) => parse_date_text(s),
        Cell::Number(n) if n.fract() == 0.0 && COMPACT_DATES.contains(n) => {
            NaiveDate::parse_from_str(&format!("{}", *n as i64), "%Y%m%d").ok()
        }
        Cell::Empty | Cell::Number(_) | Cell::Bool(_) => None,
    }
}

/// Parse a textual date or timestamp; the time of day is discarded.
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    let full_year = |date: &NaiveDate| date.year() >= MIN_YEAR;
    DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .find(full_year)
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .find(full_year)
        })
}
