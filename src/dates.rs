//! Date normalization for bug-tracker exports with mixed date formats.
//!
//! Tracker exports routinely mix `DD-MM-YYYY`, `MM/DD/YYYY`, ISO dates with
//! and without a time part, and raw spreadsheet date serials in the same
//! column. Normalization resolves a single token ordering per ingestion and
//! reduces every cell to a calendar date, or to `None` when the cell cannot
//! be read.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use clap::ValueEnum;

/// Accepted year range for a normalized date. Anything outside is treated
/// as a misparse rather than a real record.
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// ISO-ordered templates. Cells with a leading 4-digit year always parse
/// against these, whatever the configured ordering.
const YEAR_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d",
    "%Y-%m-%dT%H:%M:%S",
];

const DAY_FIRST_FORMATS: &[&str] = &[
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y",
];

const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%m-%d-%Y",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
];

/// Token ordering for dates without an unambiguous leading year.
///
/// Resolved once per ingestion, either from a CLI flag or inferred from the
/// date columns themselves, never re-guessed per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateOrder {
    DayFirst,
    MonthFirst,
    YearFirst,
}

impl DateOrder {
    /// Infers the ordering from a sample of raw date cells.
    ///
    /// The first cell with a numeric token that settles the question wins:
    /// a first token above 12 can only be a day, a second token above 12
    /// can only mean month-first. ISO-ordered cells carry no signal and are
    /// skipped. Fully ambiguous data falls back to day-first, the ordering
    /// this kind of export uses in practice.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> DateOrder {
        for cell in cells {
            let text = cell.trim();
            if leading_year(text).is_some() {
                continue;
            }
            let Some((first, second)) = leading_tokens(text) else {
                continue;
            };
            if first > 12 {
                return DateOrder::DayFirst;
            }
            if second > 12 {
                return DateOrder::MonthFirst;
            }
        }
        DateOrder::DayFirst
    }

    fn formats(self) -> &'static [&'static str] {
        match self {
            DateOrder::DayFirst => DAY_FIRST_FORMATS,
            DateOrder::MonthFirst => MONTH_FIRST_FORMATS,
            DateOrder::YearFirst => YEAR_FIRST_FORMATS,
        }
    }
}

/// Reduces a raw cell to a calendar date under the given ordering.
///
/// Returns `None` for empty cells, cells no template matches, and dates
/// outside the accepted year range. Any time-of-day part is discarded.
pub fn normalize(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    // Spreadsheet exports sometimes hand over the raw date serial instead
    // of a rendered string.
    if let Some(date) = parse_excel_serial(text) {
        return bounded(date);
    }

    // A leading 4-digit year is unambiguous regardless of the ordering.
    let formats = if leading_year(text).is_some() {
        YEAR_FIRST_FORMATS
    } else {
        order.formats()
    };
    if let Some(date) = parse_templates(text, formats) {
        return bounded(date);
    }

    // Last resort: strip any timezone/time suffix and retry the full
    // template union, so a cell the policy list cannot read still gets the
    // alternate ordering as a fallback.
    let stripped = strip_suffixes(text);
    for formats in [
        YEAR_FIRST_FORMATS,
        order.formats(),
        DAY_FIRST_FORMATS,
        MONTH_FIRST_FORMATS,
    ] {
        if let Some(date) = parse_templates(stripped, formats) {
            return bounded(date);
        }
    }

    None
}

/// First date template that matches wins. Templates with a time component
/// parse as datetimes and are truncated to the date.
fn parse_templates(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    for fmt in formats {
        if fmt.contains("%H") {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
                return Some(dt.date());
            }
        } else if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    None
}

/// Interprets a purely numeric cell as an Excel 1900-system date serial
/// (epoch 1899-12-30). The fractional time part is dropped.
fn parse_excel_serial(text: &str) -> Option<NaiveDate> {
    let serial: f64 = text.parse().ok()?;
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // A bare year like "2025" is a stray value, not a date serial.
    if serial.fract() == 0.0 && (MIN_YEAR as f64..=MAX_YEAR as f64).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn bounded(date: NaiveDate) -> Option<NaiveDate> {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year()).then_some(date)
}

/// Returns the leading 4-digit year when the cell is ISO-ordered.
fn leading_year(text: &str) -> Option<i32> {
    if text.len() < 4 || !text.is_char_boundary(4) {
        return None;
    }
    let year: i32 = text[..4].parse().ok()?;
    // A separator must follow, otherwise this is just a number.
    if !text[4..].starts_with(['-', '/']) {
        return None;
    }
    (year > MIN_YEAR).then_some(year)
}

/// First two numeric tokens of the date part of a cell, if present.
fn leading_tokens(text: &str) -> Option<(u32, u32)> {
    let date_part = text.split_whitespace().next()?.replace('/', "-");
    let mut parts = date_part.split('-');
    let first: u32 = parts.next()?.parse().ok()?;
    let second: u32 = parts.next()?.parse().ok()?;
    Some((first, second))
}

/// Cuts timezone offsets and `T`-joined time parts off a cell, leaving the
/// bare date text (`2025-10-10T10:46:00+02:00` becomes `2025-10-10`).
fn strip_suffixes(text: &str) -> &str {
    let text = text.split('+').next().unwrap_or(text);
    text.split('T').next().unwrap_or(text).trim()
}
