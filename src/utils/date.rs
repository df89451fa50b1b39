use chrono::NaiveDate;

use crate::errors::{AppError, AppResult};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a date from user input, rejecting anything that is not YYYY-MM-DD.
pub fn parse_date_strict(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Format a date for display. With `weekday` the short day name is
/// appended, e.g. `2026-05-01 (Fri)`.
pub fn format_date(d: NaiveDate, weekday: bool) -> String {
    if weekday {
        d.format("%Y-%m-%d (%a)").to_string()
    } else {
        d.format("%Y-%m-%d").to_string()
    }
}
