// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Tries to read a cell value as a date, date-time or time-of-day and
/// returns the Excel serial number plus the number format to apply.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let dt_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in dt_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(("yyyy-mm-dd hh:mm", excel_serial(&dt)));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(("yyyy-mm-dd", excel_serial(&dt)));
    }

    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            let seconds = t.num_seconds_from_midnight() as f64;
            return Some(("hh:mm", seconds / 86400.0));
        }
    }

    None
}

/// Days since the Excel epoch (1899-12-30), fractional part is the time.
fn excel_serial(dt: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    let duration = *dt - epoch;
    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_date_maps_to_whole_serial() {
        let (fmt, serial) = parse_to_excel_date("2026-05-01").unwrap();
        assert_eq!(fmt, "yyyy-mm-dd");
        assert_eq!(serial, 46143.0);
    }

    #[test]
    fn time_of_day_is_a_day_fraction() {
        let (fmt, serial) = parse_to_excel_date("06:00").unwrap();
        assert_eq!(fmt, "hh:mm");
        assert!((serial - 0.25).abs() < 1e-9);
    }

    #[test]
    fn free_text_is_not_a_date() {
        assert!(parse_to_excel_date("Fushimi Inari").is_none());
    }
}
