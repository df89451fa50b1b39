use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

/// A trip as stored in the `trips` table.
///
/// Dates are `Option` because rows written by older versions (or edited by
/// hand) may hold text that no longer parses as a date. Such a trip still
/// loads; every derived quantity falls back to a one-day trip.
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub id: i64,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Extra planning days before Day 1 (numbered 0, -1, ...).
    pub pre_days: i64,
    /// Extra planning days after the last trip day.
    pub post_days: i64,
    /// Day number the timetable view starts from.
    pub view_from: i64,
    pub created_at: String,
}

impl Trip {
    pub fn new(title: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Trip {
            id: 0,
            title: title.to_string(),
            start_date: Some(start),
            end_date: Some(end),
            pre_days: 0,
            post_days: 0,
            view_from: 1,
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// True when both dates parsed and are in order.
    pub fn dates_ok(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(s), Some(e)) if e >= s)
    }

    /// Number of trip days, inclusive of both endpoints.
    ///
    /// A trip with missing or inverted dates counts as one day so that day
    /// arithmetic downstream never sees a zero or negative span.
    pub fn duration(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(s), Some(e)) if e >= s => (e - s).num_days() + 1,
            _ => 1,
        }
    }

    /// Lowest day number in the planning window (`1 - pre_days`).
    pub fn min_day(&self) -> i64 {
        1 - self.pre_days
    }

    /// Highest day number in the planning window (`duration + post_days`).
    pub fn max_day(&self) -> i64 {
        self.duration() + self.post_days
    }

    /// Calendar date for a day number, when the start date is usable.
    /// Day 1 is the start date; day 0 and below land before it.
    pub fn date_for_day(&self, day: i64) -> Option<NaiveDate> {
        self.start_date
            .and_then(|s| s.checked_add_signed(Duration::days(day - 1)))
    }

    pub fn start_str(&self) -> String {
        match self.start_date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => "----------".to_string(),
        }
    }

    pub fn end_str(&self) -> String {
        match self.end_date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => "----------".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn duration_is_inclusive() {
        let t = Trip::new("Rome", d("2026-05-01"), d("2026-05-04"));
        assert_eq!(t.duration(), 4);
        assert_eq!(t.min_day(), 1);
        assert_eq!(t.max_day(), 4);
    }

    #[test]
    fn corrupt_dates_fall_back_to_one_day() {
        let mut t = Trip::new("Rome", d("2026-05-01"), d("2026-05-04"));
        t.end_date = None;
        assert_eq!(t.duration(), 1);
        t.start_date = Some(d("2026-05-10"));
        t.end_date = Some(d("2026-05-01"));
        assert_eq!(t.duration(), 1);
        assert!(!t.dates_ok());
    }

    #[test]
    fn date_for_day_handles_pre_trip_days() {
        let t = Trip::new("Rome", d("2026-05-01"), d("2026-05-04"));
        assert_eq!(t.date_for_day(1), Some(d("2026-05-01")));
        assert_eq!(t.date_for_day(0), Some(d("2026-04-30")));
        assert_eq!(t.date_for_day(5), Some(d("2026-05-05")));
    }
}
