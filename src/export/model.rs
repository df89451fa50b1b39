// src/export/model.rs

use serde::Serialize;

use crate::core::window::DayLabel;
use crate::models::{ScheduleItem, Trip};
use crate::utils::money::format_amount;

/// Flat schedule row, one per exported line. Everything is pre-rendered
/// to strings so the same struct feeds CSV, JSON, XLSX and PDF.
#[derive(Debug, Serialize)]
pub struct ScheduleExport {
    pub day: String,
    pub date: String,
    pub time: String,
    pub end_time: String,
    pub category: String,
    pub title: String,
    pub location: String,
    pub amount: String,
    pub note: String,
}

impl ScheduleExport {
    /// Builds an export row from a stored item, resolving the day number
    /// against the trip calendar.
    pub fn from_item(item: &ScheduleItem, trip: &Trip) -> Self {
        let date = trip
            .date_for_day(item.day)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        let amount = if item.amount != 0 {
            format_amount(item.amount)
        } else {
            String::new()
        };

        ScheduleExport {
            day: DayLabel::for_day(item.day, trip.duration()).text(),
            date,
            time: item.time_str(),
            end_time: item.end_time_str(),
            category: item.category().label().to_string(),
            title: item.title.clone(),
            location: item.details.where_str(),
            amount,
            note: item.note.clone(),
        }
    }
}

/// Column headers shared by the tabular formats (CSV header row comes
/// from serde field names instead).
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "Day", "Date", "Time", "End", "Category", "Title", "Where", "Amount", "Note",
    ]
}

/// Field values in header order.
pub(crate) fn entry_to_row(e: &ScheduleExport) -> Vec<String> {
    vec![
        e.day.clone(),
        e.date.clone(),
        e.time.clone(),
        e.end_time.clone(),
        e.category.clone(),
        e.title.clone(),
        e.location.clone(),
        e.amount.clone(),
        e.note.clone(),
    ]
}

pub(crate) fn entries_to_table(entries: &[ScheduleExport]) -> Vec<Vec<String>> {
    entries.iter().map(entry_to_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryDetails;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn export_row_resolves_date_and_label() {
        let mut trip = Trip::new(
            "Japan",
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
        );
        trip.id = 1;

        let mut item = ScheduleItem::new(
            1,
            2,
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            "Fushimi Inari",
            CategoryDetails::Sightseeing {
                place: "Kyoto".into(),
            },
        );
        item.amount = 1250;

        let row = ScheduleExport::from_item(&item, &trip);
        assert_eq!(row.day, "Day 2");
        assert_eq!(row.date, "2026-05-02");
        assert_eq!(row.time, "09:30");
        assert_eq!(row.end_time, "");
        assert_eq!(row.category, "Sightseeing");
        assert_eq!(row.location, "Kyoto");
        assert_eq!(row.amount, "12.50");
    }

    #[test]
    fn zero_amount_exports_blank() {
        let trip = Trip::new(
            "Japan",
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
        );
        let item = ScheduleItem::new(
            1,
            0,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            "Pack bags",
            CategoryDetails::Prep,
        );

        let row = ScheduleExport::from_item(&item, &trip);
        assert_eq!(row.day, "Day Before 1");
        assert_eq!(row.amount, "");
        assert_eq!(row.location, "");
    }
}
