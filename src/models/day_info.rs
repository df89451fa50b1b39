use serde::Serialize;

use super::day_time::DayTime;

/// Per-day annotations: which cities the day touches and where the
/// traveller sleeps that night. At most one row exists per (trip, day).
#[derive(Debug, Clone, Serialize)]
pub struct DayInfo {
    pub id: i64,
    pub trip_id: i64,
    pub day: i64,
    pub cities: Vec<String>,
    /// Free-text name of the accommodation; links this day to
    /// accommodation items carrying the same title.
    pub stay_name: String,
    pub check_in: Option<DayTime>,
    pub check_out: Option<DayTime>,
}

impl DayInfo {
    pub fn empty(trip_id: i64, day: i64) -> Self {
        DayInfo {
            id: 0,
            trip_id,
            day,
            cities: Vec::new(),
            stay_name: String::new(),
            check_in: None,
            check_out: None,
        }
    }

    pub fn cities_str(&self) -> String {
        self.cities.join(", ")
    }

    pub fn cities_from_str(s: &str) -> Vec<String> {
        s.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.cities.is_empty()
            && self.stay_name.is_empty()
            && self.check_in.is_none()
            && self.check_out.is_none()
    }
}
