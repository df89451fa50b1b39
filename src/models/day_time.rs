use chrono::NaiveTime;
use serde::Serialize;

/// A point inside the planning window: a day number plus an optional
/// clock time. Check-in and check-out are stored this way, as are
/// transport departures and arrivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTime {
    pub day: i64,
    pub time: Option<NaiveTime>,
}

impl DayTime {
    pub fn new(day: i64, time: Option<NaiveTime>) -> Self {
        DayTime { day, time }
    }

    pub fn time_str(&self) -> String {
        match self.time {
            Some(t) => t.format("%H:%M").to_string(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for DayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.time {
            Some(t) => write!(f, "Day {} {}", self.day, t.format("%H:%M")),
            None => write!(f, "Day {}", self.day),
        }
    }
}
