use chrono::{Local, NaiveTime};
use serde::Serialize;

use super::day_time::DayTime;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Category {
    Other,
    Transport,
    Sightseeing,
    Meal,
    Accommodation,
    Prep,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Other,
        Category::Transport,
        Category::Sightseeing,
        Category::Meal,
        Category::Accommodation,
        Category::Prep,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Category::Other => "other",
            Category::Transport => "transport",
            Category::Sightseeing => "sightseeing",
            Category::Meal => "meal",
            Category::Accommodation => "accommodation",
            Category::Prep => "prep",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "other" => Some(Category::Other),
            "transport" => Some(Category::Transport),
            "sightseeing" => Some(Category::Sightseeing),
            "meal" => Some(Category::Meal),
            "accommodation" => Some(Category::Accommodation),
            "prep" => Some(Category::Prep),
            _ => None,
        }
    }

    /// Parse user input; case-insensitive, accepts a few short forms.
    pub fn from_input(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "other" => Some(Category::Other),
            "transport" | "travel" => Some(Category::Transport),
            "sightseeing" | "sight" => Some(Category::Sightseeing),
            "meal" | "food" => Some(Category::Meal),
            "accommodation" | "stay" | "hotel" => Some(Category::Accommodation),
            "prep" => Some(Category::Prep),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Other => "Other",
            Category::Transport => "Transport",
            Category::Sightseeing => "Sightseeing",
            Category::Meal => "Meal",
            Category::Accommodation => "Accommodation",
            Category::Prep => "Prep",
        }
    }
}

/// Category-specific fields of a schedule item.
///
/// Each variant carries only the fields that make sense for it, so a meal
/// can never hold a departure time and a transport leg can never hold a
/// check-in. The flat columns in the `schedule` table are mapped to and
/// from these variants in the db layer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum CategoryDetails {
    Other {
        place: String,
    },
    Transport {
        mode: String,
        from_place: String,
        to_place: String,
        /// Arrival leg; the departure is the item's own day and time.
        arrives: Option<DayTime>,
        booking_ref: String,
    },
    Sightseeing {
        place: String,
    },
    Meal {
        place: String,
        kind: String,
    },
    Accommodation {
        check_in: Option<DayTime>,
        check_out: Option<DayTime>,
        booked_via: String,
    },
    Prep,
}

impl CategoryDetails {
    pub fn category(&self) -> Category {
        match self {
            CategoryDetails::Other { .. } => Category::Other,
            CategoryDetails::Transport { .. } => Category::Transport,
            CategoryDetails::Sightseeing { .. } => Category::Sightseeing,
            CategoryDetails::Meal { .. } => Category::Meal,
            CategoryDetails::Accommodation { .. } => Category::Accommodation,
            CategoryDetails::Prep => Category::Prep,
        }
    }

    /// Empty details for a category, filled in by the edit flow.
    pub fn blank(category: Category) -> Self {
        match category {
            Category::Other => CategoryDetails::Other {
                place: String::new(),
            },
            Category::Transport => CategoryDetails::Transport {
                mode: String::new(),
                from_place: String::new(),
                to_place: String::new(),
                arrives: None,
                booking_ref: String::new(),
            },
            Category::Sightseeing => CategoryDetails::Sightseeing {
                place: String::new(),
            },
            Category::Meal => CategoryDetails::Meal {
                place: String::new(),
                kind: String::new(),
            },
            Category::Accommodation => CategoryDetails::Accommodation {
                check_in: None,
                check_out: None,
                booked_via: String::new(),
            },
            Category::Prep => CategoryDetails::Prep,
        }
    }

    /// Short location text for list views: the place, or the route for
    /// transport legs.
    pub fn where_str(&self) -> String {
        match self {
            CategoryDetails::Other { place }
            | CategoryDetails::Sightseeing { place }
            | CategoryDetails::Meal { place, .. } => place.clone(),
            CategoryDetails::Transport {
                from_place,
                to_place,
                ..
            } => {
                if from_place.is_empty() && to_place.is_empty() {
                    String::new()
                } else {
                    format!("{} -> {}", from_place, to_place)
                }
            }
            CategoryDetails::Accommodation { .. } | CategoryDetails::Prep => String::new(),
        }
    }
}

/// One row of the itinerary: something planned for a given day and time.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleItem {
    pub id: i64,
    pub trip_id: i64,
    pub day: i64,
    pub time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub title: String,
    pub details: CategoryDetails,
    /// Cost in minor units of the configured currency (cents).
    pub amount: i64,
    pub note: String,
    pub created_at: String,
}

impl ScheduleItem {
    pub fn new(
        trip_id: i64,
        day: i64,
        time: NaiveTime,
        title: &str,
        details: CategoryDetails,
    ) -> Self {
        ScheduleItem {
            id: 0,
            trip_id,
            day,
            time,
            end_time: None,
            title: title.to_string(),
            details,
            amount: 0,
            note: String::new(),
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn category(&self) -> Category {
        self.details.category()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    pub fn end_time_str(&self) -> String {
        match self.end_time {
            Some(t) => t.format("%H:%M").to_string(),
            None => String::new(),
        }
    }
}
