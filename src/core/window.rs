//! Day-window resolution: turns a trip's dates, buffer days and saved
//! view position into the ordered list of day slots the timetable shows.

use chrono::NaiveDate;

use crate::models::Trip;

/// Display label of a day slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    /// A day inside the trip proper, 1-based.
    Trip(i64),
    /// K-th day before the trip starts (day 0 is `Before(1)`).
    Before(i64),
    /// K-th day after the trip ends.
    After(i64),
}

impl DayLabel {
    pub fn for_day(day: i64, duration: i64) -> Self {
        if day < 1 {
            DayLabel::Before(1 - day)
        } else if day > duration {
            DayLabel::After(day - duration)
        } else {
            DayLabel::Trip(day)
        }
    }

    pub fn text(&self) -> String {
        match self {
            DayLabel::Trip(n) => format!("Day {}", n),
            DayLabel::Before(k) => format!("Day Before {}", k),
            DayLabel::After(k) => format!("Day After {}", k),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DaySlot {
    pub number: i64,
    /// Calendar date; None when the trip dates are corrupt.
    pub date: Option<NaiveDate>,
    pub label: DayLabel,
    /// A day earlier than the anchor has already been travelled and is
    /// rendered greyed out.
    pub past: bool,
}

/// The resolved window: every day of the trip plus its pre/post buffer
/// days, rotated so the anchor day comes first.
#[derive(Debug, Clone)]
pub struct DayWindow {
    pub slots: Vec<DaySlot>,
    pub anchor: i64,
    pub duration: i64,
    pub corrupt_dates: bool,
}

impl DayWindow {
    /// Resolve the window for a trip.
    ///
    /// The domain runs from `1 - pre_days` to `duration + post_days`. The
    /// saved `view_from` is pulled back into the domain from either side,
    /// then the domain is left-rotated at that anchor: anchor..max first,
    /// min..anchor (the travelled part) after it. Every day number appears
    /// exactly once regardless of the anchor.
    pub fn resolve(trip: &Trip) -> DayWindow {
        let duration = trip.duration();
        let corrupt = !trip.dates_ok();
        let min_day = trip.min_day();
        let max_day = duration + trip.post_days;
        let anchor = trip.view_from.clamp(min_day, max_day);

        let mut slots = Vec::with_capacity((max_day - min_day + 1) as usize);
        let mut push = |number: i64| {
            slots.push(DaySlot {
                number,
                date: if corrupt {
                    None
                } else {
                    trip.date_for_day(number)
                },
                label: DayLabel::for_day(number, duration),
                past: number < anchor,
            });
        };

        for n in anchor..=max_day {
            push(n);
        }
        for n in min_day..anchor {
            push(n);
        }

        DayWindow {
            slots,
            anchor,
            duration,
            corrupt_dates: corrupt,
        }
    }

    pub fn min_day(&self) -> i64 {
        self.slots.iter().map(|s| s.number).min().unwrap_or(1)
    }

    pub fn max_day(&self) -> i64 {
        self.slots.iter().map(|s| s.number).max().unwrap_or(1)
    }

    pub fn contains(&self, day: i64) -> bool {
        self.slots.iter().any(|s| s.number == day)
    }
}
