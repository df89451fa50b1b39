use crate::core::window::DayWindow;
use crate::db::log::tdlog;
use crate::db::pool::DbPool;
use crate::db::watch::{ChangeEvent, ChangeOp, Entity};
use crate::db::{days, schedule, trips};
use crate::errors::{AppError, AppResult};
use crate::models::{DayInfo, DayTime};
use crate::ui::messages::success;
use crate::utils::time::parse_time_strict;

/// High-level business logic for the `day` and `stay` subcommands.
pub struct DayLogic;

/// Parse a user-entered day/time argument: a day number, optionally
/// followed by a clock time (`"2 15:00"`). The day must fall inside the
/// trip's current window.
pub fn parse_day_time_arg(s: &str, window: &DayWindow) -> AppResult<DayTime> {
    let mut tokens = s.split_whitespace();
    let day_tok = tokens
        .next()
        .ok_or_else(|| AppError::InvalidDay(s.to_string()))?;
    let day: i64 = day_tok
        .parse()
        .map_err(|_| AppError::InvalidDay(day_tok.to_string()))?;
    if !window.contains(day) {
        return Err(AppError::InvalidDay(format!(
            "day {} is outside the window {}..{}",
            day,
            window.min_day(),
            window.max_day()
        )));
    }

    let time = match tokens.next() {
        Some(t) => Some(parse_time_strict(t)?),
        None => None,
    };
    Ok(DayTime::new(day, time))
}

/// Field updates for one day; `None` leaves the stored value alone,
/// `Some("")` clears it.
#[derive(Debug, Default)]
pub struct DayPatch {
    pub cities: Option<String>,
    pub stay: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

impl DayLogic {
    /// Upsert the info row of one (trip, day).
    pub fn set(pool: &mut DbPool, trip_id: i64, day: i64, patch: DayPatch) -> AppResult<()> {
        let trip = trips::get_trip(&pool.conn, trip_id)?;
        let window = DayWindow::resolve(&trip);
        if !window.contains(day) {
            return Err(AppError::InvalidDay(format!(
                "day {} is outside the window {}..{}",
                day,
                window.min_day(),
                window.max_day()
            )));
        }

        let mut info = days::find_day_info(&pool.conn, trip_id, day)?
            .unwrap_or_else(|| DayInfo::empty(trip_id, day));

        if let Some(cities) = patch.cities {
            info.cities = DayInfo::cities_from_str(&cities);
        }
        if let Some(stay) = patch.stay {
            info.stay_name = stay.trim().to_string();
        }
        if let Some(raw) = patch.check_in {
            info.check_in = if raw.trim().is_empty() {
                None
            } else {
                Some(parse_day_time_arg(&raw, &window)?)
            };
        }
        if let Some(raw) = patch.check_out {
            info.check_out = if raw.trim().is_empty() {
                None
            } else {
                Some(parse_day_time_arg(&raw, &window)?)
            };
        }

        days::upsert_day_info(&pool.conn, &info)?;
        tdlog(
            &pool.conn,
            "edit",
            &format!("trip#{}", trip_id),
            &format!("Updated day {} info", day),
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::DayInfo, ChangeOp::Updated, trip_id).on_day(day));

        success(format!("Day {} of trip {} updated.", day, trip_id));
        Ok(())
    }

    /// Rename a stay everywhere it appears: every day row carrying the
    /// name and the accommodation items titled with it, in one
    /// transaction. Renames stay consistent no matter which side of the
    /// app they are issued from.
    pub fn rename_stay(
        pool: &mut DbPool,
        trip_id: i64,
        old_name: &str,
        new_name: &str,
    ) -> AppResult<(usize, usize)> {
        let old_name = old_name.trim();
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::EmptyTitle);
        }
        trips::get_trip(&pool.conn, trip_id)?;

        let nights = days::count_stay_nights(&pool.conn, trip_id, old_name)?;
        if nights == 0 {
            return Err(AppError::Stay(format!(
                "no day of trip {} uses the stay '{}'",
                trip_id, old_name
            )));
        }

        let tx = pool.conn.transaction()?;
        let days_renamed = days::rename_stay_days(&tx, trip_id, old_name, new_name)?;
        let items_renamed = schedule::rename_stay_items(&tx, trip_id, old_name, new_name)?;
        tdlog(
            &tx,
            "rename",
            &format!("trip#{}", trip_id),
            &format!(
                "Stay '{}' -> '{}' ({} day rows, {} items)",
                old_name, new_name, days_renamed, items_renamed
            ),
        )?;
        tx.commit()?;

        pool.feed
            .emit(ChangeEvent::new(Entity::DayInfo, ChangeOp::Updated, trip_id));
        pool.feed
            .emit(ChangeEvent::new(Entity::Schedule, ChangeOp::Updated, trip_id));

        success(format!(
            "Stay '{}' renamed to '{}' ({} day rows, {} schedule items).",
            old_name, new_name, days_renamed, items_renamed
        ));
        Ok((days_renamed, items_renamed))
    }
}
