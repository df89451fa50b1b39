use crate::db::log::tdlog;
use crate::db::pool::DbPool;
use crate::db::watch::{ChangeEvent, ChangeOp, Entity};
use crate::db::{days, schedule, trips};
use crate::errors::{AppError, AppResult};
use crate::models::Trip;
use crate::ui::messages::success;
use chrono::NaiveDate;

/// High-level business logic for the `trip` subcommands.
pub struct TripLogic;

impl TripLogic {
    pub fn create(
        pool: &mut DbPool,
        title: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Trip> {
        if title.trim().is_empty() {
            return Err(AppError::EmptyTitle);
        }
        if end < start {
            return Err(AppError::TripRange(format!(
                "end date {} is before start date {}",
                end, start
            )));
        }

        let mut trip = Trip::new(title.trim(), start, end);
        trip.id = trips::insert_trip(&pool.conn, &trip)?;

        tdlog(
            &pool.conn,
            "add",
            &format!("trip#{}", trip.id),
            &format!("Created trip '{}' ({} -> {})", trip.title, start, end),
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Created, trip.id));

        success(format!(
            "Trip {} created: '{}' {} -> {} ({} days)",
            trip.id,
            trip.title,
            trip.start_str(),
            trip.end_str(),
            trip.duration()
        ));
        Ok(trip)
    }

    /// Apply `trip set` edits. Only the provided fields change; dates are
    /// re-validated as a pair so an edit can never invert the range.
    pub fn set(
        pool: &mut DbPool,
        id: i64,
        title: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<()> {
        let mut trip = trips::get_trip(&pool.conn, id)?;

        if let Some(t) = title {
            if t.trim().is_empty() {
                return Err(AppError::EmptyTitle);
            }
            trip.title = t.trim().to_string();
        }
        if let Some(s) = start {
            trip.start_date = Some(s);
        }
        if let Some(e) = end {
            trip.end_date = Some(e);
        }
        if let (Some(s), Some(e)) = (trip.start_date, trip.end_date)
            && e < s
        {
            return Err(AppError::TripRange(format!(
                "end date {} is before start date {}",
                e, s
            )));
        }

        trips::update_trip(&pool.conn, &trip)?;
        tdlog(
            &pool.conn,
            "edit",
            &format!("trip#{}", id),
            "Updated trip fields",
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Updated, id));

        success(format!("Trip {} updated.", id));
        Ok(())
    }

    /// Delete a trip and everything under it. The confirmation prompt
    /// lives in the CLI layer; by the time we get here the decision is
    /// made.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let trip = trips::get_trip(&pool.conn, id)?;

        if !trips::delete_trip(&pool.conn, id)? {
            return Err(AppError::TripNotFound(id));
        }

        tdlog(
            &pool.conn,
            "del",
            &format!("trip#{}", id),
            &format!("Deleted trip '{}' and its rows", trip.title),
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Deleted, id));

        success(format!("Trip {} ('{}') deleted.", id, trip.title));
        Ok(())
    }

    /// Add one buffer day before the trip. The view anchor follows the
    /// new day down so it surfaces at the top of the timetable.
    pub fn pre_add(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let mut trip = trips::get_trip(&pool.conn, id)?;

        trip.pre_days += 1;
        trip.view_from = (trip.view_from - 1).max(trip.min_day());
        trips::update_trip(&pool.conn, &trip)?;

        tdlog(
            &pool.conn,
            "edit",
            &format!("trip#{}", id),
            &format!("Added pre-trip day (now {})", trip.pre_days),
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Updated, id).on_day(trip.min_day()));

        success(format!(
            "Added pre-trip day: window now starts at day {}.",
            trip.min_day()
        ));
        Ok(())
    }

    /// Remove the outermost pre-trip day together with everything planned
    /// on it, in one transaction. The view anchor moves up one day.
    pub fn pre_del(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let mut trip = trips::get_trip(&pool.conn, id)?;
        if trip.pre_days == 0 {
            return Err(AppError::TripRange(
                "trip has no pre-trip days to remove".into(),
            ));
        }

        let doomed = trip.min_day();
        let tx = pool.conn.transaction()?;
        let items = schedule::delete_items_at_day(&tx, id, doomed)?;
        let infos = days::delete_day_info_at(&tx, id, doomed)?;
        trip.pre_days -= 1;
        trip.view_from += 1;
        trips::update_trip(&tx, &trip)?;
        tdlog(
            &tx,
            "del",
            &format!("trip#{}", id),
            &format!(
                "Removed pre-trip day {} ({} items, {} day notes)",
                doomed, items, infos
            ),
        )?;
        tx.commit()?;

        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Updated, id).on_day(doomed));

        success(format!(
            "Removed pre-trip day {} ({} schedule items, {} day notes dropped).",
            doomed, items, infos
        ));
        Ok(())
    }

    pub fn post_add(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let mut trip = trips::get_trip(&pool.conn, id)?;

        trip.post_days += 1;
        trips::update_trip(&pool.conn, &trip)?;

        tdlog(
            &pool.conn,
            "edit",
            &format!("trip#{}", id),
            &format!("Added post-trip day (now {})", trip.post_days),
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Updated, id).on_day(trip.max_day()));

        success(format!(
            "Added post-trip day: window now ends at day {}.",
            trip.max_day()
        ));
        Ok(())
    }

    /// Remove the trailing post-trip day and its rows, in one transaction.
    pub fn post_del(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let mut trip = trips::get_trip(&pool.conn, id)?;
        if trip.post_days == 0 {
            return Err(AppError::TripRange(
                "trip has no post-trip days to remove".into(),
            ));
        }

        let doomed = trip.max_day();
        let tx = pool.conn.transaction()?;
        let items = schedule::delete_items_at_day(&tx, id, doomed)?;
        let infos = days::delete_day_info_at(&tx, id, doomed)?;
        trip.post_days -= 1;
        trips::update_trip(&tx, &trip)?;
        tdlog(
            &tx,
            "del",
            &format!("trip#{}", id),
            &format!(
                "Removed post-trip day {} ({} items, {} day notes)",
                doomed, items, infos
            ),
        )?;
        tx.commit()?;

        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Updated, id).on_day(doomed));

        success(format!(
            "Removed post-trip day {} ({} schedule items, {} day notes dropped).",
            doomed, items, infos
        ));
        Ok(())
    }

    /// Persist a new rotation anchor for the timetable view.
    pub fn view_from(pool: &mut DbPool, id: i64, day: i64) -> AppResult<()> {
        let mut trip = trips::get_trip(&pool.conn, id)?;

        if day < trip.min_day() || day > trip.max_day() {
            return Err(AppError::InvalidDay(format!(
                "day {} is outside the window {}..{}",
                day,
                trip.min_day(),
                trip.max_day()
            )));
        }

        trip.view_from = day;
        trips::update_trip(&pool.conn, &trip)?;

        tdlog(
            &pool.conn,
            "edit",
            &format!("trip#{}", id),
            &format!("View now starts from day {}", day),
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::Trip, ChangeOp::Updated, id));

        success(format!("Timetable for trip {} now starts at day {}.", id, day));
        Ok(())
    }

    /// Rows that would disappear if the given day were removed; drives
    /// the CLI confirmation prompt.
    pub fn rows_at_day(pool: &DbPool, trip_id: i64, day: i64) -> AppResult<usize> {
        let items = schedule::load_items_by_day(&pool.conn, trip_id, day)?.len();
        let info = days::find_day_info(&pool.conn, trip_id, day)?.map(|_| 1).unwrap_or(0);
        Ok(items + info)
    }
}
