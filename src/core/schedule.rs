use crate::core::days::parse_day_time_arg;
use crate::core::window::DayWindow;
use crate::db::log::tdlog;
use crate::db::pool::DbPool;
use crate::db::watch::{ChangeEvent, ChangeOp, Entity};
use crate::db::{schedule, trips};
use crate::errors::{AppError, AppResult};
use crate::models::{Category, CategoryDetails, ScheduleItem};
use crate::ui::messages::success;
use crate::utils::money::parse_amount;
use crate::utils::time::parse_time_strict;

/// High-level business logic for the `plan` subcommands.
pub struct ScheduleLogic;

/// Category-specific flags as they arrive from the CLI; which of them
/// apply depends on the item's category.
#[derive(Debug, Default)]
pub struct DetailArgs {
    pub place: Option<String>,
    pub mode: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub arrives: Option<String>,
    pub kind: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub booking_ref: Option<String>,
    pub booked_via: Option<String>,
}

impl DetailArgs {
    fn is_empty(&self) -> bool {
        self.place.is_none()
            && self.mode.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.arrives.is_none()
            && self.kind.is_none()
            && self.check_in.is_none()
            && self.check_out.is_none()
            && self.booking_ref.is_none()
            && self.booked_via.is_none()
    }
}

/// Merge the provided flags into a details variant. Flags that make no
/// sense for the item's category are rejected instead of silently
/// dropped.
fn apply_detail_args(
    details: &mut CategoryDetails,
    args: &DetailArgs,
    window: &DayWindow,
) -> AppResult<()> {
    let reject = |flag: &str, category: Category| {
        Err(AppError::InvalidCategory(format!(
            "--{} does not apply to a {} item",
            flag,
            category.to_db_str()
        )))
    };

    match details {
        CategoryDetails::Other { place } | CategoryDetails::Sightseeing { place } => {
            if let Some(p) = &args.place {
                *place = p.clone();
            }
            for (flag, set) in [
                ("mode", args.mode.is_some()),
                ("from", args.from.is_some()),
                ("to", args.to.is_some()),
                ("arrives", args.arrives.is_some()),
                ("kind", args.kind.is_some()),
                ("check-in", args.check_in.is_some()),
                ("check-out", args.check_out.is_some()),
                ("booking-ref", args.booking_ref.is_some()),
                ("booked-via", args.booked_via.is_some()),
            ] {
                if set {
                    return reject(flag, details.category());
                }
            }
        }
        CategoryDetails::Transport {
            mode,
            from_place,
            to_place,
            arrives,
            booking_ref,
        } => {
            if let Some(m) = &args.mode {
                *mode = m.clone();
            }
            if let Some(f) = &args.from {
                *from_place = f.clone();
            }
            if let Some(t) = &args.to {
                *to_place = t.clone();
            }
            if let Some(raw) = &args.arrives {
                *arrives = if raw.trim().is_empty() {
                    None
                } else {
                    Some(parse_day_time_arg(raw, window)?)
                };
            }
            if let Some(r) = &args.booking_ref {
                *booking_ref = r.clone();
            }
            for (flag, set) in [
                ("place", args.place.is_some()),
                ("kind", args.kind.is_some()),
                ("check-in", args.check_in.is_some()),
                ("check-out", args.check_out.is_some()),
                ("booked-via", args.booked_via.is_some()),
            ] {
                if set {
                    return reject(flag, Category::Transport);
                }
            }
        }
        CategoryDetails::Meal { place, kind } => {
            if let Some(p) = &args.place {
                *place = p.clone();
            }
            if let Some(k) = &args.kind {
                *kind = k.clone();
            }
            for (flag, set) in [
                ("mode", args.mode.is_some()),
                ("from", args.from.is_some()),
                ("to", args.to.is_some()),
                ("arrives", args.arrives.is_some()),
                ("check-in", args.check_in.is_some()),
                ("check-out", args.check_out.is_some()),
                ("booking-ref", args.booking_ref.is_some()),
                ("booked-via", args.booked_via.is_some()),
            ] {
                if set {
                    return reject(flag, Category::Meal);
                }
            }
        }
        CategoryDetails::Accommodation {
            check_in,
            check_out,
            booked_via,
        } => {
            if let Some(raw) = &args.check_in {
                *check_in = if raw.trim().is_empty() {
                    None
                } else {
                    Some(parse_day_time_arg(raw, window)?)
                };
            }
            if let Some(raw) = &args.check_out {
                *check_out = if raw.trim().is_empty() {
                    None
                } else {
                    Some(parse_day_time_arg(raw, window)?)
                };
            }
            if let Some(v) = &args.booked_via {
                *booked_via = v.clone();
            }
            for (flag, set) in [
                ("place", args.place.is_some()),
                ("mode", args.mode.is_some()),
                ("from", args.from.is_some()),
                ("to", args.to.is_some()),
                ("arrives", args.arrives.is_some()),
                ("kind", args.kind.is_some()),
                ("booking-ref", args.booking_ref.is_some()),
            ] {
                if set {
                    return reject(flag, Category::Accommodation);
                }
            }
        }
        CategoryDetails::Prep => {
            if !args.is_empty() {
                return reject("place", Category::Prep);
            }
        }
    }
    Ok(())
}

impl ScheduleLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        pool: &mut DbPool,
        trip_id: i64,
        day: i64,
        time: &str,
        title: &str,
        category: Option<&str>,
        end_time: Option<&str>,
        amount: Option<&str>,
        note: Option<&str>,
        detail_args: DetailArgs,
    ) -> AppResult<ScheduleItem> {
        if title.trim().is_empty() {
            return Err(AppError::EmptyTitle);
        }

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

        let time = parse_time_strict(time)?;
        let category = match category {
            Some(c) => Category::from_input(c)
                .ok_or_else(|| AppError::InvalidCategory(c.to_string()))?,
            None => Category::Other,
        };

        let mut details = CategoryDetails::blank(category);
        apply_detail_args(&mut details, &detail_args, &window)?;

        let mut item = ScheduleItem::new(trip_id, day, time, title.trim(), details);
        if let Some(e) = end_time {
            item.end_time = Some(parse_time_strict(e)?);
        }
        if let Some(a) = amount {
            item.amount = parse_amount(a)?;
        }
        if let Some(n) = note {
            item.note = n.to_string();
        }

        item.id = schedule::insert_item(&pool.conn, &item)?;

        tdlog(
            &pool.conn,
            "add",
            &format!("trip#{}", trip_id),
            &format!("Planned '{}' on day {} at {}", item.title, day, item.time_str()),
        )?;
        pool.feed
            .emit(ChangeEvent::new(Entity::Schedule, ChangeOp::Created, trip_id).on_day(day));

        success(format!(
            "Item {} planned: day {} {} '{}' [{}]",
            item.id,
            day,
            item.time_str(),
            item.title,
            item.category().to_db_str()
        ));
        Ok(item)
    }

    /// Apply `plan edit` changes to one item. A `--category` change swaps
    /// the details variant; the category-specific flags then fill the new
    /// variant from scratch.
    #[allow(clippy::too_many_arguments)]
    pub fn edit(
        pool: &mut DbPool,
        item_id: i64,
        day: Option<i64>,
        time: Option<&str>,
        title: Option<&str>,
        category: Option<&str>,
        end_time: Option<&str>,
        amount: Option<&str>,
        note: Option<&str>,
        detail_args: DetailArgs,
    ) -> AppResult<()> {
        let mut item = schedule::get_item(&pool.conn, item_id)?;
        let trip = trips::get_trip(&pool.conn, item.trip_id)?;
        let window = DayWindow::resolve(&trip);

        if let Some(d) = day {
            if !window.contains(d) {
                return Err(AppError::InvalidDay(format!(
                    "day {} is outside the window {}..{}",
                    d,
                    window.min_day(),
                    window.max_day()
                )));
            }
            item.day = d;
        }
        if let Some(t) = time {
            item.time = parse_time_strict(t)?;
        }
        if let Some(t) = title {
            if t.trim().is_empty() {
                return Err(AppError::EmptyTitle);
            }
            item.title = t.trim().to_string();
        }
        if let Some(e) = end_time {
            item.end_time = if e.is_empty() {
                None
            } else {
                Some(parse_time_strict(e)?)
            };
        }
        if let Some(a) = amount {
            item.amount = parse_amount(a)?;
        }
        if let Some(n) = note {
            item.note = n.to_string();
        }

        if let Some(c) = category {
            let new_cat =
                Category::from_input(c).ok_or_else(|| AppError::InvalidCategory(c.to_string()))?;
            if new_cat != item.category() {
                item.details = CategoryDetails::blank(new_cat);
            }
        }
        apply_detail_args(&mut item.details, &detail_args, &window)?;

        schedule::update_item(&pool.conn, &item)?;

        tdlog(
            &pool.conn,
            "edit",
            &format!("trip#{}", item.trip_id),
            &format!("Edited item {} ('{}')", item.id, item.title),
        )?;
        pool.feed.emit(
            ChangeEvent::new(Entity::Schedule, ChangeOp::Updated, item.trip_id).on_day(item.day),
        );

        success(format!("Item {} updated.", item_id));
        Ok(())
    }

    pub fn delete(pool: &mut DbPool, item_id: i64) -> AppResult<()> {
        let item = schedule::get_item(&pool.conn, item_id)?;

        schedule::delete_item(&pool.conn, item_id)?;
        tdlog(
            &pool.conn,
            "del",
            &format!("trip#{}", item.trip_id),
            &format!("Deleted item {} ('{}')", item.id, item.title),
        )?;
        pool.feed.emit(
            ChangeEvent::new(Entity::Schedule, ChangeOp::Deleted, item.trip_id).on_day(item.day),
        );

        success(format!("Item {} ('{}') deleted.", item_id, item.title));
        Ok(())
    }
}
