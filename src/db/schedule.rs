use crate::errors::{AppError, AppResult};
use crate::models::{Category, CategoryDetails, DayTime, ScheduleItem};
use crate::utils::time::parse_time;
use chrono::NaiveTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn pair_from(day: Option<i64>, time: Option<String>) -> Option<DayTime> {
    day.map(|d| DayTime::new(d, time.as_deref().and_then(parse_time)))
}

/// Row mapper for `schedule`. Stored values are read permissively: an
/// unknown category becomes `Other`, an unreadable time becomes 00:00.
pub fn map_item(row: &Row) -> Result<ScheduleItem> {
    let time_str: String = row.get("time")?;
    let end_str: Option<String> = row.get("end_time")?;
    let cat_str: String = row.get("category")?;
    let category = Category::from_db_str(&cat_str).unwrap_or(Category::Other);

    let details = match category {
        Category::Other => CategoryDetails::Other {
            place: row.get("place")?,
        },
        Category::Transport => CategoryDetails::Transport {
            mode: row.get("detail")?,
            from_place: row.get("from_place")?,
            to_place: row.get("to_place")?,
            arrives: pair_from(row.get("to_day")?, row.get("to_time")?),
            booking_ref: row.get("booking_ref")?,
        },
        Category::Sightseeing => CategoryDetails::Sightseeing {
            place: row.get("place")?,
        },
        Category::Meal => CategoryDetails::Meal {
            place: row.get("place")?,
            kind: row.get("detail")?,
        },
        Category::Accommodation => CategoryDetails::Accommodation {
            check_in: pair_from(row.get("check_in_day")?, row.get("check_in_time")?),
            check_out: pair_from(row.get("check_out_day")?, row.get("check_out_time")?),
            booked_via: row.get("booked_via")?,
        },
        Category::Prep => CategoryDetails::Prep,
    };

    Ok(ScheduleItem {
        id: row.get("id")?,
        trip_id: row.get("trip_id")?,
        day: row.get("day")?,
        time: parse_time(&time_str).unwrap_or(NaiveTime::MIN),
        end_time: end_str.as_deref().and_then(parse_time),
        title: row.get("title")?,
        details,
        amount: row.get("amount")?,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

#[derive(Default)]
struct DetailCols {
    place: String,
    detail: String,
    from_place: String,
    to_place: String,
    to_day: Option<i64>,
    to_time: Option<String>,
    check_in_day: Option<i64>,
    check_in_time: Option<String>,
    check_out_day: Option<i64>,
    check_out_time: Option<String>,
    booking_ref: String,
    booked_via: String,
}

fn pair_cols(p: &Option<DayTime>) -> (Option<i64>, Option<String>) {
    match p {
        Some(dt) => (
            Some(dt.day),
            dt.time.map(|t| t.format("%H:%M").to_string()),
        ),
        None => (None, None),
    }
}

/// Flatten the details variant onto the table columns; fields of other
/// variants stay at their empty defaults.
fn detail_cols(details: &CategoryDetails) -> DetailCols {
    let mut cols = DetailCols::default();
    match details {
        CategoryDetails::Other { place } | CategoryDetails::Sightseeing { place } => {
            cols.place = place.clone();
        }
        CategoryDetails::Transport {
            mode,
            from_place,
            to_place,
            arrives,
            booking_ref,
        } => {
            cols.detail = mode.clone();
            cols.from_place = from_place.clone();
            cols.to_place = to_place.clone();
            (cols.to_day, cols.to_time) = pair_cols(arrives);
            cols.booking_ref = booking_ref.clone();
        }
        CategoryDetails::Meal { place, kind } => {
            cols.place = place.clone();
            cols.detail = kind.clone();
        }
        CategoryDetails::Accommodation {
            check_in,
            check_out,
            booked_via,
        } => {
            (cols.check_in_day, cols.check_in_time) = pair_cols(check_in);
            (cols.check_out_day, cols.check_out_time) = pair_cols(check_out);
            cols.booked_via = booked_via.clone();
        }
        CategoryDetails::Prep => {}
    }
    cols
}

pub fn insert_item(conn: &Connection, item: &ScheduleItem) -> AppResult<i64> {
    let c = detail_cols(&item.details);
    conn.execute(
        "INSERT INTO schedule
             (trip_id, day, time, end_time, title, category, place, detail,
              amount, note, from_place, to_place, to_day, to_time,
              check_in_day, check_in_time, check_out_day, check_out_time,
              booking_ref, booked_via, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                 ?15, ?16, ?17, ?18, ?19, ?20, ?21)",
        params![
            item.trip_id,
            item.day,
            item.time_str(),
            item.end_time.map(|t| t.format("%H:%M").to_string()),
            item.title,
            item.category().to_db_str(),
            c.place,
            c.detail,
            item.amount,
            item.note,
            c.from_place,
            c.to_place,
            c.to_day,
            c.to_time,
            c.check_in_day,
            c.check_in_time,
            c.check_out_day,
            c.check_out_time,
            c.booking_ref,
            c.booked_via,
            item.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_item(conn: &Connection, item: &ScheduleItem) -> AppResult<()> {
    let c = detail_cols(&item.details);
    conn.execute(
        "UPDATE schedule
         SET day = ?1, time = ?2, end_time = ?3, title = ?4, category = ?5,
             place = ?6, detail = ?7, amount = ?8, note = ?9,
             from_place = ?10, to_place = ?11, to_day = ?12, to_time = ?13,
             check_in_day = ?14, check_in_time = ?15,
             check_out_day = ?16, check_out_time = ?17,
             booking_ref = ?18, booked_via = ?19
         WHERE id = ?20",
        params![
            item.day,
            item.time_str(),
            item.end_time.map(|t| t.format("%H:%M").to_string()),
            item.title,
            item.category().to_db_str(),
            c.place,
            c.detail,
            item.amount,
            item.note,
            c.from_place,
            c.to_place,
            c.to_day,
            c.to_time,
            c.check_in_day,
            c.check_in_time,
            c.check_out_day,
            c.check_out_time,
            c.booking_ref,
            c.booked_via,
            item.id,
        ],
    )?;
    Ok(())
}

pub fn load_items_by_trip(conn: &Connection, trip_id: i64) -> AppResult<Vec<ScheduleItem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM schedule
         WHERE trip_id = ?1
         ORDER BY day ASC, time ASC, id ASC",
    )?;

    let rows = stmt.query_map([trip_id], map_item)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_items_by_day(
    conn: &Connection,
    trip_id: i64,
    day: i64,
) -> AppResult<Vec<ScheduleItem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM schedule
         WHERE trip_id = ?1 AND day = ?2
         ORDER BY time ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![trip_id, day], map_item)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_item(conn: &Connection, id: i64) -> AppResult<Option<ScheduleItem>> {
    let item = conn
        .query_row("SELECT * FROM schedule WHERE id = ?1", [id], map_item)
        .optional()?;
    Ok(item)
}

pub fn get_item(conn: &Connection, id: i64) -> AppResult<ScheduleItem> {
    find_item(conn, id)?.ok_or(AppError::ItemNotFound(id))
}

pub fn delete_item(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM schedule WHERE id = ?1", [id])?;
    Ok(n > 0)
}

/// Remove every item of one day; used when a buffer day is removed.
pub fn delete_items_at_day(conn: &Connection, trip_id: i64, day: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM schedule WHERE trip_id = ?1 AND day = ?2",
        params![trip_id, day],
    )?;
    Ok(n)
}

/// Retitle the accommodation items matching a stay name; the day-info
/// side of the rename lives in `db::days`.
pub fn rename_stay_items(
    conn: &Connection,
    trip_id: i64,
    old_name: &str,
    new_name: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE schedule
         SET title = ?1
         WHERE trip_id = ?2 AND category = 'accommodation' AND title = ?3",
        params![new_name, trip_id, old_name],
    )?;
    Ok(n)
}

/// Total cost per accommodation title, for the budget's stay lines.
pub fn accommodation_costs(conn: &Connection, trip_id: i64) -> AppResult<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT title, SUM(amount) FROM schedule
         WHERE trip_id = ?1 AND category = 'accommodation'
         GROUP BY title",
    )?;

    let rows = stmt.query_map([trip_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// (item count, summed amount) per category, ordered by spend.
pub fn category_totals(conn: &Connection, trip_id: i64) -> AppResult<Vec<(String, i64, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*), SUM(amount) FROM schedule
         WHERE trip_id = ?1
         GROUP BY category
         ORDER BY SUM(amount) DESC",
    )?;

    let rows = stmt.query_map([trip_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
