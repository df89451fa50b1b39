use crate::errors::{AppError, AppResult};
use crate::models::Trip;
use crate::utils::date::parse_date;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Row mapper for `trips`. Stored dates that no longer parse load as
/// `None` instead of failing the query; downstream day arithmetic treats
/// such a trip as one day long.
pub fn map_trip(row: &Row) -> Result<Trip> {
    let start_str: String = row.get("start_date")?;
    let end_str: String = row.get("end_date")?;

    Ok(Trip {
        id: row.get("id")?,
        title: row.get("title")?,
        start_date: parse_date(&start_str),
        end_date: parse_date(&end_str),
        pre_days: row.get("pre_days")?,
        post_days: row.get("post_days")?,
        view_from: row.get("view_from")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_trip(conn: &Connection, trip: &Trip) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO trips (title, start_date, end_date, pre_days, post_days, view_from, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            trip.title,
            trip.start_str(),
            trip.end_str(),
            trip.pre_days,
            trip.post_days,
            trip.view_from,
            trip.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_trips(conn: &Connection) -> AppResult<Vec<Trip>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM trips
         ORDER BY start_date ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_trip)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_trip(conn: &Connection, id: i64) -> AppResult<Option<Trip>> {
    let trip = conn
        .query_row("SELECT * FROM trips WHERE id = ?1", [id], map_trip)
        .optional()?;
    Ok(trip)
}

/// Load a trip or fail with `TripNotFound`; for CLI paths where the user
/// named the id explicitly.
pub fn get_trip(conn: &Connection, id: i64) -> AppResult<Trip> {
    find_trip(conn, id)?.ok_or(AppError::TripNotFound(id))
}

pub fn update_trip(conn: &Connection, trip: &Trip) -> AppResult<()> {
    conn.execute(
        "UPDATE trips
         SET title = ?1, start_date = ?2, end_date = ?3,
             pre_days = ?4, post_days = ?5, view_from = ?6
         WHERE id = ?7",
        params![
            trip.title,
            trip.start_str(),
            trip.end_str(),
            trip.pre_days,
            trip.post_days,
            trip.view_from,
            trip.id,
        ],
    )?;
    Ok(())
}

/// Delete a trip; day rows and schedule rows go with it via the cascade.
pub fn delete_trip(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM trips WHERE id = ?1", [id])?;
    Ok(n > 0)
}
