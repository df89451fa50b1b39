use crate::errors::AppResult;
use crate::models::{DayInfo, DayTime};
use crate::utils::time::parse_time;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Rebuild an optional day/time pair from its two columns. A stored time
/// that fails to parse is dropped, not an error.
fn pair_from(day: Option<i64>, time: Option<String>) -> Option<DayTime> {
    day.map(|d| DayTime::new(d, time.as_deref().and_then(parse_time)))
}

pub fn map_day_info(row: &Row) -> Result<DayInfo> {
    let cities: String = row.get("cities")?;

    Ok(DayInfo {
        id: row.get("id")?,
        trip_id: row.get("trip_id")?,
        day: row.get("day")?,
        cities: DayInfo::cities_from_str(&cities),
        stay_name: row.get("stay_name")?,
        check_in: pair_from(row.get("check_in_day")?, row.get("check_in_time")?),
        check_out: pair_from(row.get("check_out_day")?, row.get("check_out_time")?),
    })
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

/// Insert or replace the single info row of a (trip, day).
pub fn upsert_day_info(conn: &Connection, info: &DayInfo) -> AppResult<()> {
    let (ci_day, ci_time) = pair_cols(&info.check_in);
    let (co_day, co_time) = pair_cols(&info.check_out);

    conn.execute(
        "INSERT INTO day_info
             (trip_id, day, cities, stay_name,
              check_in_day, check_in_time, check_out_day, check_out_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(trip_id, day) DO UPDATE SET
             cities = excluded.cities,
             stay_name = excluded.stay_name,
             check_in_day = excluded.check_in_day,
             check_in_time = excluded.check_in_time,
             check_out_day = excluded.check_out_day,
             check_out_time = excluded.check_out_time",
        params![
            info.trip_id,
            info.day,
            info.cities_str(),
            info.stay_name,
            ci_day,
            ci_time,
            co_day,
            co_time,
        ],
    )?;
    Ok(())
}

pub fn find_day_info(conn: &Connection, trip_id: i64, day: i64) -> AppResult<Option<DayInfo>> {
    let info = conn
        .query_row(
            "SELECT * FROM day_info WHERE trip_id = ?1 AND day = ?2",
            params![trip_id, day],
            map_day_info,
        )
        .optional()?;
    Ok(info)
}

pub fn load_day_infos(conn: &Connection, trip_id: i64) -> AppResult<Vec<DayInfo>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM day_info
         WHERE trip_id = ?1
         ORDER BY day ASC",
    )?;

    let rows = stmt.query_map([trip_id], map_day_info)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Drop the info row of one day; used when a buffer day is removed.
pub fn delete_day_info_at(conn: &Connection, trip_id: i64, day: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM day_info WHERE trip_id = ?1 AND day = ?2",
        params![trip_id, day],
    )?;
    Ok(n)
}

/// Point every day row at a new stay name. Callers wrap this together
/// with the schedule-side rename in one transaction.
pub fn rename_stay_days(
    conn: &Connection,
    trip_id: i64,
    old_name: &str,
    new_name: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE day_info SET stay_name = ?1 WHERE trip_id = ?2 AND stay_name = ?3",
        params![new_name, trip_id, old_name],
    )?;
    Ok(n)
}

/// Number of day rows carrying this stay name; drives the budget's night
/// count and the rename preview.
pub fn count_stay_nights(conn: &Connection, trip_id: i64, stay_name: &str) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM day_info WHERE trip_id = ?1 AND stay_name = ?2",
        params![trip_id, stay_name],
        |row| row.get(0),
    )?;
    Ok(n)
}
