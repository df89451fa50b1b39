use crate::core::codec;
use crate::models::Category;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result, params};

/// Schema version the code expects; see `run_pending_migrations`.
pub const SCHEMA_VERSION: i64 = 2;

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn user_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

fn set_user_version(conn: &Connection, v: i64) -> Result<()> {
    conn.pragma_update(None, "user_version", v)
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// v0 -> v1: the composite-column schema, shape-compatible with data
/// imported from the spreadsheet era. Check-in/out and transport fields
/// live packed inside `location` / `subcategory` / `check_in` /
/// `check_out` text columns; no foreign keys yet.
fn create_schema_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS trips (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            title      TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date   TEXT NOT NULL,
            pre_days   INTEGER NOT NULL DEFAULT 0,
            post_days  INTEGER NOT NULL DEFAULT 0,
            view_from  INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS day_info (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id   INTEGER NOT NULL,
            day       INTEGER NOT NULL,
            cities    TEXT NOT NULL DEFAULT '',
            stay_name TEXT NOT NULL DEFAULT '',
            check_in  TEXT NOT NULL DEFAULT '',
            check_out TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS schedule (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id        INTEGER NOT NULL,
            day            INTEGER NOT NULL,
            time           TEXT NOT NULL DEFAULT '00:00',
            end_time       TEXT NOT NULL DEFAULT '',
            title          TEXT NOT NULL,
            location       TEXT NOT NULL DEFAULT '',
            memo           TEXT NOT NULL DEFAULT '',
            category       TEXT NOT NULL DEFAULT 'other',
            subcategory    TEXT NOT NULL DEFAULT '',
            amount         REAL NOT NULL DEFAULT 0,
            arrive_place   TEXT NOT NULL DEFAULT '',
            reservation_no TEXT NOT NULL DEFAULT '',
            booked_via     TEXT NOT NULL DEFAULT '',
            created_at     TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

const CREATE_SCHEMA_V2: &str = r#"
    CREATE TABLE trips (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        title      TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date   TEXT NOT NULL,
        pre_days   INTEGER NOT NULL DEFAULT 0 CHECK(pre_days >= 0),
        post_days  INTEGER NOT NULL DEFAULT 0 CHECK(post_days >= 0),
        view_from  INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE day_info (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        trip_id        INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
        day            INTEGER NOT NULL,
        cities         TEXT NOT NULL DEFAULT '',
        stay_name      TEXT NOT NULL DEFAULT '',
        check_in_day   INTEGER,
        check_in_time  TEXT,
        check_out_day  INTEGER,
        check_out_time TEXT
    );

    CREATE TABLE schedule (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        trip_id        INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
        day            INTEGER NOT NULL,
        time           TEXT NOT NULL DEFAULT '00:00',
        end_time       TEXT,
        title          TEXT NOT NULL,
        category       TEXT NOT NULL DEFAULT 'other'
                       CHECK(category IN ('other','transport','sightseeing','meal','accommodation','prep')),
        place          TEXT NOT NULL DEFAULT '',
        detail         TEXT NOT NULL DEFAULT '',
        amount         INTEGER NOT NULL DEFAULT 0,
        note           TEXT NOT NULL DEFAULT '',
        from_place     TEXT NOT NULL DEFAULT '',
        to_place       TEXT NOT NULL DEFAULT '',
        to_day         INTEGER,
        to_time        TEXT,
        check_in_day   INTEGER,
        check_in_time  TEXT,
        check_out_day  INTEGER,
        check_out_time TEXT,
        booking_ref    TEXT NOT NULL DEFAULT '',
        booked_via     TEXT NOT NULL DEFAULT '',
        created_at     TEXT NOT NULL DEFAULT ''
    );

    CREATE UNIQUE INDEX idx_day_info_trip_day ON day_info(trip_id, day);
    CREATE INDEX idx_schedule_trip_day ON schedule(trip_id, day, time);
"#;

/// v1 -> v2: rebuild the three tables with structured columns, splitting
/// every composite text field through the codec. Unreadable values take
/// the codec fallbacks; no row is dropped and no row aborts the rebuild.
fn migrate_split_composites(conn: &Connection) -> Result<()> {
    warning("Splitting composite columns into structured columns...");

    conn.execute_batch(&format!(
        r#"
        PRAGMA foreign_keys=OFF;
        BEGIN;

        ALTER TABLE trips RENAME TO trips_old;
        ALTER TABLE day_info RENAME TO day_info_old;
        ALTER TABLE schedule RENAME TO schedule_old;

        {CREATE_SCHEMA_V2}
        "#
    ))?;

    conn.execute(
        "INSERT INTO trips (id, title, start_date, end_date, pre_days, post_days, view_from, created_at)
         SELECT id, title, IFNULL(start_date, ''), IFNULL(end_date, ''),
                MAX(IFNULL(pre_days, 0), 0), MAX(IFNULL(post_days, 0), 0),
                IFNULL(view_from, 1), IFNULL(created_at, '')
         FROM trips_old",
        [],
    )?;

    copy_day_info_rows(conn)?;
    copy_schedule_rows(conn)?;

    conn.execute_batch(
        r#"
        DROP TABLE trips_old;
        DROP TABLE day_info_old;
        DROP TABLE schedule_old;

        UPDATE sqlite_sequence
            SET seq = (SELECT IFNULL(MAX(id), 0) FROM trips)
        WHERE name = 'trips';
        UPDATE sqlite_sequence
            SET seq = (SELECT IFNULL(MAX(id), 0) FROM day_info)
        WHERE name = 'day_info';
        UPDATE sqlite_sequence
            SET seq = (SELECT IFNULL(MAX(id), 0) FROM schedule)
        WHERE name = 'schedule';

        COMMIT;
        PRAGMA foreign_keys=ON;
        "#,
    )?;

    success("Composite columns split.");
    Ok(())
}

/// Split an optional composite day/time pair. An empty stored string means
/// "no value", not "day 1".
fn split_pair(raw: &str) -> (Option<i64>, Option<String>) {
    if raw.trim().is_empty() {
        return (None, None);
    }
    let (day, time) = codec::decode_day_time(raw);
    (Some(day), if time.is_empty() { None } else { Some(time) })
}

fn copy_day_info_rows(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, trip_id, day, IFNULL(cities, ''), IFNULL(stay_name, ''),
                IFNULL(check_in, ''), IFNULL(check_out, '')
         FROM day_info_old",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut insert = conn.prepare(
        "INSERT OR IGNORE INTO day_info
             (id, trip_id, day, cities, stay_name,
              check_in_day, check_in_time, check_out_day, check_out_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;

    for r in rows {
        let (id, trip_id, day, cities, stay_name, check_in, check_out) = r?;
        let (ci_day, ci_time) = split_pair(&check_in);
        let (co_day, co_time) = split_pair(&check_out);
        insert.execute(params![
            id, trip_id, day, cities, stay_name, ci_day, ci_time, co_day, co_time
        ])?;
    }
    Ok(())
}

fn copy_schedule_rows(conn: &Connection) -> Result<()> {
    struct OldRow {
        id: i64,
        trip_id: i64,
        day: i64,
        time: String,
        end_time: String,
        title: String,
        location: String,
        memo: String,
        category: String,
        subcategory: String,
        amount: f64,
        arrive_place: String,
        reservation_no: String,
        booked_via: String,
        created_at: String,
    }

    let mut stmt = conn.prepare(
        "SELECT id, trip_id, day, IFNULL(time, '00:00'), IFNULL(end_time, ''),
                IFNULL(title, ''), IFNULL(location, ''), IFNULL(memo, ''),
                IFNULL(category, 'other'), IFNULL(subcategory, ''),
                IFNULL(amount, 0), IFNULL(arrive_place, ''),
                IFNULL(reservation_no, ''), IFNULL(booked_via, ''),
                IFNULL(created_at, '')
         FROM schedule_old",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(OldRow {
            id: row.get(0)?,
            trip_id: row.get(1)?,
            day: row.get(2)?,
            time: row.get(3)?,
            end_time: row.get(4)?,
            title: row.get(5)?,
            location: row.get(6)?,
            memo: row.get(7)?,
            category: row.get(8)?,
            subcategory: row.get(9)?,
            amount: row.get(10)?,
            arrive_place: row.get(11)?,
            reservation_no: row.get(12)?,
            booked_via: row.get(13)?,
            created_at: row.get(14)?,
        })
    })?;

    let mut insert = conn.prepare(
        "INSERT INTO schedule
             (id, trip_id, day, time, end_time, title, category, place, detail,
              amount, note, from_place, to_place, to_day, to_time,
              check_in_day, check_in_time, check_out_day, check_out_time,
              booking_ref, booked_via, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                 ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)",
    )?;

    for r in rows {
        let old = r?;
        let category = Category::from_input(&old.category).unwrap_or(Category::Other);
        let cents = (old.amount * 100.0).round() as i64;
        let end_time = if old.end_time.is_empty() {
            None
        } else {
            Some(old.end_time.clone())
        };

        let mut place = String::new();
        let mut detail = String::new();
        let mut from_place = String::new();
        let mut to_place = String::new();
        let (mut to_day, mut to_time) = (None, None);
        let (mut ci_day, mut ci_time) = (None, None);
        let (mut co_day, mut co_time) = (None, None);

        match category {
            Category::Accommodation => {
                (ci_day, ci_time) = split_pair(&old.location);
                (co_day, co_time) = split_pair(&old.subcategory);
            }
            Category::Transport => {
                let (from, to) = codec::decode_route(&old.location);
                from_place = from;
                to_place = if to.is_empty() {
                    old.arrive_place.clone()
                } else {
                    to
                };
                if !old.subcategory.trim().is_empty() {
                    let (day, time) = codec::decode_leg(&old.subcategory);
                    to_day = Some(day);
                    to_time = if time.is_empty() { None } else { Some(time) };
                }
            }
            _ => {
                place = old.location.clone();
                detail = old.subcategory.clone();
            }
        }

        insert.execute(params![
            old.id,
            old.trip_id,
            old.day,
            old.time,
            end_time,
            old.title,
            category.to_db_str(),
            place,
            detail,
            cents,
            old.memo,
            from_place,
            to_place,
            to_day,
            to_time,
            ci_day,
            ci_time,
            co_day,
            co_time,
            old.reservation_no,
            old.booked_via,
            old.created_at,
        ])?;
    }
    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let file = File::create(&backup_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            e.kind(),
            format!("Backup failed (create): {}", e),
        )))
    })?;

    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (start_file): {}",
            e
        ))))
    })?;

    let db_content = fs::read(db_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (read): {}",
            e
        ))))
    })?;

    zip.write_all(&db_content).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (write_all): {}",
            e
        ))))
    })?;

    zip.finish().map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (finish): {}",
            e
        ))))
    })?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Fresh databases walk the whole ladder: create the composite schema,
/// then immediately split it. Databases imported from the original tool
/// carry tables but no version stamp; they enter the ladder at v1 so the
/// split runs over their data, after a safety backup.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let mut version = user_version(conn)?;
    if version == 0 && table_exists(conn, "trips")? {
        version = 1;
    }

    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    // Only back up databases that already hold user data.
    if version > 0 {
        warning("Older schema detected — creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path — backup skipped.");
        }
    }

    while version < SCHEMA_VERSION {
        match version {
            0 => create_schema_v1(conn)?,
            1 => migrate_split_composites(conn)?,
            _ => break,
        }
        version += 1;
        set_user_version(conn, version)?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            params![
                format!("schema_v{}", version),
                format!("Schema migrated to version {}", version)
            ],
        )?;
    }

    Ok(())
}
