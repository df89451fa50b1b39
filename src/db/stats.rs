use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) SCHEMA VERSION
    //
    let version: i64 = pool
        .conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))?;
    println!("{}• Schema version:{} {}", CYAN, RESET, version);

    //
    // 3) ROW COUNTS
    //
    let trips: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM trips", [], |row| row.get(0))?;
    let days: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM day_info", [], |row| row.get(0))?;
    let items: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM schedule", [], |row| row.get(0))?;

    println!("{}• Trips:{} {}{}{}", CYAN, RESET, GREEN, trips, RESET);
    println!("{}• Day notes:{} {}{}{}", CYAN, RESET, GREEN, days, RESET);
    println!(
        "{}• Schedule items:{} {}{}{}",
        CYAN, RESET, GREEN, items, RESET
    );

    //
    // 4) TRIP DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_date FROM trips ORDER BY start_date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT end_date FROM trips ORDER BY end_date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Travel range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
