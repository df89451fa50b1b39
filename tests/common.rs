#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn td() -> Command {
    cargo_bin_cmd!("tripdeck")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tripdeck.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and create a small trip useful for many tests:
/// 'Tuscany', 2026-05-01 .. 2026-05-04 (trip id 1).
pub fn init_db_with_trip(db_path: &str) {
    // init DB (creates tables and runs migrations)
    td().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    td().args([
        "--db",
        db_path,
        "trip",
        "add",
        "--title",
        "Tuscany",
        "--from",
        "2026-05-01",
        "--to",
        "2026-05-04",
    ])
    .assert()
    .success();
}

/// Seed the Tuscany trip plus a couple of schedule items for list,
/// timetable and export tests.
pub fn init_db_with_data(db_path: &str) {
    init_db_with_trip(db_path);

    td().args([
        "--db",
        db_path,
        "plan",
        "add",
        "--trip",
        "1",
        "--day",
        "1",
        "--time",
        "10:15",
        "--title",
        "Train to Florence",
        "--category",
        "transport",
        "--from",
        "Rome",
        "--to",
        "Florence",
        "--amount",
        "45.50",
    ])
    .assert()
    .success();

    td().args([
        "--db",
        db_path,
        "plan",
        "add",
        "--trip",
        "1",
        "--day",
        "2",
        "--time",
        "09:00",
        "--title",
        "Uffizi",
        "--category",
        "sightseeing",
        "--place",
        "Florence",
        "--end",
        "12:30",
        "--amount",
        "25",
    ])
    .assert()
    .success();
}

/// Open the test database directly for assertions on stored rows.
pub fn open_db(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open db")
}
