use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::env;
use std::path::PathBuf;

mod common;
use common::td;

/// Create a unique test DB path inside the system temp dir
fn setup_test_db(name: &str) -> String {
    // Cross-platform: /tmp on Linux/macOS, %TEMP% on Windows
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tripdeck.sqlite", name));

    let db_path = path.to_string_lossy().to_string();

    // Remove the file if it already exists (reset)
    std::fs::remove_file(&db_path).ok();

    db_path
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates_database");

    td().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized at"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_trip_add_and_list() {
    let db_path = setup_test_db("trip_add_and_list");

    td().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    td().args([
        "--db",
        &db_path,
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
    .success()
    .stdout(contains("Trip 1 created").and(contains("(4 days)")));

    td().args(["--db", &db_path, "trip", "list"])
        .assert()
        .success()
        .stdout(contains("Tuscany"))
        .stdout(contains("2026-05-01"))
        .stdout(contains("2026-05-04"));
}

#[test]
fn test_trip_add_rejects_inverted_range() {
    let db_path = setup_test_db("trip_inverted_range");

    td().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    td().args([
        "--db",
        &db_path,
        "trip",
        "add",
        "--title",
        "Backwards",
        "--from",
        "2026-05-04",
        "--to",
        "2026-05-01",
    ])
    .assert()
    .failure()
    .stderr(contains("end date 2026-05-01 is before start date 2026-05-04"));
}

#[test]
fn test_trip_add_rejects_bad_date() {
    let db_path = setup_test_db("trip_bad_date");

    td().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    td().args([
        "--db",
        &db_path,
        "trip",
        "add",
        "--title",
        "Nowhere",
        "--from",
        "01/05/2026",
        "--to",
        "2026-05-04",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date format: 01/05/2026"));
}

#[test]
fn test_trip_show_reports_window() {
    let db_path = setup_test_db("trip_show_window");
    common::init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "show", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Tuscany"))
        .stdout(contains("4 day(s)"))
        .stdout(contains("window 1 .. 4"))
        .stdout(contains("view starts at day 1"));
}

#[test]
fn test_trip_set_updates_title_and_dates() {
    let db_path = setup_test_db("trip_set");
    common::init_db_with_trip(&db_path);

    td().args([
        "--db",
        &db_path,
        "trip",
        "set",
        "--trip",
        "1",
        "--title",
        "Tuscany & Umbria",
        "--to",
        "2026-05-06",
    ])
    .assert()
    .success()
    .stdout(contains("Trip 1 updated."));

    td().args(["--db", &db_path, "trip", "show", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Tuscany & Umbria"))
        .stdout(contains("6 day(s)"));
}

#[test]
fn test_trip_set_cannot_invert_range() {
    let db_path = setup_test_db("trip_set_invert");
    common::init_db_with_trip(&db_path);

    td().args([
        "--db", &db_path, "trip", "set", "--trip", "1", "--to", "2026-04-30",
    ])
    .assert()
    .failure()
    .stderr(contains("is before start date"));
}

#[test]
fn test_trip_del_requires_confirmation() {
    let db_path = setup_test_db("trip_del_confirm");
    common::init_db_with_trip(&db_path);

    // No -y and no input on stdin: the prompt reads EOF and declines.
    td().args(["--db", &db_path, "trip", "del", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    // The trip is still there.
    td().args(["--db", &db_path, "trip", "list"])
        .assert()
        .success()
        .stdout(contains("Tuscany"));
}

#[test]
fn test_trip_del_cascades() {
    let db_path = setup_test_db("trip_del_cascade");
    common::init_db_with_data(&db_path);

    td().args(["--db", &db_path, "trip", "del", "--trip", "1", "-y"])
        .assert()
        .success()
        .stdout(contains("Trip 1 ('Tuscany') deleted."));

    // Day rows and schedule items went with it.
    let conn = common::open_db(&db_path);
    let items: i64 = conn
        .query_row("SELECT COUNT(*) FROM schedule", [], |row| row.get(0))
        .expect("count schedule");
    let infos: i64 = conn
        .query_row("SELECT COUNT(*) FROM day_info", [], |row| row.get(0))
        .expect("count day_info");
    assert_eq!(items, 0);
    assert_eq!(infos, 0);
}

#[test]
fn test_unknown_trip_fails() {
    let db_path = setup_test_db("unknown_trip");

    td().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    td().args(["--db", &db_path, "trip", "show", "--trip", "99"])
        .assert()
        .failure()
        .stderr(contains("Trip not found: 99"));
}
