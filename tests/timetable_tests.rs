mod common;
use common::{init_db_with_trip, setup_test_db, td};

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn plan(db_path: &str, day: &str, time: &str, title: &str, extra: &[&str]) {
    let mut args = vec![
        "--db", db_path, "plan", "add", "--trip", "1", "--day", day, "--time", time,
        "--title", title,
    ];
    args.extend_from_slice(extra);
    td().args(&args).assert().success();
}

#[test]
fn test_timetable_shows_dates_and_items() {
    let db_path = setup_test_db("timetable_dates_items");
    init_db_with_trip(&db_path);

    plan(
        &db_path,
        "2",
        "09:00",
        "Uffizi",
        &["--category", "sightseeing", "--place", "Florence", "--amount", "25"],
    );

    td().args(["--db", &db_path, "timetable", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Tuscany"))
        .stdout(contains("Day 2"))
        .stdout(contains("2026-05-02"))
        .stdout(contains("Uffizi"))
        .stdout(contains("Sightseeing"))
        .stdout(contains("25.00 EUR"));
}

#[test]
fn test_timetable_rotation_starts_at_the_anchor() {
    let db_path = setup_test_db("timetable_rotation");
    init_db_with_trip(&db_path);

    plan(&db_path, "1", "10:00", "Arrival", &[]);
    plan(&db_path, "3", "09:00", "Siena old town", &[]);

    td().args([
        "--db", &db_path, "trip", "view-from", "--trip", "1", "--day", "3",
    ])
    .assert()
    .success();

    let output = td()
        .args(["--db", &db_path, "timetable", "--trip", "1"])
        .output()
        .expect("run timetable");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let day3 = stdout.find("Day 3").expect("day 3 shown");
    let day1 = stdout.find("Day 1").expect("day 1 shown");
    assert!(
        day3 < day1,
        "anchored day should come first:\n{}",
        stdout
    );
}

#[test]
fn test_timetable_skips_blank_days_by_default() {
    let db_path = setup_test_db("timetable_blank_days");
    init_db_with_trip(&db_path);

    plan(&db_path, "2", "09:00", "Uffizi", &[]);

    // Only day 2 has content.
    td().args(["--db", &db_path, "timetable", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Day 2").and(contains("Day 3").not()));

    // --all shows the whole window.
    td().args(["--db", &db_path, "timetable", "--trip", "1", "--all"])
        .assert()
        .success()
        .stdout(contains("Day 1"))
        .stdout(contains("Day 3"))
        .stdout(contains("Day 4"));
}

#[test]
fn test_timetable_labels_buffer_days() {
    let db_path = setup_test_db("timetable_buffer_labels");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "pre", "add", "--trip", "1"])
        .assert()
        .success();
    td().args(["--db", &db_path, "trip", "post", "add", "--trip", "1"])
        .assert()
        .success();

    plan(&db_path, "0", "21:00", "Pack bags", &["--category", "prep"]);
    plan(&db_path, "5", "11:00", "Laundry", &[]);

    td().args(["--db", &db_path, "timetable", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Day Before 1"))
        .stdout(contains("Day After 1"))
        .stdout(contains("Pack bags"))
        .stdout(contains("Laundry"));
}

#[test]
fn test_timetable_detail_lines() {
    let db_path = setup_test_db("timetable_detail_lines");
    init_db_with_trip(&db_path);

    plan(
        &db_path,
        "1",
        "22:10",
        "Night train",
        &[
            "--category", "transport", "--from", "Rome", "--to", "Vienna",
            "--arrives", "2 08:45", "--mode", "train", "--booking-ref", "XJ93K",
        ],
    );
    plan(
        &db_path,
        "2",
        "20:00",
        "Trattoria Mario",
        &["--category", "meal", "--kind", "dinner", "--note",
          "Ask for the table in the back, the front room gets loud after nine."],
    );

    td().args(["--db", &db_path, "timetable", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Rome -> Vienna"))
        .stdout(contains("arr. Day 2 08:45"))
        .stdout(contains("ref XJ93K"))
        .stdout(contains("(dinner)"))
        .stdout(contains("Ask for the table in the back,"));
}

#[test]
fn test_timetable_empty_trip_hints_at_plan_add() {
    let db_path = setup_test_db("timetable_empty_hint");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "timetable", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Nothing planned yet."));
}
