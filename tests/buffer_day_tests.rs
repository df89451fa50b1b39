mod common;
use common::{init_db_with_trip, open_db, setup_test_db, td};

use predicates::str::contains;

// Buffer days extend the planning window around the trip itself:
// `trip pre add` opens day 0, then -1, and so on; `trip post add` appends
// past the last trip day. Removing a buffer day drops whatever was
// planned on it.

#[test]
fn test_pre_add_opens_day_zero_and_moves_the_view() {
    let db_path = setup_test_db("pre_add_day_zero");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "pre", "add", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("window now starts at day 0."));

    // The view anchor follows the new day so it shows up on top.
    td().args(["--db", &db_path, "trip", "show", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("+1 pre"))
        .stdout(contains("window 0 .. 4"))
        .stdout(contains("view starts at day 0"));

    // A second pre day opens day -1.
    td().args(["--db", &db_path, "trip", "pre", "add", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("window now starts at day -1."));
}

#[test]
fn test_post_add_extends_the_window() {
    let db_path = setup_test_db("post_add_extends");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "post", "add", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("window now ends at day 5."));

    td().args(["--db", &db_path, "trip", "show", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("+1 post"))
        .stdout(contains("window 1 .. 5"));
}

#[test]
fn test_planning_on_a_buffer_day_works() {
    let db_path = setup_test_db("plan_on_buffer_day");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "pre", "add", "--trip", "1"])
        .assert()
        .success();

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "0", "--time", "21:00",
        "--title", "Pack bags", "--category", "prep",
    ])
    .assert()
    .success()
    .stdout(contains("Item 1 planned: day 0 21:00 'Pack bags' [prep]"));

    // Day 0 stays out of reach until a pre day opens it.
    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "-1", "--time", "09:00",
        "--title", "Too early",
    ])
    .assert()
    .failure()
    .stderr(contains("day -1 is outside the window 0..4"));
}

#[test]
fn test_pre_del_drops_the_day_and_its_rows() {
    let db_path = setup_test_db("pre_del_drops_rows");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "pre", "add", "--trip", "1"])
        .assert()
        .success();
    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "0", "--time", "21:00",
        "--title", "Pack bags", "--category", "prep",
    ])
    .assert()
    .success();

    // The prompt warns about the planned row; answer yes.
    td().args(["--db", &db_path, "trip", "pre", "del", "--trip", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains(
            "Removing this buffer day also deletes 1 row(s) planned at day 0.",
        ))
        .stdout(contains("Removed pre-trip day 0 (1 schedule items, 0 day notes dropped)."));

    // The view anchor moved back to day 1 and the row is gone.
    td().args(["--db", &db_path, "trip", "show", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("window 1 .. 4"))
        .stdout(contains("view starts at day 1"));

    let conn = open_db(&db_path);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schedule WHERE day = 0", [], |row| {
            row.get(0)
        })
        .expect("count day 0 rows");
    assert_eq!(rows, 0);
}

#[test]
fn test_pre_del_declined_keeps_everything() {
    let db_path = setup_test_db("pre_del_declined");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "pre", "add", "--trip", "1"])
        .assert()
        .success();
    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "0", "--time", "21:00",
        "--title", "Pack bags",
    ])
    .assert()
    .success();

    // EOF on stdin counts as a refusal.
    td().args(["--db", &db_path, "trip", "pre", "del", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    let conn = open_db(&db_path);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schedule WHERE day = 0", [], |row| {
            row.get(0)
        })
        .expect("count day 0 rows");
    assert_eq!(rows, 1);
}

#[test]
fn test_empty_buffer_day_is_removed_without_prompt() {
    let db_path = setup_test_db("pre_del_no_prompt");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "post", "add", "--trip", "1"])
        .assert()
        .success();

    // Nothing planned on day 5: no confirmation needed.
    td().args(["--db", &db_path, "trip", "post", "del", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Removed post-trip day 5 (0 schedule items, 0 day notes dropped)."));
}

#[test]
fn test_del_without_buffer_days_fails() {
    let db_path = setup_test_db("pre_del_none_left");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "trip", "pre", "del", "--trip", "1", "-y"])
        .assert()
        .failure()
        .stderr(contains("trip has no pre-trip days to remove"));

    td().args(["--db", &db_path, "trip", "post", "del", "--trip", "1", "-y"])
        .assert()
        .failure()
        .stderr(contains("trip has no post-trip days to remove"));
}

#[test]
fn test_view_from_moves_the_anchor() {
    let db_path = setup_test_db("view_from_anchor");
    init_db_with_trip(&db_path);

    td().args([
        "--db", &db_path, "trip", "view-from", "--trip", "1", "--day", "3",
    ])
    .assert()
    .success()
    .stdout(contains("Timetable for trip 1 now starts at day 3."));

    td().args(["--db", &db_path, "trip", "show", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("view starts at day 3"));

    td().args([
        "--db", &db_path, "trip", "view-from", "--trip", "1", "--day", "9",
    ])
    .assert()
    .failure()
    .stderr(contains("day 9 is outside the window 1..4"));
}
