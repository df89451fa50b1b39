mod common;
use common::{init_db_with_data, init_db_with_trip, open_db, setup_test_db, td};

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn test_plan_add_defaults_to_other() {
    let db_path = setup_test_db("plan_add_default");
    init_db_with_trip(&db_path);

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "16:00",
        "--title", "Free walk",
    ])
    .assert()
    .success()
    .stdout(contains("Item 1 planned: day 1 16:00 'Free walk' [other]"));
}

#[test]
fn test_plan_add_accepts_category_aliases() {
    let db_path = setup_test_db("plan_add_alias");
    init_db_with_trip(&db_path);

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "15:00",
        "--title", "Hotel Duomo", "--category", "hotel", "--amount", "180",
    ])
    .assert()
    .success()
    .stdout(contains("[accommodation]"));

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "2", "--time", "13:00",
        "--title", "Lunch", "--category", "FOOD", "--kind", "lunch",
    ])
    .assert()
    .success()
    .stdout(contains("[meal]"));
}

#[test]
fn test_plan_add_rejects_foreign_detail_flags() {
    let db_path = setup_test_db("plan_add_foreign_flag");
    init_db_with_trip(&db_path);

    // A meal has no transport mode.
    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "13:00",
        "--title", "Lunch", "--category", "meal", "--mode", "train",
    ])
    .assert()
    .failure()
    .stderr(contains("--mode does not apply to a meal item"));

    // Sightseeing has no check-in.
    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "10:00",
        "--title", "Uffizi", "--category", "sightseeing", "--check-in", "1 15:00",
    ])
    .assert()
    .failure()
    .stderr(contains("--check-in does not apply to a sightseeing item"));
}

#[test]
fn test_plan_add_validates_inputs() {
    let db_path = setup_test_db("plan_add_validation");
    init_db_with_trip(&db_path);

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "7", "--time", "10:00",
        "--title", "Nope",
    ])
    .assert()
    .failure()
    .stderr(contains("day 7 is outside the window 1..4"));

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "25:00",
        "--title", "Nope",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid time format: 25:00"));

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "10:00",
        "--title", "Nope", "--amount", "12,50",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid amount: 12,50"));

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "10:00",
        "--title", "Nope", "--category", "picnic",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid category: picnic"));
}

#[test]
fn test_plan_list_shows_route_and_amount() {
    let db_path = setup_test_db("plan_list_route");
    init_db_with_data(&db_path);

    td().args(["--db", &db_path, "plan", "list", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Train to Florence"))
        .stdout(contains("Rome -> Florence"))
        .stdout(contains("45.50 EUR"))
        .stdout(contains("Uffizi"))
        .stdout(contains("25.00 EUR"));
}

#[test]
fn test_plan_list_day_filter() {
    let db_path = setup_test_db("plan_list_day_filter");
    init_db_with_data(&db_path);

    td().args(["--db", &db_path, "plan", "list", "--trip", "1", "--day", "2"])
        .assert()
        .success()
        .stdout(contains("Uffizi").and(contains("Train to Florence").not()));

    td().args(["--db", &db_path, "plan", "list", "--trip", "1", "--day", "3"])
        .assert()
        .success()
        .stdout(contains("No schedule items found."));
}

#[test]
fn test_plan_edit_updates_fields() {
    let db_path = setup_test_db("plan_edit_fields");
    init_db_with_data(&db_path);

    td().args([
        "--db", &db_path, "plan", "edit", "--id", "2", "--time", "09:30", "--amount", "32",
        "--note", "Book skip-the-line tickets",
    ])
    .assert()
    .success()
    .stdout(contains("Item 2 updated."));

    td().args(["--db", &db_path, "plan", "list", "--trip", "1", "--day", "2"])
        .assert()
        .success()
        .stdout(contains("09:30"))
        .stdout(contains("32.00 EUR"));
}

#[test]
fn test_plan_edit_category_swap_resets_details() {
    let db_path = setup_test_db("plan_edit_category_swap");
    init_db_with_data(&db_path);

    // Item 1 is the transport leg Rome -> Florence. Turning it into a
    // meal must drop the route fields.
    td().args([
        "--db", &db_path, "plan", "edit", "--id", "1", "--category", "meal",
        "--place", "Trattoria Mario", "--kind", "dinner",
    ])
    .assert()
    .success();

    let conn = open_db(&db_path);
    let (category, place, detail, from_place, to_place): (String, String, String, String, String) =
        conn.query_row(
            "SELECT category, place, detail, from_place, to_place FROM schedule WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            },
        )
        .expect("read item 1");

    assert_eq!(category, "meal");
    assert_eq!(place, "Trattoria Mario");
    assert_eq!(detail, "dinner");
    assert_eq!(from_place, "");
    assert_eq!(to_place, "");
}

#[test]
fn test_plan_edit_can_clear_end_time() {
    let db_path = setup_test_db("plan_edit_clear_end");
    init_db_with_data(&db_path);

    td().args(["--db", &db_path, "plan", "edit", "--id", "2", "--end", ""])
        .assert()
        .success();

    let conn = open_db(&db_path);
    let end: Option<String> = conn
        .query_row("SELECT end_time FROM schedule WHERE id = 2", [], |row| {
            row.get(0)
        })
        .expect("read end_time");
    assert_eq!(end, None);
}

#[test]
fn test_plan_del_with_yes() {
    let db_path = setup_test_db("plan_del_yes");
    init_db_with_data(&db_path);

    td().args(["--db", &db_path, "plan", "del", "--id", "1", "-y"])
        .assert()
        .success()
        .stdout(contains("Item 1 ('Train to Florence') deleted."));

    td().args(["--db", &db_path, "plan", "list", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Train to Florence").not());
}

#[test]
fn test_plan_del_declined_keeps_the_item() {
    let db_path = setup_test_db("plan_del_declined");
    init_db_with_data(&db_path);

    td().args(["--db", &db_path, "plan", "del", "--id", "1"])
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    td().args(["--db", &db_path, "plan", "list", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("Train to Florence"));
}

#[test]
fn test_plan_edit_unknown_item_fails() {
    let db_path = setup_test_db("plan_edit_unknown");
    init_db_with_trip(&db_path);

    td().args(["--db", &db_path, "plan", "edit", "--id", "42", "--time", "10:00"])
        .assert()
        .failure()
        .stderr(contains("Schedule item not found: 42"));
}

#[test]
fn test_transport_arrival_round_trips() {
    let db_path = setup_test_db("plan_transport_arrival");
    init_db_with_trip(&db_path);

    td().args([
        "--db", &db_path, "plan", "add", "--trip", "1", "--day", "1", "--time", "22:10",
        "--title", "Night train", "--category", "transport", "--from", "Rome",
        "--to", "Vienna", "--arrives", "2 08:45", "--booking-ref", "XJ93K",
    ])
    .assert()
    .success();

    let conn = open_db(&db_path);
    let (to_day, to_time, booking_ref): (Option<i64>, Option<String>, String) = conn
        .query_row(
            "SELECT to_day, to_time, booking_ref FROM schedule WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .expect("read arrival");

    assert_eq!(to_day, Some(2));
    assert_eq!(to_time.as_deref(), Some("08:45"));
    assert_eq!(booking_ref, "XJ93K");
}
