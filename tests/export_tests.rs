mod common;
use common::{init_db_with_data, init_db_with_trip, setup_test_db, td, temp_out};
use std::fs;

use predicates::str::contains;

#[test]
fn test_export_csv_whole_trip() {
    let db_path = setup_test_db("export_csv_all");
    init_db_with_data(&db_path);

    let out = temp_out("export_csv_all", "csv");

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("CSV export completed:"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("day,date,time,end_time,category,title,location,amount,note"));
    assert!(content.contains("Day 1,2026-05-01,10:15,,Transport,Train to Florence,Rome -> Florence,45.50,"));
    assert!(content.contains("Day 2,2026-05-02,09:00,12:30,Sightseeing,Uffizi,Florence,25.00,"));
}

#[test]
fn test_export_json_whole_trip() {
    let db_path = setup_test_db("export_json_all");
    init_db_with_data(&db_path);

    let out = temp_out("export_json_all", "json");

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "json", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("JSON export completed:"));

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("\"day\": \"Day 1\""));
    assert!(content.contains("\"title\": \"Train to Florence\""));
    assert!(content.contains("\"location\": \"Rome -> Florence\""));
    assert!(content.contains("\"amount\": \"45.50\""));
}

#[test]
fn test_export_single_day() {
    let db_path = setup_test_db("export_single_day");
    init_db_with_data(&db_path);

    let out = temp_out("export_single_day", "csv");

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "csv", "--file", &out,
        "--day", "2",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Uffizi"));
    assert!(!content.contains("Train to Florence"));
}

#[test]
fn test_export_day_outside_window_fails() {
    let db_path = setup_test_db("export_day_outside");
    init_db_with_data(&db_path);

    let out = temp_out("export_day_outside", "csv");

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "csv", "--file", &out,
        "--day", "9",
    ])
    .assert()
    .failure()
    .stderr(contains("day 9 is outside the trip window (1..=4)"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "csv", "--file",
        "relative.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("output file path must be absolute"));
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = setup_test_db("export_no_overwrite");
    init_db_with_data(&db_path);

    let out = temp_out("export_no_overwrite", "csv");
    fs::write(&out, "existing data").expect("seed existing file");

    // EOF on the prompt counts as a refusal.
    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "csv", "--file", &out,
    ])
    .assert()
    .failure()
    .stderr(contains("export cancelled: existing file not overwritten"));

    let content = fs::read_to_string(&out).expect("read file");
    assert_eq!(content, "existing data");

    // --force overwrites without asking.
    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "csv", "--file", &out,
        "--force",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read file");
    assert!(content.contains("Uffizi"));
}

#[test]
fn test_export_empty_trip_warns_and_writes_nothing() {
    let db_path = setup_test_db("export_empty_trip");
    init_db_with_trip(&db_path);

    let out = temp_out("export_empty_trip", "csv");

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("No schedule items found for the selected trip."));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_xlsx_creates_file() {
    let db_path = setup_test_db("export_xlsx");
    init_db_with_data(&db_path);

    let out = temp_out("export_xlsx", "xlsx");

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "xlsx", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("XLSX export completed:"));

    let meta = fs::metadata(&out).expect("stat xlsx");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_pdf_creates_file() {
    let db_path = setup_test_db("export_pdf");
    init_db_with_data(&db_path);

    let out = temp_out("export_pdf", "pdf");

    td().args([
        "--db", &db_path, "export", "--trip", "1", "--format", "pdf", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("PDF export completed:"));

    let content = fs::read(&out).expect("read pdf");
    assert!(content.starts_with(b"%PDF"));
}
