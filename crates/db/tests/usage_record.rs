mod support;

use optimizer_core::{USAGE_RECORD_OPTION, UsageRecord};
use rusqlite::Connection;
use support::setup_db;

#[test]
fn record_round_trips_through_the_store() {
    let test_db = setup_db();
    let db = &test_db.db;
    assert!(db.load_usage_record().expect("load").is_none());

    let mut record = UsageRecord::new("2024-05-01 10:00:00");
    record.used_options.insert("siteurl".to_string(), 4);
    db.save_usage_record(&record, true).expect("save");

    let loaded = db.load_usage_record().expect("load").expect("record");
    assert_eq!(loaded, record);
    let entry = db
        .get_option(USAGE_RECORD_OPTION)
        .expect("get")
        .expect("exists");
    assert!(entry.autoload);
}

#[test]
fn autoload_toggle_keeps_contents() {
    let test_db = setup_db();
    let db = &test_db.db;
    assert!(!db.set_usage_record_autoload(false).expect("toggle missing"));

    let mut record = UsageRecord::new("2024-05-01 10:00:00");
    record.used_options.insert("cron".to_string(), 9);
    db.save_usage_record(&record, true).expect("save");
    assert!(db.set_usage_record_autoload(false).expect("toggle"));

    let entry = db
        .get_option(USAGE_RECORD_OPTION)
        .expect("get")
        .expect("exists");
    assert!(!entry.autoload);
    assert_eq!(db.load_usage_record().expect("load"), Some(record));
}

#[test]
fn migrate_is_idempotent_and_keeps_rows() {
    let mut test_db = setup_db();
    test_db
        .db
        .save_usage_record(&UsageRecord::new("2024-01-01 00:00:00"), false)
        .expect("save");
    test_db.db.migrate().expect("migrate again");
    assert!(test_db.db.load_usage_record().expect("load").is_some());

    let conn = Connection::open(&test_db.path).expect("open raw");
    let index_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_options_autoload'",
            [],
            |row| row.get(0),
        )
        .expect("index count");
    assert_eq!(index_count, 1);
}

#[test]
fn non_json_values_are_read_as_strings() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open raw");
    conn.execute(
        "INSERT INTO options (name, value, autoload) VALUES ('raw', 'not json', 1)",
        [],
    )
    .expect("insert raw");
    let entry = test_db.db.get_option("raw").expect("get").expect("exists");
    assert_eq!(entry.value, serde_json::json!("not json"));
}
