#![allow(dead_code)]

use std::path::PathBuf;

use optimizer_db::Db;
use serde_json::Value;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn insert_option(db: &Db, name: &str, value: Value, autoload: bool) {
    assert!(
        db.add_option(name, &value, autoload).expect("add option"),
        "option {name} already existed"
    );
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
