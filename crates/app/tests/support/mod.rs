#![allow(dead_code)]

use optimizer_app::{AppConfig, AppState};
use optimizer_core::UsageRecord;
use serde_json::Value;
use tempfile::TempDir;

pub struct TestApp {
    pub _dir: TempDir,
    pub state: AppState,
}

pub fn setup_app() -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = AppConfig::new(dir.path().join("app.sqlite"));
    let state = AppState::new(config).expect("app state");
    state.setup_db().expect("setup db");
    TestApp { _dir: dir, state }
}

impl TestApp {
    pub fn add(&self, name: &str, value: Value, autoload: bool) {
        let db = self.state.open_db().expect("open db");
        assert!(db.add_option(name, &value, autoload).expect("add option"));
    }

    pub fn record_usage(&self, counts: &[(&str, u64)]) {
        let mut record = UsageRecord::new("2024-05-01 10:00:00");
        for (name, count) in counts {
            record.used_options.insert(name.to_string(), *count);
        }
        let db = self.state.open_db().expect("open db");
        db.save_usage_record(&record, true).expect("save record");
    }

    pub fn usage(&self) -> UsageRecord {
        self.state.services.usage.record().expect("usage record")
    }
}
