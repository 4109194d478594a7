use optimizer_core::UsageRecord;
use optimizer_db::Db;

use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use crate::util::time::starting_point_now;

#[derive(Clone)]
pub struct UsageService {
    config: SharedConfig,
}

impl UsageService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// The persisted record, or an empty one when tracking never ran.
    pub fn record(&self) -> Result<UsageRecord> {
        let db = self.db()?;
        Ok(db.load_usage_record()?.unwrap_or_default())
    }

    /// Clears the record immediately, without waiting for a request to end.
    pub fn reset(&self) -> Result<UsageRecord> {
        let db = self.db()?;
        let autoload = db
            .get_option(optimizer_core::USAGE_RECORD_OPTION)?
            .map(|entry| entry.autoload)
            .unwrap_or(true);
        let record = UsageRecord::new(starting_point_now());
        db.save_usage_record(&record, autoload)?;
        tracing::info!("usage record reset");
        Ok(record)
    }

    /// Creates the record on first activation and makes it eagerly loaded.
    /// Returns whether a new record was created.
    pub fn activate(&self) -> Result<bool> {
        let db = self.db()?;
        match db.load_usage_record()? {
            Some(record) => {
                db.save_usage_record(&record, true)?;
                Ok(false)
            }
            None => {
                db.save_usage_record(&UsageRecord::new(starting_point_now()), true)?;
                tracing::info!("usage tracking activated");
                Ok(true)
            }
        }
    }

    /// Keeps the data but stops the record from being eagerly loaded.
    pub fn deactivate(&self) -> Result<bool> {
        let db = self.db()?;
        let updated = db.set_usage_record_autoload(false)?;
        if updated {
            tracing::info!("usage tracking deactivated");
        }
        Ok(updated)
    }
}
