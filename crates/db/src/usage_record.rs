use optimizer_core::{USAGE_RECORD_OPTION, UsageRecord};

use crate::Db;
use crate::error::Result;

impl Db {
    pub fn load_usage_record(&self) -> Result<Option<UsageRecord>> {
        let Some(entry) = self.get_option(USAGE_RECORD_OPTION)? else {
            return Ok(None);
        };
        let record = serde_json::from_value(entry.value)?;
        Ok(Some(record))
    }

    /// Writes the record wholesale. `autoload` controls whether the record
    /// itself is eagerly loaded.
    pub fn save_usage_record(&self, record: &UsageRecord, autoload: bool) -> Result<()> {
        let value = serde_json::to_value(record)?;
        self.set_option(USAGE_RECORD_OPTION, &value, autoload)
    }

    /// Flips the record's autoload flag, keeping its contents. Returns
    /// `false` when no record exists.
    pub fn set_usage_record_autoload(&self, autoload: bool) -> Result<bool> {
        let Some(entry) = self.get_option(USAGE_RECORD_OPTION)? else {
            return Ok(false);
        };
        self.set_option(USAGE_RECORD_OPTION, &entry.value, autoload)?;
        Ok(true)
    }
}
