use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Store key of the persisted usage record.
pub const USAGE_RECORD_OPTION: &str = "option_optimizer";

/// Read counts per option name since `starting_point_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(default)]
    pub starting_point_date: String,
    #[serde(default, alias = "used_meta_fields")]
    pub used_options: BTreeMap<String, u64>,
}

impl UsageRecord {
    pub fn new(starting_point_date: impl Into<String>) -> Self {
        Self {
            starting_point_date: starting_point_date.into(),
            used_options: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.used_options.is_empty()
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.used_options.get(name).copied()
    }
}
