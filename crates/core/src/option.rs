use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Values the store accepts for the autoload flag, compared case-insensitively.
pub const AUTOLOAD_VALUES: [&str; 8] = ["yes", "no", "on", "off", "true", "false", "1", "0"];

/// A named configuration entry as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub name: String,
    pub value: Value,
    pub autoload: bool,
}

impl OptionEntry {
    pub fn new(name: impl Into<String>, value: Value, autoload: bool) -> Self {
        Self {
            name: name.into(),
            value,
            autoload,
        }
    }

    pub fn size_bytes(&self) -> usize {
        serde_json::to_string(&self.value)
            .map(|encoded| encoded.len())
            .unwrap_or(0)
    }

    /// Serialized size in KiB, rounded to two decimals.
    pub fn size_kb(&self) -> f64 {
        let kb = self.size_bytes() as f64 / 1024.0;
        (kb * 100.0).round() / 100.0
    }

    pub fn display_value(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        }
    }
}

pub fn parse_autoload(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "on" | "true" | "1" => Some(true),
        "no" | "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn autoload_label(autoload: bool) -> &'static str {
    if autoload { "yes" } else { "no" }
}

pub fn row_id(name: &str) -> String {
    let cleaned: String = name.chars().filter(|ch| *ch != '.' && *ch != ':').collect();
    format!("option_{cleaned}")
}
