use optimizer_core::OptionEntry;
use rusqlite::Row;
use serde_json::Value;

/// SQLite's default bound-parameter ceiling is 999; stay well under it.
pub(crate) const IN_CHUNK: usize = 500;

pub(crate) fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stored text that is not valid JSON is surfaced as a plain string.
pub(crate) fn decode_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

pub(crate) fn row_to_option(row: &Row<'_>) -> std::result::Result<OptionEntry, rusqlite::Error> {
    Ok(OptionEntry {
        name: row.get(0)?,
        value: decode_value(row.get(1)?),
        autoload: row.get::<_, i64>(2)? != 0,
    })
}
