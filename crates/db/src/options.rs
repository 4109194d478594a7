use std::collections::BTreeSet;

use optimizer_core::OptionEntry;
use rusqlite::{OptionalExtension, params, params_from_iter};
use serde_json::Value;

use crate::Db;
use crate::error::Result;
use crate::helpers::{IN_CHUNK, placeholders, row_to_option};

impl Db {
    pub fn get_option(&self, name: &str) -> Result<Option<OptionEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT name, value, autoload FROM options WHERE name = ?1",
                params![name],
                row_to_option,
            )
            .optional()?;
        Ok(entry)
    }

    /// Inserts a new entry. Returns `false` when the name is already taken.
    pub fn add_option(&self, name: &str, value: &Value, autoload: bool) -> Result<bool> {
        let encoded = serde_json::to_string(value)?;
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO options (name, value, autoload) VALUES (?1, ?2, ?3)",
            params![name, encoded, autoload as i64],
        )?;
        Ok(inserted > 0)
    }

    /// Creates or replaces an entry, including its autoload flag.
    pub fn set_option(&self, name: &str, value: &Value, autoload: bool) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.conn.execute(
            r#"
            INSERT INTO options (name, value, autoload)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET value = excluded.value, autoload = excluded.autoload
            "#,
            params![name, encoded, autoload as i64],
        )?;
        Ok(())
    }

    pub fn delete_option(&self, name: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM options WHERE name = ?1", params![name])?;
        Ok(deleted > 0)
    }

    pub fn autoloaded_option_names(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM options WHERE autoload = 1")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<std::result::Result<BTreeSet<_>, _>>()?)
    }

    /// The subset of `names` currently present in the store.
    pub fn existing_option_names(&self, names: &[String]) -> Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        for chunk in names.chunks(IN_CHUNK) {
            let sql = format!(
                "SELECT name FROM options WHERE name IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                row.get::<_, String>(0)
            })?;
            for row in rows {
                found.insert(row?);
            }
        }
        Ok(found)
    }

    /// Fetches only the requested entries; absent names are skipped.
    pub fn options_by_names(&self, names: &[String]) -> Result<Vec<OptionEntry>> {
        let mut entries = Vec::with_capacity(names.len());
        for chunk in names.chunks(IN_CHUNK) {
            let sql = format!(
                "SELECT name, value, autoload FROM options WHERE name IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), row_to_option)?;
            for row in rows {
                entries.push(row?);
            }
        }
        Ok(entries)
    }

    pub fn all_options(&self) -> Result<Vec<OptionEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, value, autoload FROM options ORDER BY name ASC")?;
        let rows = stmt.query_map([], row_to_option)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

}
