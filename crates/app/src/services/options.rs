use optimizer_core::{OptionEntry, parse_autoload};
use optimizer_db::Db;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, missing_option, open_db, require_name};

#[derive(Clone)]
pub struct OptionsService {
    config: SharedConfig,
}

impl OptionsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn update_autoload(&self, name: &str, autoload: &str) -> Result<()> {
        let name = require_name(name)?;
        let autoload = parse_flag(autoload)?;
        let db = self.db()?;
        let entry = db.get_option(name)?.ok_or_else(|| missing_option(name))?;
        recreate_with_autoload(&db, entry, autoload)?;
        tracing::info!(option = name, autoload, "updated autoload");
        Ok(())
    }

    /// Applies one flag to many entries. Names that do not exist are skipped;
    /// failures are logged and do not stop the batch.
    pub fn set_autoload_many(&self, names: &[String], autoload: &str) -> Result<usize> {
        let autoload = parse_flag(autoload)?;
        let db = self.db()?;
        let mut updated = 0usize;
        for name in names {
            let Some(entry) = db.get_option(name)? else {
                continue;
            };
            match recreate_with_autoload(&db, entry, autoload) {
                Ok(()) => updated += 1,
                Err(err) => tracing::warn!(option = %name, error = %err, "autoload update failed"),
            }
        }
        tracing::info!(requested = names.len(), updated, autoload, "bulk autoload update");
        Ok(updated)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let name = require_name(name)?;
        let db = self.db()?;
        if !db.delete_option(name)? {
            return Err(missing_option(name));
        }
        tracing::info!(option = name, "deleted option");
        Ok(())
    }

    /// Deletes each name independently. Returns how many were removed.
    pub fn delete_many(&self, names: &[String]) -> Result<usize> {
        let db = self.db()?;
        let mut deleted = 0usize;
        for name in names {
            match db.delete_option(name) {
                Ok(true) => deleted += 1,
                Ok(false) => {}
                Err(err) => tracing::warn!(option = %name, error = %err, "delete failed"),
            }
        }
        tracing::info!(requested = names.len(), deleted, "bulk delete");
        Ok(deleted)
    }

    /// Creates a non-autoloaded `false` placeholder so future reads stop
    /// falling through to a default.
    pub fn create_false(&self, name: &str) -> Result<()> {
        let name = require_name(name)?;
        let db = self.db()?;
        let created = db
            .add_option(name, &Value::Bool(false), false)
            .map_err(|err| AppError::CreateFailed(format!("could not create {name}: {err}")))?;
        if !created {
            return Err(AppError::CreateFailed(format!(
                "could not create {name}: option already exists"
            )));
        }
        tracing::info!(option = name, "created placeholder option");
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    parse_autoload(raw).ok_or_else(|| AppError::InvalidAutoload(raw.to_string()))
}

/// The store cannot change the flag in place, so the entry is deleted and
/// added back with the same value.
fn recreate_with_autoload(db: &Db, entry: OptionEntry, autoload: bool) -> Result<()> {
    db.delete_option(&entry.name)?;
    let created = db
        .add_option(&entry.name, &entry.value, autoload)
        .map_err(|err| AppError::UpdateFailed(format!("update {} failed: {}", entry.name, err)))?;
    if !created {
        return Err(AppError::UpdateFailed(format!(
            "update {} failed",
            entry.name
        )));
    }
    Ok(())
}
