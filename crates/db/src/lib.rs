mod error;
mod helpers;
mod migrations;
mod options;
mod usage_record;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};

/// Handle to the option store.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "busy_timeout", 5_000)?;
        Ok(Self { conn })
    }
}
