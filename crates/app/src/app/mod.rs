use std::path::PathBuf;
use std::sync::Arc;

use optimizer_core::SourceMap;
use optimizer_db::Db;

use crate::error::{AppError, Result};
use crate::services::AppServices;
use crate::tracker::RequestScope;

/// Paths and files needed to run the optimizer.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Replaces the built-in source attribution table when set.
    pub known_plugins_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            known_plugins_path: None,
        }
    }
}

/// Application state shared by the HTTP layer and the CLI.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let sources = load_sources(&config)?;
        let services = AppServices::new(&config, sources);
        Ok(Self { config, services })
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }

    /// Starts tracking option reads for one request.
    pub fn begin_request(&self) -> Result<RequestScope> {
        RequestScope::begin(self.open_db()?)
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}

fn load_sources(config: &AppConfig) -> Result<Arc<SourceMap>> {
    let Some(path) = config.known_plugins_path.as_ref() else {
        return Ok(Arc::new(SourceMap::builtin().clone()));
    };
    let map = SourceMap::from_path(path).map_err(|err| {
        AppError::Message(format!("load known plugins {}: {}", path.display(), err))
    })?;
    tracing::info!(path = %path.display(), prefixes = map.len(), "loaded source attribution table");
    Ok(Arc::new(map))
}
