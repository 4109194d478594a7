mod options;
mod reports;
mod usage;

use std::sync::Arc;

use optimizer_core::SourceMap;
use optimizer_db::Db;

use crate::app::AppConfig;
use crate::error::{AppError, Result};

pub use options::OptionsService;
pub use reports::ReportsService;
pub use usage::UsageService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub reports: ReportsService,
    pub options: OptionsService,
    pub usage: UsageService,
}

impl AppServices {
    pub fn new(config: &AppConfig, sources: Arc<SourceMap>) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            reports: ReportsService::new(shared.clone(), sources),
            options: OptionsService::new(shared.clone()),
            usage: UsageService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}

fn missing_option(name: &str) -> AppError {
    AppError::NotFound(format!("option {name} not found"))
}

fn require_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("option_name is required".to_string()));
    }
    Ok(trimmed)
}
