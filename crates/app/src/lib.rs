pub mod app;
pub mod error;
pub mod services;
pub mod startup;
pub mod tracker;
pub mod util;

pub use app::{AppConfig, AppState};
pub use error::{ApiError, AppError, Result};
pub use services::{AppServices, OptionsService, ReportsService, UsageService};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use tracker::{OptionAccessObserver, RequestScope, UsageTracker, read_option};
pub use util::time::starting_point_now;
