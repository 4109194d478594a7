use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("db error: {0}")]
    Db(#[from] optimizer_db::DbError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidInput(String),
    #[error("invalid autoload value: {0}")]
    InvalidAutoload(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    UpdateFailed(String),
    #[error("{0}")]
    CreateFailed(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match err {
            AppError::InvalidInput(_) => (400, Some("invalid_input")),
            AppError::InvalidAutoload(_) => (400, Some("invalid_autoload_value")),
            AppError::NotFound(_) => (404, Some("option_not_found")),
            AppError::UpdateFailed(_) => (500, Some("update_failed")),
            AppError::CreateFailed(_) => (500, Some("create_failed")),
            AppError::Db(_) | AppError::Io(_) | AppError::Serde(_) | AppError::Message(_) => {
                (500, None)
            }
        };
        Self {
            status,
            message: err.to_string(),
            code: code.map(str::to_string),
        }
    }
}
