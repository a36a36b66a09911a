use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact replace error: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
