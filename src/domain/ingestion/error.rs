use super::FetchError;
use crate::domain::parser::ParseError;
use crate::error::AppError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum IngestError {
    #[error("feed not found")]
    NotFound,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<AppError> for IngestError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => IngestError::NotFound,
            _ => IngestError::Storage(err.to_string()),
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::NotFound => AppError::NotFound("Feed not found".to_string()),
            IngestError::Fetch(_) | IngestError::Parse(_) => {
                AppError::ExternalService(err.to_string())
            }
            IngestError::Storage(msg) => AppError::Internal(msg),
        }
    }
}
