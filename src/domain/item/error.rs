use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ItemServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("item not found")]
    NotFound,
}

impl From<AppError> for ItemServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => ItemServiceError::NotFound,
            _ => ItemServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ItemServiceError> for AppError {
    fn from(err: ItemServiceError) -> Self {
        match err {
            ItemServiceError::NotFound => AppError::NotFound("Item not found".to_string()),
            ItemServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
