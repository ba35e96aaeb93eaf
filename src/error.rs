/// Error types for the clipshelf service layer
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unique constraint violated: {0}")]
    UniqueConstraint(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Storage errors are never surfaced raw: duplicate-key signals become
/// `UniqueConstraint`, everything else is wrapped with its cause preserved.
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ServiceError::UniqueConstraint(db.message().to_string())
            }
            _ => ServiceError::Database(err.to_string()),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// True when the error maps to an absent entity rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}
