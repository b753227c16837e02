use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] kairos_db::error::DbError),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),

    #[error(transparent)]
    CoreError(#[from] kairos_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
