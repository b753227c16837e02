use salvo::http::StatusCode;
use thiserror::Error;

use kairos_core::error::CoreError;
use kairos_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// ## Summary
    /// Maps the error onto the HTTP status reported to clients.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::ServiceError(ServiceError::ValidationError(_))
            | Self::CoreError(CoreError::ValidationError(_) | CoreError::ParseError(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ## Summary
    /// Message safe to show to clients for a 4xx error.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::ServiceError(ServiceError::ValidationError(msg))
            | Self::CoreError(CoreError::ValidationError(msg) | CoreError::ParseError(msg)) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
