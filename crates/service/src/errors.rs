use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} must be specified")]
    MissingField(&'static str),
    #[error("name must be unique")]
    DuplicateName,
    #[error("malformatted id")]
    InvalidId,
    #[error("person not found")]
    NotFound,
    #[error("validation failed: {0}")]
    ValidationFailed(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Whether the caller caused the error (4xx) as opposed to the backend (5xx).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Internal(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::MissingField(f) => ServiceError::MissingField(f),
            ModelError::DuplicateName => ServiceError::DuplicateName,
            ModelError::Validation(msg) => ServiceError::ValidationFailed(msg),
            ModelError::Db(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ModelError::from(e).into()
    }
}
