use crate::domain_model::ValidationError;
use crate::domain_port::RepoError;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    // detail is kept for Debug output only
    #[error("internal error")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(message.into())
    }

    pub fn internal<E: std::fmt::Display>(error: E) -> Self {
        error!("Internal error: {}", error);
        ServiceError::Internal(error.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, ServiceError::BadRequest(_))
    }
}

impl From<RepoError> for ServiceError {
    fn from(error: RepoError) -> Self {
        match error {
            e @ RepoError::NotFound { .. } => ServiceError::NotFound(e.to_string()),
            RepoError::Store(e) => ServiceError::internal(e),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::BadRequest(error.0)
    }
}
