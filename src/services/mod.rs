use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod favorites;
pub mod ingredients;
pub mod recipes;
pub mod shopping_cart;
pub mod subscriptions;
pub mod tags;
pub mod users;

/// Result type returned by every service operation.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced to the route layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller is not allowed to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// The targeted resource does not exist.
    #[error("not found")]
    NotFound,
    /// The write collides with an already existing record.
    #[error("already exists")]
    Conflict,
    /// A business rule or field validation rejected the payload.
    #[error("{0}")]
    Form(String),
    /// A document could not be rendered.
    #[error("failed to render document: {0}")]
    Document(String),
    /// Any other repository failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::UniqueViolation => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}
