use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result type returned by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,
    /// A unique constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,
    /// A check constraint rejected the write.
    #[error("check constraint violated")]
    CheckViolation,
    /// A referenced record does not exist.
    #[error("foreign key constraint violated")]
    ForeignKeyViolation,
    /// The connection pool failed to hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(DieselError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                RepositoryError::UniqueViolation
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
                RepositoryError::CheckViolation
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                RepositoryError::ForeignKeyViolation
            }
            other => RepositoryError::Database(other),
        }
    }
}
