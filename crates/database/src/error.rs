use services::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

impl DbError {
    /// Maps `RowNotFound` to `NotFound` so callers can classify it.
    pub(crate) fn from_fetch_one(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            other => DbError::QueryError(other),
        }
    }
}

impl From<DbError> for RepositoryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => RepositoryError::NotFound,
            other => RepositoryError::storage(other),
        }
    }
}
