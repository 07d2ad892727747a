use core_types::CoreError;
use thiserror::Error;

/// Errors returned by the repository contracts.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("The requested record was not found.")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps any storage-specific failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}

/// The error taxonomy of the service layer.
///
/// `FundNotFound`, `QuoteNotFound` and `Validation` are client errors. The
/// remaining variants are internal failures that callers should not expose.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("The fund {0} was not found")]
    FundNotFound(String),

    #[error("The quote for fund {isin} on {date} was not found")]
    QuoteNotFound { isin: String, date: String },

    #[error("Validation error: {0}")]
    Validation(#[source] CoreError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Mapping error: {0}")]
    Mapping(#[source] CoreError),
}

impl ServiceError {
    /// Returns `true` for the failures caused by the server rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Repository(_) | ServiceError::Mapping(_))
    }
}
