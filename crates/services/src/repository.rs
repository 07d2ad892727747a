use crate::error::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{Fund, Quote};

/// Data access operations on funds.
#[async_trait]
pub trait FundRepository: Send + Sync {
    /// Exact match on the ISIN. Fails with `RepositoryError::NotFound` when no fund matches.
    async fn find_by_isin(&self, isin: &str) -> Result<Fund, RepositoryError>;

    /// All funds ordered by name ascending. Empty when there are none.
    async fn find_all(&self) -> Result<Vec<Fund>, RepositoryError>;
}

/// Data access operations on quotes.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Exact match on fund and date. Fails with `RepositoryError::NotFound` when absent.
    async fn find_by_isin_and_date(&self, isin: &str, date: NaiveDate) -> Result<Quote, RepositoryError>;

    /// The most recent quote of the fund. Fails with `RepositoryError::NotFound`
    /// when the fund has no quotes.
    async fn find_latest(&self, isin: &str) -> Result<Quote, RepositoryError>;

    /// All quotes of the fund, newest first.
    async fn find_all(&self, isin: &str) -> Result<Vec<Quote>, RepositoryError>;

    /// Inserts the quote for the fund and returns the row as persisted.
    async fn create(&self, isin: &str, quote: Quote) -> Result<Quote, RepositoryError>;
}
