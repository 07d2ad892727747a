//! In-memory repositories used by the test suites of this crate and of the
//! web server. They honour the same ordering guarantees as the SQL ones.

use crate::error::RepositoryError;
use crate::repository::{FundRepository, QuoteRepository};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{Fund, Quote};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

fn unavailable() -> RepositoryError {
    RepositoryError::storage(std::io::Error::other("storage unavailable"))
}

#[derive(Debug, Default)]
pub struct InMemoryFundRepository {
    funds: RwLock<Vec<Fund>>,
    unavailable: AtomicBool,
}

impl InMemoryFundRepository {
    pub fn new(funds: Vec<Fund>) -> Self {
        Self {
            funds: RwLock::new(funds),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl FundRepository for InMemoryFundRepository {
    async fn find_by_isin(&self, isin: &str) -> Result<Fund, RepositoryError> {
        self.check()?;
        self.funds
            .read()
            .await
            .iter()
            .find(|fund| fund.isin == isin)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Fund>, RepositoryError> {
        self.check()?;
        let mut funds = self.funds.read().await.clone();
        funds.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(funds)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryQuoteRepository {
    quotes: RwLock<HashMap<String, Vec<Quote>>>,
    unavailable: AtomicBool,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds quotes for a fund without going through `create`.
    pub async fn insert(&self, isin: &str, quote: Quote) {
        self.quotes.write().await.entry(isin.to_string()).or_default().push(quote);
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn find_by_isin_and_date(&self, isin: &str, date: NaiveDate) -> Result<Quote, RepositoryError> {
        self.check()?;
        self.quotes
            .read()
            .await
            .get(isin)
            .and_then(|quotes| quotes.iter().find(|quote| quote.date == date))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_latest(&self, isin: &str) -> Result<Quote, RepositoryError> {
        self.check()?;
        self.quotes
            .read()
            .await
            .get(isin)
            .and_then(|quotes| quotes.iter().max_by_key(|quote| quote.date))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_all(&self, isin: &str) -> Result<Vec<Quote>, RepositoryError> {
        self.check()?;
        let mut quotes = self.quotes.read().await.get(isin).cloned().unwrap_or_default();
        quotes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(quotes)
    }

    async fn create(&self, isin: &str, quote: Quote) -> Result<Quote, RepositoryError> {
        self.check()?;
        {
            let mut all = self.quotes.write().await;
            let quotes = all.entry(isin.to_string()).or_default();
            if quotes.iter().any(|existing| existing.date == quote.date) {
                return Err(RepositoryError::storage(std::io::Error::other(
                    "duplicate key value violates unique constraint",
                )));
            }
            quotes.push(quote.clone());
        }
        self.find_by_isin_and_date(isin, quote.date).await
    }
}
