use crate::DbError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{Fund, Quote};
use rust_decimal::Decimal;
use services::{FundRepository, QuoteRepository, RepositoryError};
use sqlx::postgres::PgPool;
use sqlx::FromRow;

// This struct represents a row fetched from the funds table.
#[derive(FromRow, Debug, Clone)]
pub struct DbFund {
    pub isin: String,
    pub name: String,
    pub bank: String,
    pub launch_date: NaiveDate,
    pub currency: String,
}

impl From<DbFund> for Fund {
    fn from(row: DbFund) -> Self {
        Fund {
            isin: row.isin,
            name: row.name,
            bank: row.bank,
            launch_date: row.launch_date,
            currency: row.currency,
        }
    }
}

// This struct represents a row fetched from the quotes table.
#[derive(FromRow, Debug, Clone)]
pub struct DbQuote {
    pub date: NaiveDate,
    pub price: Decimal,
}

impl From<DbQuote> for Quote {
    fn from(row: DbQuote) -> Self {
        Quote {
            date: row.date,
            price: row.price,
        }
    }
}

/// PostgreSQL implementation of `FundRepository`.
#[derive(Debug, Clone)]
pub struct PgFundRepository {
    pool: PgPool,
}

impl PgFundRepository {
    /// Creates a new `PgFundRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_isin(&self, isin: &str) -> Result<Fund, DbError> {
        let row = sqlx::query_as::<_, DbFund>(
            "SELECT isin, name, bank, launch_date, currency FROM funds WHERE isin = $1",
        )
        .bind(isin)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_fetch_one)?;
        Ok(row.into())
    }

    async fn fetch_all(&self) -> Result<Vec<Fund>, DbError> {
        let rows = sqlx::query_as::<_, DbFund>(
            "SELECT isin, name, bank, launch_date, currency FROM funds ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Fund::from).collect())
    }
}

#[async_trait]
impl FundRepository for PgFundRepository {
    async fn find_by_isin(&self, isin: &str) -> Result<Fund, RepositoryError> {
        Ok(self.fetch_by_isin(isin).await?)
    }

    async fn find_all(&self) -> Result<Vec<Fund>, RepositoryError> {
        Ok(self.fetch_all().await?)
    }
}

/// PostgreSQL implementation of `QuoteRepository`.
#[derive(Debug, Clone)]
pub struct PgQuoteRepository {
    pool: PgPool,
}

impl PgQuoteRepository {
    /// Creates a new `PgQuoteRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_isin_and_date(&self, isin: &str, date: NaiveDate) -> Result<Quote, DbError> {
        let row = sqlx::query_as::<_, DbQuote>(
            "SELECT date, price FROM quotes WHERE fund_isin = $1 AND date = $2",
        )
        .bind(isin)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_fetch_one)?;
        Ok(row.into())
    }

    async fn fetch_latest(&self, isin: &str) -> Result<Quote, DbError> {
        let row = sqlx::query_as::<_, DbQuote>(
            "SELECT date, price FROM quotes WHERE fund_isin = $1 ORDER BY date DESC LIMIT 1",
        )
        .bind(isin)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_fetch_one)?;
        Ok(row.into())
    }

    async fn fetch_all(&self, isin: &str) -> Result<Vec<Quote>, DbError> {
        let rows = sqlx::query_as::<_, DbQuote>(
            "SELECT date, price FROM quotes WHERE fund_isin = $1 ORDER BY date DESC",
        )
        .bind(isin)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Quote::from).collect())
    }

    /// Inserts a quote, then reads it back so the caller gets the value as the
    /// database stored it (e.g. the NUMERIC scale of the price column).
    async fn insert(&self, isin: &str, quote: &Quote) -> Result<Quote, DbError> {
        sqlx::query("INSERT INTO quotes (price, date, fund_isin) VALUES ($1, $2, $3)")
            .bind(quote.price)
            .bind(quote.date)
            .bind(isin)
            .execute(&self.pool)
            .await?;

        self.fetch_by_isin_and_date(isin, quote.date).await
    }
}

#[async_trait]
impl QuoteRepository for PgQuoteRepository {
    async fn find_by_isin_and_date(&self, isin: &str, date: NaiveDate) -> Result<Quote, RepositoryError> {
        Ok(self.fetch_by_isin_and_date(isin, date).await?)
    }

    async fn find_latest(&self, isin: &str) -> Result<Quote, RepositoryError> {
        Ok(self.fetch_latest(isin).await?)
    }

    async fn find_all(&self, isin: &str) -> Result<Vec<Quote>, RepositoryError> {
        Ok(self.fetch_all(isin).await?)
    }

    async fn create(&self, isin: &str, quote: Quote) -> Result<Quote, RepositoryError> {
        Ok(self.insert(isin, &quote).await?)
    }
}
