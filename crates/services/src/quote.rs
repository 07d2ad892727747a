use crate::error::{RepositoryError, ServiceError};
use crate::repository::{FundRepository, QuoteRepository};
use core_types::{parse_iso_date, PublicQuote, Quote, ScraperCreateQuote};
use std::sync::Arc;

/// Use cases for the daily quotes of a fund.
///
/// Every operation targeting a fund checks that the fund exists first, so an
/// unknown ISIN is reported as `FundNotFound` rather than as a missing quote.
/// `get_latest_quote` is the exception: it goes straight to the quote
/// repository and reports an unknown fund as `QuoteNotFound`.
#[derive(Clone)]
pub struct QuoteService {
    fund_repo: Arc<dyn FundRepository>,
    quote_repo: Arc<dyn QuoteRepository>,
}

impl QuoteService {
    pub fn new(fund_repo: Arc<dyn FundRepository>, quote_repo: Arc<dyn QuoteRepository>) -> Self {
        Self { fund_repo, quote_repo }
    }

    /// Returns the quote of the fund on the given `YYYY-MM-DD` date.
    pub async fn get_quote(&self, isin: &str, date: &str) -> Result<PublicQuote, ServiceError> {
        self.ensure_fund_exists(isin).await?;

        let day = parse_iso_date(date).map_err(ServiceError::Validation)?;
        let quote = self
            .quote_repo
            .find_by_isin_and_date(isin, day)
            .await
            .map_err(|e| quote_not_found(e, isin, date))?;

        to_public(&quote)
    }

    /// Returns the most recent quote of the fund.
    pub async fn get_latest_quote(&self, isin: &str) -> Result<PublicQuote, ServiceError> {
        let quote = self
            .quote_repo
            .find_latest(isin)
            .await
            .map_err(|e| quote_not_found(e, isin, "latest"))?;

        to_public(&quote)
    }

    /// Returns all quotes of the fund, newest first.
    pub async fn get_quotes(&self, isin: &str) -> Result<Vec<PublicQuote>, ServiceError> {
        self.ensure_fund_exists(isin).await?;

        let quotes = self.quote_repo.find_all(isin).await?;
        quotes.iter().map(to_public).collect()
    }

    /// Creates a quote for the fund from the scraper payload.
    ///
    /// A malformed date is rejected before anything else is looked up.
    pub async fn create_quote(&self, isin: &str, input: ScraperCreateQuote) -> Result<PublicQuote, ServiceError> {
        let quote = input.to_quote().map_err(ServiceError::Validation)?;

        self.ensure_fund_exists(isin).await?;

        let created = self.quote_repo.create(isin, quote).await?;
        to_public(&created)
    }

    async fn ensure_fund_exists(&self, isin: &str) -> Result<(), ServiceError> {
        match self.fund_repo.find_by_isin(isin).await {
            Ok(_) => Ok(()),
            Err(RepositoryError::NotFound) => Err(ServiceError::FundNotFound(isin.to_string())),
            Err(other) => Err(ServiceError::Repository(other)),
        }
    }
}

fn quote_not_found(err: RepositoryError, isin: &str, date: &str) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::QuoteNotFound {
            isin: isin.to_string(),
            date: date.to_string(),
        },
        other => ServiceError::Repository(other),
    }
}

fn to_public(quote: &Quote) -> Result<PublicQuote, ServiceError> {
    PublicQuote::try_from(quote).map_err(ServiceError::Mapping)
}
