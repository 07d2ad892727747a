use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use core_types::{PublicFund, PublicQuote, ScraperCreateQuote};
use serde::Deserialize;
use std::sync::Arc;

/// Reserved value of the `:date` segment selecting the most recent quote.
pub const LATEST: &str = "latest";

#[derive(Debug, Deserialize)]
pub struct FundPath {
    pub isin: String,
}

impl FundPath {
    fn isin(&self) -> String {
        self.isin.to_uppercase()
    }
}

#[derive(Debug, Deserialize)]
pub struct QuotePath {
    pub isin: String,
    pub date: String,
}

/// # GET /funds
pub async fn get_funds(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PublicFund>>, AppError> {
    let funds = state.fund_service.get_funds().await?;
    Ok(Json(funds))
}

/// # GET /funds/:isin
pub async fn get_fund(
    Path(path): Path<FundPath>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PublicFund>, AppError> {
    let fund = state.fund_service.get_fund_by_isin(&path.isin()).await?;
    Ok(Json(fund))
}

/// # GET /funds/:isin/quotes
/// All quotes of the fund, newest first.
pub async fn get_quotes(
    Path(path): Path<FundPath>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PublicQuote>>, AppError> {
    let quotes = state.quote_service.get_quotes(&path.isin()).await?;
    Ok(Json(quotes))
}

/// # GET /funds/:isin/quotes/:date
/// `:date` is either `YYYY-MM-DD` or `latest`.
pub async fn get_quote(
    Path(path): Path<QuotePath>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PublicQuote>, AppError> {
    let isin = path.isin.to_uppercase();

    let quote = if path.date == LATEST {
        state.quote_service.get_latest_quote(&isin).await?
    } else {
        state.quote_service.get_quote(&isin, &path.date).await?
    };

    Ok(Json(quote))
}

/// # POST /funds/:isin/quotes
/// Scraper only, see `auth::require_scraper_key`.
pub async fn create_quote(
    Path(path): Path<FundPath>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScraperCreateQuote>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicQuote>), AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

    let quote = state.quote_service.create_quote(&path.isin(), input).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}
