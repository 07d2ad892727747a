use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The date format used on the wire for every date field (`YYYY-MM-DD`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|source| CoreError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// A fund as stored in the database. Funds are reference data and are never
/// mutated by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fund {
    /// The ISIN code, unique and uppercase.
    pub isin: String,
    pub name: String,
    /// Name of the issuing bank.
    pub bank: String,
    pub launch_date: NaiveDate,
    /// 3-letter ISO currency code.
    pub currency: String,
}

/// A single daily price observation for a fund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub date: NaiveDate,
    pub price: Decimal,
}

/// The representation of a `Fund` returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicFund {
    pub isin: String,
    pub name: String,
    pub bank: String,
    pub launch_date: String,
    pub currency: String,
}

impl From<&Fund> for PublicFund {
    fn from(fund: &Fund) -> Self {
        Self {
            isin: fund.isin.clone(),
            name: fund.name.clone(),
            bank: fund.bank.clone(),
            launch_date: fund.launch_date.format(ISO_DATE_FORMAT).to_string(),
            currency: fund.currency.clone(),
        }
    }
}

/// The representation of a `Quote` returned by the API.
///
/// The price is rendered as a float for display purposes only; it must not be
/// fed back into the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuote {
    pub date: String,
    pub price: f64,
}

impl TryFrom<&Quote> for PublicQuote {
    type Error = CoreError;

    fn try_from(quote: &Quote) -> Result<Self, Self::Error> {
        let price = quote
            .price
            .to_f64()
            .ok_or(CoreError::PriceConversion(quote.price))?;

        Ok(Self {
            date: quote.date.format(ISO_DATE_FORMAT).to_string(),
            price,
        })
    }
}

/// The payload sent by the scraper to create a new quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperCreateQuote {
    /// Quote date as `YYYY-MM-DD`. Parsed by the quote service.
    pub date: String,
    pub price: Decimal,
}

impl ScraperCreateQuote {
    /// Builds the internal `Quote` once the date has been validated.
    pub fn to_quote(&self) -> Result<Quote, CoreError> {
        Ok(Quote {
            date: parse_iso_date(&self.date)?,
            price: self.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fund() -> Fund {
        Fund {
            isin: "BE0026480963".to_string(),
            name: "Pension Fund Growth".to_string(),
            bank: "KBC".to_string(),
            launch_date: NaiveDate::from_ymd_opt(1987, 3, 2).unwrap(),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn public_fund_formats_launch_date_and_copies_fields() {
        let public = PublicFund::from(&fund());

        assert_eq!(public.isin, "BE0026480963");
        assert_eq!(public.name, "Pension Fund Growth");
        assert_eq!(public.bank, "KBC");
        assert_eq!(public.launch_date, "1987-03-02");
        assert_eq!(public.currency, "EUR");
    }

    #[test]
    fn public_fund_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(PublicFund::from(&fund())).unwrap();

        assert_eq!(json["launch_date"], "1987-03-02");
        assert_eq!(json["isin"], "BE0026480963");
    }

    #[test]
    fn public_quote_converts_decimal_price() {
        let quote = Quote {
            date: NaiveDate::from_ymd_opt(2020, 6, 30).unwrap(),
            price: dec!(7.99),
        };

        let public = PublicQuote::try_from(&quote).unwrap();

        assert_eq!(public.date, "2020-06-30");
        assert!((public.price - 7.99).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_iso_date_rejects_other_formats() {
        assert!(parse_iso_date("2020-06-30").is_ok());
        assert!(matches!(parse_iso_date("30/06/2020"), Err(CoreError::InvalidDate { .. })));
        assert!(matches!(parse_iso_date("not-a-date"), Err(CoreError::InvalidDate { .. })));
        assert!(parse_iso_date("2020-02-30").is_err());
    }

    #[test]
    fn scraper_payload_deserializes_numeric_price() {
        let payload: ScraperCreateQuote =
            serde_json::from_str(r#"{"date": "2020-06-30", "price": 7.99}"#).unwrap();

        let quote = payload.to_quote().unwrap();
        assert_eq!(quote.date, NaiveDate::from_ymd_opt(2020, 6, 30).unwrap());
        assert_eq!(quote.price, dec!(7.99));
    }
}
