pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{parse_iso_date, Fund, PublicFund, PublicQuote, Quote, ScraperCreateQuote, ISO_DATE_FORMAT};
