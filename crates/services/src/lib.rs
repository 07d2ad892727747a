//! # Pensiondata Services
//!
//! The use-case layer sitting between the HTTP handlers and the persistence layer.
//!
//! ## Architectural Principles
//!
//! - **Storage agnostic:** the services only know the `FundRepository` and
//!   `QuoteRepository` contracts. The PostgreSQL implementations live in the
//!   `database` crate.
//! - **Classify, don't log:** every failure is returned as a `ServiceError`
//!   variant. Logging and status-code mapping belong to the HTTP boundary.
//! - **Stateless:** a service only holds shared references to its repositories,
//!   so a single instance serves all concurrent requests.
//!
//! ## Public API
//!
//! - `FundService`: lookup and listing of funds.
//! - `QuoteService`: lookup, listing and creation of daily quotes.
//! - `FundRepository` / `QuoteRepository`: the storage contracts.
//! - `ServiceError` / `RepositoryError`: the error taxonomy.

pub mod error;
pub mod fund;
pub mod quote;
pub mod repository;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{RepositoryError, ServiceError};
pub use fund::FundService;
pub use quote::QuoteService;
pub use repository::{FundRepository, QuoteRepository};
