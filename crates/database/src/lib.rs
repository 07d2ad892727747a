//! # Pensiondata Database Crate
//!
//! This crate is the PostgreSQL adapter of the service layer. It implements
//! the `FundRepository` and `QuoteRepository` contracts from the `services`
//! crate on top of an `sqlx` connection pool.
//!
//! ## Architectural Principles
//!
//! - **Adapter only:** all SQL lives here. The rest of the application only
//!   sees the repository traits.
//! - **Parameterized queries:** every value is bound, never interpolated.
//! - **Asynchronous & Pooled:** all operations are asynchronous and share a
//!   `PgPool`, opened once at start-up and closed at shutdown.
//!
//! ## Public API
//!
//! - `connect`: establishes the database connection pool.
//! - `PgFundRepository` / `PgQuoteRepository`: the repository implementations.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, PoolSettings};
pub use error::DbError;
pub use repository::{PgFundRepository, PgQuoteRepository};
