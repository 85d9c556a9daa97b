//! Database providers for rowforge.
//!
//! A provider supplies live column metadata for a table and the date and
//! date-time layout strings of its dialect. Each database product gets its
//! own module behind the shared [`rowforge_core::Provider`] trait; only
//! PostgreSQL is implemented here.

pub mod config;
pub mod postgres;

pub use config::ProviderConfig;
pub use postgres::PostgresProvider;
