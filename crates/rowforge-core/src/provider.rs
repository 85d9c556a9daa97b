use async_trait::async_trait;

use crate::error::Result;
use crate::spec::Describe;

/// Trait implemented by database providers that expose schema introspection
/// and dialect-specific date formatting.
///
/// `describe` failure is non-fatal to generation: the engine can run from
/// caller-supplied column specifications alone.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the configured provider identifier.
    fn name(&self) -> &str;

    /// Layout string for date values in this dialect.
    fn date_format(&self) -> &str;

    /// Layout string for date-time values in this dialect.
    fn date_time_format(&self) -> &str;

    /// Retrieve column metadata for a table, in ordinal order.
    ///
    /// Returns [`crate::Error::NoResult`] when the table has no columns.
    async fn describe(&self, table: &str) -> Result<Vec<Describe>>;
}
