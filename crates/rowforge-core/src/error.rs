use thiserror::Error;

/// Core error type shared across rowforge crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A request form field was malformed or out of range.
    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
    /// A provider query returned no rows for the requested table.
    #[error("no result for table '{0}'")]
    NoResult(String),
    /// Database error or provider failure.
    #[error("database error: {0}")]
    Db(String),
    /// Provider configuration could not be loaded.
    #[error("unable to read config {path}: {reason}")]
    Config { path: String, reason: String },
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by rowforge crates.
pub type Result<T> = std::result::Result<T, Error>;
