use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the dictionary store.
///
/// [`DictError::CategoryNotFound`] is the only lookup-side failure and stays
/// a distinct variant so callers can report an unknown tag separately from
/// I/O or codec problems.
#[derive(Debug, Error)]
pub enum DictError {
    /// The requested category is absent from the loaded dictionary.
    #[error("category '{0}' not found in dictionary")]
    CategoryNotFound(String),
    /// A loaded or built category carries no samples.
    #[error("category '{0}' has no samples")]
    EmptyCategory(String),
    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unable to encode dictionary: {0}")]
    Encode(#[source] bincode::Error),
    #[error("unable to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: bincode::Error,
    },
    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias for dictionary results.
pub type DictResult<T> = std::result::Result<T, DictError>;
