use thiserror::Error;

use rowforge_dict::DictError;

/// Errors emitted by the generation engine.
///
/// Every variant names the offending column; nothing is retried internally.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A recognized tag maps to a category the dictionary does not carry.
    #[error("column '{column}': {source}")]
    Dictionary {
        column: String,
        #[source]
        source: DictError,
    },
    /// The supplied pattern cannot be compiled or satisfied.
    #[error("column '{column}': pattern '{pattern}' cannot be synthesized: {reason}")]
    Pattern {
        column: String,
        pattern: String,
        reason: String,
    },
    /// A requested length/precision combination cannot be honored.
    #[error("column '{column}': {reason}")]
    Constraint { column: String, reason: String },
}
