//! Sample-value dictionary for rowforge.
//!
//! The dictionary is built offline from a human-editable JSON interchange
//! document, stored as a compact binary artifact for fast startup, and held
//! read-only for the process lifetime. Loading the artifact reproduces the
//! exact category-to-samples content of the source document.

pub mod category;
pub mod error;
pub mod store;

pub use category::Category;
pub use error::{DictError, DictResult};
pub use store::{Dictionary, build};
