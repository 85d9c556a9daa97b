//! Core contracts and helpers for rowforge.
//!
//! This crate defines the column-specification types, the provider
//! capability trait, and the request-form parsing surface shared across the
//! dictionary, generation, and CLI crates.

pub mod error;
pub mod form;
pub mod provider;
pub mod spec;

pub use error::{Error, Result};
pub use form::parse_form;
pub use provider::Provider;
pub use spec::{ColumnSpec, Describe, ProviderFormats};
