//! Tag-driven synthetic value generation for rowforge.
//!
//! Each column specification resolves to a generation strategy (dictionary
//! lookup, pattern synthesis, numeric, date/time, boolean, or a literal
//! column-name echo); the synthesizer executes the strategy against the
//! loaded dictionary and the column's constraints, and the [`Generator`]
//! facade assembles one SQL `INSERT` statement per call.

pub mod errors;
pub mod row;
pub mod strategy;
pub mod synth;

pub use errors::GenerationError;
pub use row::Generator;
pub use strategy::{BoolKind, DateKind, Strategy, resolve};
pub use synth::{Synthesizer, Value};
