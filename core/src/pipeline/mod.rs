// conduit/src/pipeline/mod.rs

//! Defines the `Pipeline<T>` struct, its assembly, composition and execution logic.

pub mod compose;
pub mod definition;
pub mod execution;

// Re-export the main Pipeline struct
pub use compose::Composed;
pub use definition::{pipe, Pipeline};
