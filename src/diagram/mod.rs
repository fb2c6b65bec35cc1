//! Diagram model, TOML input and validation

pub mod input;
pub mod model;
pub mod validate;

pub use input::LoadError;
pub use model::*;
pub use validate::{validate, ValidDiagram};
