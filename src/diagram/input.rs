//! Loading diagrams from TOML descriptions
//!
//! ```toml
//! title = "Basic Three-Tier Web Application"
//!
//! [[nodes]]
//! id = "database"
//! label = "Database"
//! fill = "#ffe1f5"
//! shape = "cylinder"
//!
//! [[edges]]
//! from = "webserver"
//! to = "database"
//!
//! [[clusters]]
//! name = "data"
//! label = "Data Layer"
//! nodes = ["database"]
//! ```

use thiserror::Error;

use super::model::Diagram;

/// Errors that can occur when loading a diagram description
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to parse diagram TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl Diagram {
    /// Load a diagram from a TOML string
    ///
    /// Only the shape of the document is checked here; references are
    /// checked by [`validate`](super::validate).
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        let diagram: Diagram = toml::from_str(content)?;
        log::debug!(
            "loaded diagram '{}' with {} nodes, {} edges",
            diagram.title,
            diagram.nodes.len(),
            diagram.edges.len()
        );
        Ok(diagram)
    }
}
