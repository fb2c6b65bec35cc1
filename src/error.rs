//! Error types for validation and rendering

use thiserror::Error;

use crate::format::OutputFormat;

/// Where an undeclared node id was referenced from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Edge at this index in the diagram's edge list
    Edge(usize),
    /// Cluster with this name
    Cluster(String),
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Edge(index) => write!(f, "edge #{}", index),
            Reference::Cluster(name) => write!(f, "cluster '{}'", name),
        }
    }
}

/// A diagram that cannot be rendered as given
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("duplicate node id '{id}'")]
    DuplicateNode { id: String },

    #[error("duplicate cluster name '{name}'")]
    DuplicateCluster { name: String },

    #[error("cluster name '{name}' is also a node id, which {format} does not allow")]
    ClusterNameConflict { name: String, format: OutputFormat },

    #[error("{referenced_by} references undeclared node '{id}'{}", format_suggestions(.suggestions))]
    UndefinedNode {
        id: String,
        referenced_by: Reference,
        suggestions: Vec<String>,
    },

    #[error("'{id}' is not a valid {format} identifier: {reason}")]
    InvalidIdentifier {
        id: String,
        format: OutputFormat,
        reason: &'static str,
    },

    #[error("node '{id}' appears in both cluster '{first}' and cluster '{second}'")]
    NodeInMultipleClusters {
        id: String,
        first: String,
        second: String,
    },

    #[error("node '{node}' has invalid fill color '{color}'")]
    InvalidColor { node: String, color: String },
}

impl ValidationError {
    /// Create an undefined node error with suggestions
    pub fn undefined(id: impl Into<String>, referenced_by: Reference, suggestions: Vec<String>) -> Self {
        Self::UndefinedNode {
            id: id.into(),
            referenced_by,
            suggestions,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UndefinedNode { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// An output format name that is not recognised
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported output format '{requested}' (expected dot, mermaid or svg)")]
pub struct UnsupportedFormatError {
    pub requested: String,
}

/// Errors that can occur in the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid diagram: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error("unknown example diagram '{name}'")]
    UnknownExample { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_node_display() {
        let err = ValidationError::undefined("servr", Reference::Edge(2), vec!["server".to_string()]);
        let msg = err.to_string();
        assert!(msg.contains("edge #2"));
        assert!(msg.contains("servr"));
        assert!(msg.contains("did you mean server?"));
    }

    #[test]
    fn test_undefined_node_without_suggestions() {
        let err = ValidationError::undefined("x", Reference::Cluster("infra".to_string()), vec![]);
        assert_eq!(err.to_string(), "cluster 'infra' references undeclared node 'x'");
        assert_eq!(err.suggestions(), Some(&[][..]));
    }

    #[test]
    fn test_invalid_identifier_display() {
        let err = ValidationError::InvalidIdentifier {
            id: "end".to_string(),
            format: OutputFormat::FlowchartMarkup,
            reason: "reserved keyword",
        };
        assert_eq!(
            err.to_string(),
            "'end' is not a valid mermaid identifier: reserved keyword"
        );
    }

    #[test]
    fn test_cluster_name_conflict_display() {
        let err = ValidationError::ClusterNameConflict {
            name: "api".to_string(),
            format: OutputFormat::FlowchartMarkup,
        };
        assert_eq!(
            err.to_string(),
            "cluster name 'api' is also a node id, which mermaid does not allow"
        );
    }

    #[test]
    fn test_render_error_wraps_validation() {
        let err: RenderError = ValidationError::DuplicateNode { id: "a".to_string() }.into();
        assert!(matches!(err, RenderError::Validation(_)));
        assert!(err.to_string().contains("duplicate node id 'a'"));
    }
}
