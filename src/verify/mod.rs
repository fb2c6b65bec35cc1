//! Reading generated documents back into a graph summary
//!
//! Each reader understands the subset of its grammar that the renderers emit
//! and recovers the declared nodes, clusters and edges. Comparing the result
//! with [`GraphSummary::of`] checks that a document says what the diagram said.

mod dot;
mod flowchart;
pub mod lexer;
mod svg;

use std::collections::BTreeSet;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::diagram::Diagram;
use crate::format::OutputFormat;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that can occur while reading a generated document
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("syntax error at {span:?}: {message}")]
    Syntax { span: Span, message: String },

    #[error("invalid DOT: {0}")]
    Dot(String),

    #[error("invalid SVG: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("reading {0} requires the `graphviz` feature")]
    FeatureDisabled(OutputFormat),
}

impl VerifyError {
    pub(crate) fn syntax(span: Span, message: impl Into<String>) -> Self {
        VerifyError::Syntax {
            span,
            message: message.into(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let VerifyError::Syntax { span, message } = self else {
            return self.to_string();
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(message)
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// The graph a document describes, independent of its syntax
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSummary {
    /// Declared or referenced node ids
    pub nodes: BTreeSet<String>,
    /// Cluster names
    pub clusters: BTreeSet<String>,
    /// Edges in document order
    pub edges: Vec<(String, String)>,
}

impl GraphSummary {
    /// Summary of what a diagram should render to
    pub fn of(diagram: &Diagram) -> Self {
        Self {
            nodes: diagram.nodes.iter().map(|n| n.id.clone()).collect(),
            clusters: diagram.clusters.iter().map(|c| c.name.clone()).collect(),
            edges: diagram
                .edges
                .iter()
                .map(|e| (e.from.clone(), e.to.clone()))
                .collect(),
        }
    }

    pub(crate) fn add_edge(&mut self, from: String, to: String) {
        self.nodes.insert(from.clone());
        self.nodes.insert(to.clone());
        self.edges.push((from, to));
    }
}

/// Read a generated document back into a [`GraphSummary`]
pub fn summarize(text: &str, format: OutputFormat) -> Result<GraphSummary, VerifyError> {
    let summary = match format {
        OutputFormat::GraphDescription => dot::summarize(text)?,
        OutputFormat::FlowchartMarkup => flowchart::summarize(text)?,
        OutputFormat::VectorMarkup => svg::summarize(text)?,
    };
    log::debug!(
        format = format.name(),
        nodes = summary.nodes.len(),
        edges = summary.edges.len();
        "Summarized document"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{Cluster, Edge, Node};

    #[test]
    fn test_summary_of_diagram() {
        let diagram = Diagram::new("t")
            .with_node(Node::new("b", "B"))
            .with_node(Node::new("a", "A"))
            .with_edge(Edge::new("b", "a"))
            .with_cluster(Cluster::new("group", "Group", ["a"]));

        let summary = GraphSummary::of(&diagram);
        assert_eq!(summary.nodes.iter().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(summary.edges, [("b".to_string(), "a".to_string())]);
        assert!(summary.clusters.contains("group"));
    }

    #[test]
    fn test_format_syntax_error_with_source() {
        let source = "flowchart TB\n    A --> ???";
        let err = VerifyError::syntax(22..25, "expected node id");
        let report = err.format(source, "diagram.mmd");
        assert!(report.contains("expected node id"));
        assert!(report.contains("diagram.mmd"));
    }

    #[test]
    fn test_format_other_errors_fall_back_to_display() {
        let err = VerifyError::Dot("bad".to_string());
        assert_eq!(err.format("", "x.dot"), "invalid DOT: bad");
    }
}
