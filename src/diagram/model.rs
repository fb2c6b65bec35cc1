//! Data model for architecture diagrams

use serde::Deserialize;

/// Visual shape of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Box,
    Cylinder,
    Ellipse,
    Circle,
    Diamond,
    Hexagon,
}

impl NodeShape {
    /// Graphviz shape keyword for this shape
    pub fn dot_name(self) -> &'static str {
        match self {
            NodeShape::Box => "box",
            NodeShape::Cylinder => "cylinder",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Circle => "circle",
            NodeShape::Diamond => "diamond",
            NodeShape::Hexagon => "hexagon",
        }
    }
}

/// A single architectural component
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    /// Raw identifier, emitted unquoted in DOT and Mermaid
    pub id: String,
    /// Display text, escaped per target grammar
    pub label: String,
    /// Fill color: hex (`#e1f5ff`), named (`lightblue`) or stylesheet token (`tier-api`)
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub shape: NodeShape,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fill: None,
            shape: NodeShape::Box,
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }
}

/// A directed relation between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A named visual grouping of nodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub label: String,
    /// Member node ids
    #[serde(default)]
    pub nodes: Vec<String>,
}

impl Cluster {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        nodes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            nodes: nodes.into_iter().map(Into::into).collect(),
        }
    }
}

/// A complete diagram description
///
/// Node, edge and cluster order is preserved and determines rendering order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Diagram {
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

impl Diagram {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_cluster(mut self, cluster: Cluster) -> Self {
        self.clusters.push(cluster);
        self
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
