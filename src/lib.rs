//! arch-diagrams - Render architecture diagrams as text
//!
//! This library turns an abstract description of an architecture (nodes,
//! directed edges and optional clusters) into Graphviz DOT, Mermaid flowchart
//! markup or a standalone SVG document.
//!
//! # Example
//!
//! ```rust
//! use arch_diagrams::{render, Diagram, Edge, Node, NodeShape, OutputFormat};
//!
//! let diagram = Diagram::new("Custom Web Application")
//!     .with_node(Node::new("A", "Frontend"))
//!     .with_node(Node::new("B", "Backend"))
//!     .with_node(Node::new("C", "Database").with_shape(NodeShape::Cylinder))
//!     .with_edge(Edge::new("A", "B"))
//!     .with_edge(Edge::new("B", "C"));
//!
//! let mermaid = render(&diagram, OutputFormat::FlowchartMarkup).unwrap();
//! assert!(mermaid.contains("A --> B"));
//! ```

pub mod diagram;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod rasterize;
pub mod renderer;
pub mod stylesheet;
pub mod verify;

pub use diagram::{validate, Cluster, Diagram, Edge, LoadError, Node, NodeShape, ValidDiagram};
pub use error::{RenderError, UnsupportedFormatError, ValidationError};
pub use fixtures::ExampleDiagram;
pub use format::OutputFormat;
pub use rasterize::{rasterize, try_rasterize, RasterFormat, RasterizeError};
pub use renderer::{renderer_for, Direction, DotConfig, MermaidConfig, SvgConfig, TargetRenderer};
pub use stylesheet::Stylesheet;

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// DOT output configuration
    pub dot: DotConfig,
    /// Mermaid output configuration
    pub mermaid: MermaidConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DOT configuration
    pub fn with_dot(mut self, config: DotConfig) -> Self {
        self.dot = config;
        self
    }

    /// Set the Mermaid configuration
    pub fn with_mermaid(mut self, config: MermaidConfig) -> Self {
        self.mermaid = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

/// Render a diagram in the given format with default configuration
///
/// The diagram is validated against the target grammar first; nothing is
/// emitted for an invalid diagram.
///
/// # Example
///
/// ```rust
/// use arch_diagrams::{render, Diagram, Edge, Node, OutputFormat, RenderError};
///
/// let diagram = Diagram::new("Broken")
///     .with_node(Node::new("web", "Web"))
///     .with_edge(Edge::new("web", "db"));
///
/// let err = render(&diagram, OutputFormat::GraphDescription).unwrap_err();
/// assert!(matches!(err, RenderError::Validation(_)));
/// ```
pub fn render(diagram: &Diagram, format: OutputFormat) -> Result<String, RenderError> {
    render_with_config(diagram, format, &RenderConfig::default())
}

/// Render a diagram in the given format with custom configuration
///
/// # Example
///
/// ```rust
/// use arch_diagrams::{render_with_config, Diagram, MermaidConfig, Node, OutputFormat, RenderConfig};
///
/// let config = RenderConfig::new().with_mermaid(MermaidConfig::new().with_fenced(false));
/// let diagram = Diagram::new("t").with_node(Node::new("a", "A"));
///
/// let out = render_with_config(&diagram, OutputFormat::FlowchartMarkup, &config).unwrap();
/// assert!(out.starts_with("flowchart TB"));
/// ```
pub fn render_with_config(
    diagram: &Diagram,
    format: OutputFormat,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    log::debug!(
        format = format.name(),
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len();
        "Rendering diagram"
    );

    let valid = validate(diagram, format)?;
    let output = renderer_for(format).render(&valid, config);

    log::debug!(format = format.name(), bytes = output.len(); "Diagram rendered");
    Ok(output)
}

/// Render one of the bundled example diagrams
///
/// Accepts names such as `"simple"`, `"three-tier"`, `"microservices"` or
/// `"ecommerce"`, ignoring case and separators.
pub fn render_default_example(name: &str, format: OutputFormat) -> Result<String, RenderError> {
    let example: ExampleDiagram = name.parse()?;
    render(&example.diagram(), format)
}
