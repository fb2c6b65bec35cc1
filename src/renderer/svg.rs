//! SVG generation

use std::collections::BTreeMap;

use crate::diagram::{NodeShape, ValidDiagram};
use crate::format::OutputFormat;
use crate::stylesheet::Stylesheet;
use crate::RenderConfig;

use super::escape::escape_xml;
use super::layout::{self, BoundingBox, ClusterLayout, EdgeLayout, NodeLayout, Point};
use super::config::sanitize_class_prefix;
use super::{SvgConfig, TargetRenderer};

/// Color tokens the class rules below refer to
const CSS_TOKENS: &[&str] = &[
    "background-1",
    "background-2",
    "foreground-1",
    "foreground-3",
    "text-1",
    "text-2",
];

/// Renders diagrams as standalone SVG documents
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl TargetRenderer for SvgRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::VectorMarkup
    }

    fn render(&self, diagram: &ValidDiagram<'_>, config: &RenderConfig) -> String {
        render_svg(diagram, &config.svg, &config.stylesheet)
    }
}

/// Text anchoring for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    title: String,
    defs: Vec<String>,
    styles: Vec<String>,
    elements: Vec<String>,
    connections: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig, title: &str) -> Self {
        Self {
            config,
            title: title.to_string(),
            defs: vec![],
            styles: vec![],
            elements: vec![],
            connections: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet, plus the class rules
    /// that reference them
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut vars: BTreeMap<&str, String> = stylesheet
            .colors
            .iter()
            .map(|(token, value)| (token.as_str(), value.clone()))
            .collect();
        for token in CSS_TOKENS {
            if let Some(color) = stylesheet.lookup(token) {
                vars.entry(*token).or_insert_with(|| color.to_string());
            }
        }

        let mut css = String::from(":root {");
        for (token, value) in &vars {
            css.push_str(&format!(" --{}: {};", escape_xml(token), escape_xml(value)));
        }
        css.push_str(" }");
        self.styles.push(css);

        let p = self.prefix();
        let font = format!("font-family: Arial, sans-serif; font-size: {}px", self.config.font_size);
        self.styles.extend([
            format!(".{p}shape {{ fill: var(--background-1); stroke: var(--foreground-1); stroke-width: 2; }}"),
            format!(".{p}label {{ {font}; fill: var(--text-1); }}"),
            format!(".{p}title {{ font-family: Arial, sans-serif; font-size: 18px; font-weight: bold; fill: var(--text-1); }}"),
            format!(".{p}edge {{ stroke: var(--foreground-1); stroke-width: 2; fill: none; }}"),
            format!(".{p}edge-label {{ {font}; fill: var(--text-2); }}"),
            format!(".{p}cluster-box {{ fill: var(--background-2); stroke: var(--foreground-3); stroke-dasharray: 4 2; }}"),
            format!(".{p}cluster-label {{ font-family: Arial, sans-serif; font-size: 12px; fill: var(--text-2); }}"),
        ]);
    }

    fn prefix(&self) -> String {
        self.config
            .class_prefix
            .as_deref()
            .map(sanitize_class_prefix)
            .unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the arrow marker definition for edges
    pub fn add_arrow_marker(&mut self) {
        let prefix = self.prefix();
        // orient="auto" turns the marker to follow the final segment; the
        // arrowhead inherits the edge's stroke color
        self.defs.push(format!(
            r#"<marker id="{prefix}arrow" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto">
      <path d="M0,0 L10,5 L0,10 Z" fill="context-stroke"/>
    </marker>"#
        ));
    }

    fn shape_classes(&self, kind: &str) -> String {
        let prefix = self.prefix();
        format!("{prefix}shape {prefix}{kind}")
    }

    /// Add a rounded rectangle
    pub fn add_rect(&mut self, bounds: &BoundingBox, rx: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="{}"{}/>"#,
            self.indent_str(),
            self.shape_classes("rect"),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            rx,
            styles
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, cx: f64, cy: f64, r: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            self.shape_classes("circle"),
            cx,
            cy,
            r,
            styles
        ));
    }

    /// Add an ellipse element
    pub fn add_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<ellipse class="{}" cx="{}" cy="{}" rx="{}" ry="{}"{}/>"#,
            self.indent_str(),
            self.shape_classes("ellipse"),
            cx,
            cy,
            rx,
            ry,
            styles
        ));
    }

    /// Add a polygon element
    pub fn add_polygon(&mut self, points: &[Point], styles: &str) {
        let points_str: String = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<polygon class="{}" points="{}"{}/>"#,
            self.indent_str(),
            self.shape_classes("polygon"),
            points_str,
            styles
        ));
    }

    /// Add a cylinder drawn as a single path
    pub fn add_cylinder(&mut self, bounds: &BoundingBox, styles: &str) {
        let rx = bounds.width / 2.0;
        let ry = (bounds.height * 0.15).min(10.0);
        let (left, right) = (bounds.x, bounds.right());
        let (top, bottom) = (bounds.y + ry, bounds.bottom() - ry);
        let d = format!(
            "M{left} {top} A{rx} {ry} 0 0 0 {right} {top} A{rx} {ry} 0 0 0 {left} {top} \
             L{left} {bottom} A{rx} {ry} 0 0 0 {right} {bottom} L{right} {top}"
        );

        self.elements.push(format!(
            r#"{}<path class="{}" d="{}"{}/>"#,
            self.indent_str(),
            self.shape_classes("cylinder"),
            d,
            styles
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, class: &str, text: &str, at: Point, anchor: TextAnchor) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<text class="{}{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            class,
            at.x,
            at.y,
            anchor.as_str(),
            escape_xml(text)
        ));
    }

    /// Add the path for an edge
    pub fn add_edge_path(&mut self, from: &str, to: &str, path: &[Point]) {
        let prefix = self.prefix();
        self.connections.push(format!(
            r#"{}<path class="{prefix}edge" data-from="{}" data-to="{}" d="{}" marker-end="url(#{prefix}arrow)"/>"#,
            self.indent_str(),
            escape_xml(from),
            escape_xml(to),
            path_to_d(path),
        ));
    }

    /// Add an edge label, drawn above the edges
    pub fn add_edge_label(&mut self, text: &str, at: Point) {
        let prefix = self.prefix();
        self.connections.push(format!(
            r#"{}<text class="{prefix}edge-label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            at.x,
            at.y,
            escape_xml(text)
        ));
    }

    /// Open a group for a diagram element of `kind`
    ///
    /// The XML id is `{prefix}{kind}-{name}`, which keeps node, cluster and
    /// marker ids apart. The diagram's own name goes in `data-id`.
    pub fn start_group(&mut self, kind: &str, name: &str) {
        let prefix = self.prefix();
        let name = escape_xml(name);
        self.elements.push(format!(
            r#"{}<g id="{prefix}{kind}-{name}" class="{prefix}{kind}" data-id="{name}">"#,
            self.indent_str(),
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();
        let prefix = self.prefix();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
            width, height
        ));
        svg.push_str(nl);

        svg.push_str(&format!("  <title>{}</title>", escape_xml(&self.title)));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"  <text class="{}title" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            prefix,
            width / 2.0,
            self.config.margin,
            escape_xml(&self.title)
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        // Edges are drawn on top of nodes and clusters
        for conn in &self.connections {
            svg.push_str(conn);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a validated diagram to an SVG string
pub fn render_svg(diagram: &ValidDiagram<'_>, config: &SvgConfig, stylesheet: &Stylesheet) -> String {
    let layout = layout::compute(diagram, config);
    let mut builder = SvgBuilder::new(config.clone(), diagram.title());

    builder.add_stylesheet(stylesheet);
    if !layout.edges.is_empty() {
        builder.add_arrow_marker();
    }

    // Backdrops first so nodes paint over them
    for cluster in &layout.clusters {
        render_cluster(cluster, &mut builder);
    }

    for node in &layout.nodes {
        render_node(node, stylesheet, &mut builder);
    }

    for edge in &layout.edges {
        render_edge(edge, &mut builder);
    }

    builder.build(layout.width, layout.height)
}

fn render_cluster(cluster: &ClusterLayout<'_>, builder: &mut SvgBuilder) {
    builder.start_group("cluster", &cluster.cluster.name);

    let prefix = builder.prefix();
    let b = &cluster.bounds;
    builder.elements.push(format!(
        r#"{}<rect class="{}cluster-box" x="{}" y="{}" width="{}" height="{}" rx="8"/>"#,
        builder.indent_str(),
        prefix,
        b.x,
        b.y,
        b.width,
        b.height
    ));
    builder.add_text(
        "cluster-label",
        &cluster.cluster.label,
        cluster.label_position,
        TextAnchor::Start,
    );

    builder.end_group();
}

fn render_node(layout: &NodeLayout<'_>, stylesheet: &Stylesheet, builder: &mut SvgBuilder) {
    let node = layout.node;
    let b = &layout.bounds;
    let styles = node
        .fill
        .as_ref()
        .map(|fill| format!(r#" style="fill: {}""#, escape_xml(&stylesheet.resolve_fill(fill))))
        .unwrap_or_default();

    builder.start_group("node", &node.id);

    match node.shape {
        NodeShape::Box => builder.add_rect(b, 5.0, &styles),
        NodeShape::Cylinder => builder.add_cylinder(b, &styles),
        NodeShape::Ellipse => {
            builder.add_ellipse(b.center_x(), b.center_y(), b.width / 2.0, b.height / 2.0, &styles)
        }
        NodeShape::Circle => builder.add_circle(b.center_x(), b.center_y(), b.height / 2.0, &styles),
        NodeShape::Diamond => {
            let points = [
                Point::new(b.center_x(), b.y),
                Point::new(b.right(), b.center_y()),
                Point::new(b.center_x(), b.bottom()),
                Point::new(b.x, b.center_y()),
            ];
            builder.add_polygon(&points, &styles);
        }
        NodeShape::Hexagon => {
            let inset = b.width * 0.15;
            let points = [
                Point::new(b.x + inset, b.y),
                Point::new(b.right() - inset, b.y),
                Point::new(b.right(), b.center_y()),
                Point::new(b.right() - inset, b.bottom()),
                Point::new(b.x + inset, b.bottom()),
                Point::new(b.x, b.center_y()),
            ];
            builder.add_polygon(&points, &styles);
        }
    }

    builder.add_text(
        "label",
        &node.label,
        Point::new(b.center_x(), b.center_y()),
        TextAnchor::Middle,
    );

    builder.end_group();
}

fn render_edge(layout: &EdgeLayout<'_>, builder: &mut SvgBuilder) {
    builder.add_edge_path(&layout.edge.from, &layout.edge.to, &layout.path);
    if let (Some(label), Some(at)) = (&layout.edge.label, layout.label_position) {
        builder.add_edge_label(label, at);
    }
}

/// Convert a path of points to an SVG path d attribute
fn path_to_d(path: &[Point]) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut d = format!("M{} {}", path[0].x, path[0].y);
    for point in &path[1..] {
        d.push_str(&format!(" L{} {}", point.x, point.y));
    }
    d
}
