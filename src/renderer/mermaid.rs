//! Mermaid flowchart generation

use crate::diagram::{Node, NodeShape, ValidDiagram};
use crate::format::OutputFormat;
use crate::stylesheet::Stylesheet;
use crate::RenderConfig;

use super::escape::{escape_mermaid, mermaid_comment};
use super::{join_sections, MermaidConfig, TargetRenderer};

/// Renders diagrams as Mermaid flowcharts
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer;

impl TargetRenderer for MermaidRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::FlowchartMarkup
    }

    fn render(&self, diagram: &ValidDiagram<'_>, config: &RenderConfig) -> String {
        render_mermaid(diagram, &config.mermaid, &config.stylesheet)
    }
}

/// Render a validated diagram to a Mermaid flowchart
pub fn render_mermaid(
    diagram: &ValidDiagram<'_>,
    config: &MermaidConfig,
    stylesheet: &Stylesheet,
) -> String {
    let indent = config.indent.as_str();
    let mut sections: Vec<Vec<String>> = vec![];

    let mut header = vec![format!("flowchart {}", config.direction.code())];
    let title = mermaid_comment(diagram.title());
    if !title.is_empty() {
        header.push(format!("{indent}%% {title}"));
    }
    sections.push(header);

    for (cluster, members) in diagram.clusters() {
        let mut lines = vec![format!(
            r#"{indent}subgraph {} ["{}"]"#,
            cluster.name,
            escape_mermaid(&cluster.label)
        )];
        for node in members {
            lines.push(format!("{indent}{indent}{}", node_declaration(node)));
        }
        lines.push(format!("{indent}end"));
        sections.push(lines);
    }

    sections.push(
        diagram
            .unclustered_nodes()
            .map(|node| format!("{indent}{}", node_declaration(node)))
            .collect(),
    );

    sections.push(
        diagram
            .diagram()
            .edges
            .iter()
            .map(|edge| match &edge.label {
                Some(label) => format!(
                    r#"{indent}{} -->|"{}"| {}"#,
                    edge.from,
                    escape_mermaid(label),
                    edge.to
                ),
                None => format!("{indent}{} --> {}", edge.from, edge.to),
            })
            .collect(),
    );

    sections.push(
        diagram
            .diagram()
            .nodes
            .iter()
            .filter_map(|node| {
                let fill = stylesheet.resolve_fill(node.fill.as_deref()?);
                Some(format!("{indent}style {} fill:{}", node.id, fill))
            })
            .collect(),
    );

    let body = join_sections(&sections);
    if config.fenced {
        format!("```mermaid\n{}\n```", body)
    } else {
        body
    }
}

/// Node id followed by its shape-delimited, quoted label
fn node_declaration(node: &Node) -> String {
    let (open, close) = match node.shape {
        NodeShape::Box => ("[", "]"),
        NodeShape::Cylinder => ("[(", ")]"),
        NodeShape::Ellipse => ("([", "])"),
        NodeShape::Circle => ("((", "))"),
        NodeShape::Diamond => ("{", "}"),
        NodeShape::Hexagon => ("{{", "}}"),
    };
    format!(
        r#"{}{}"{}"{}"#,
        node.id,
        open,
        escape_mermaid(&node.label),
        close
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{validate, Cluster, Diagram, Edge};
    use crate::renderer::Direction;
    use pretty_assertions::assert_eq;

    fn render(diagram: &Diagram) -> String {
        let valid = validate(diagram, OutputFormat::FlowchartMarkup).unwrap();
        render_mermaid(&valid, &MermaidConfig::default(), &Stylesheet::default())
    }

    fn frontend_backend() -> Diagram {
        Diagram::new("Custom Web Application")
            .with_node(Node::new("A", "Frontend").with_fill("#e1f5ff"))
            .with_node(Node::new("B", "Backend"))
            .with_node(Node::new("C", "Database").with_shape(NodeShape::Cylinder))
            .with_edge(Edge::new("A", "B"))
            .with_edge(Edge::new("B", "C"))
    }

    #[test]
    fn test_render_without_clusters() {
        let expected = r##"```mermaid
flowchart TB
    %% Custom Web Application

    A["Frontend"]
    B["Backend"]
    C[("Database")]

    A --> B
    B --> C

    style A fill:#e1f5ff
```"##;
        assert_eq!(render(&frontend_backend()), expected);
    }

    #[test]
    fn test_each_node_declared_once() {
        let out = render(&frontend_backend());
        for id in ["A", "B", "C"] {
            let declarations = out
                .lines()
                .filter(|line| line.trim_start().starts_with(&format!("{}[", id)))
                .count();
            assert_eq!(declarations, 1, "node {} declared {} times", id, declarations);
        }
        assert!(out.lines().any(|l| l.trim() == "A --> B"));
        assert!(out.lines().any(|l| l.trim() == "B --> C"));
    }

    #[test]
    fn test_render_with_cluster() {
        let diagram = frontend_backend()
            .with_edge(Edge::new("A", "C").with_label("direct"))
            .with_cluster(Cluster::new("data", "Data Layer", ["C"]));
        let valid = validate(&diagram, OutputFormat::FlowchartMarkup).unwrap();
        let config = MermaidConfig::new().with_fenced(false).with_direction(Direction::LeftRight);
        let out = render_mermaid(&valid, &config, &Stylesheet::default());

        let expected = r##"flowchart LR
    %% Custom Web Application

    subgraph data ["Data Layer"]
        C[("Database")]
    end

    A["Frontend"]
    B["Backend"]

    A --> B
    B --> C
    A -->|"direct"| C

    style A fill:#e1f5ff"##;
        assert_eq!(out, expected);
    }

    #[test]
    fn test_shapes() {
        let node = |shape| node_declaration(&Node::new("n", "N").with_shape(shape));
        assert_eq!(node(NodeShape::Box), r#"n["N"]"#);
        assert_eq!(node(NodeShape::Ellipse), r#"n(["N"])"#);
        assert_eq!(node(NodeShape::Circle), r#"n(("N"))"#);
        assert_eq!(node(NodeShape::Diamond), r#"n{"N"}"#);
        assert_eq!(node(NodeShape::Hexagon), r#"n{{"N"}}"#);
    }

    #[test]
    fn test_labels_cannot_break_out() {
        let diagram = Diagram::new("multi\nline")
            .with_node(Node::new("a", "evil\"] --> x[\"q"))
            .with_node(Node::new("b", "C# <b>"));
        let out = render(&diagram);
        assert!(out.contains(r#"a["evil#quot;] --#gt; x[#quot;q"]"#));
        assert!(out.contains(r#"b["C#35; #lt;b#gt;"]"#));
        assert!(out.contains("%% multi line"));
    }

    #[test]
    fn test_symbolic_fill_resolved() {
        let diagram = Diagram::new("t").with_node(Node::new("a", "A").with_fill("tier-service"));
        assert!(render(&diagram).contains("style a fill:#f3e5f5"));
    }
}
