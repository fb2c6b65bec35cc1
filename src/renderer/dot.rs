//! Graphviz DOT generation

use crate::diagram::{Node, ValidDiagram};
use crate::format::OutputFormat;
use crate::stylesheet::Stylesheet;
use crate::RenderConfig;

use super::escape::escape_dot;
use super::{join_sections, DotConfig, TargetRenderer};

const INDENT: &str = "    ";

/// Renders diagrams as Graphviz `digraph` documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl TargetRenderer for DotRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::GraphDescription
    }

    fn render(&self, diagram: &ValidDiagram<'_>, config: &RenderConfig) -> String {
        render_dot(diagram, &config.dot, &config.stylesheet)
    }
}

/// Render a validated diagram to DOT
pub fn render_dot(diagram: &ValidDiagram<'_>, config: &DotConfig, stylesheet: &Stylesheet) -> String {
    let mut sections: Vec<Vec<String>> = vec![];

    let mut header = vec![
        format!("{INDENT}rankdir={};", config.rankdir.code()),
        format!("{INDENT}node [shape=box, style=filled];"),
    ];
    if diagram.has_clusters() {
        header.push(format!("{INDENT}compound=true;"));
    }
    sections.push(header);

    sections.push(vec![
        format!(r#"{INDENT}labelloc="t";"#),
        format!(r#"{INDENT}label="{}";"#, escape_dot(diagram.title())),
    ]);

    let cluster_color = stylesheet.resolve_fill(&config.cluster_color);
    for (cluster, members) in diagram.clusters() {
        let mut lines = vec![
            format!("{INDENT}subgraph cluster_{} {{", cluster.name),
            format!(r#"{INDENT}{INDENT}label="{}";"#, escape_dot(&cluster.label)),
            format!("{INDENT}{INDENT}style=filled;"),
            format!(r#"{INDENT}{INDENT}color="{}";"#, escape_dot(&cluster_color)),
        ];
        if !members.is_empty() {
            lines.push(String::new());
        }
        for node in members {
            lines.push(format!("{INDENT}{INDENT}{}", node_statement(node, config, stylesheet)));
        }
        lines.push(format!("{INDENT}}}"));
        sections.push(lines);
    }

    sections.push(
        diagram
            .unclustered_nodes()
            .map(|node| format!("{INDENT}{}", node_statement(node, config, stylesheet)))
            .collect(),
    );

    sections.push(
        diagram
            .diagram()
            .edges
            .iter()
            .map(|edge| match &edge.label {
                Some(label) => format!(
                    r#"{INDENT}{} -> {} [label="{}"];"#,
                    edge.from,
                    edge.to,
                    escape_dot(label)
                ),
                None => format!("{INDENT}{} -> {};", edge.from, edge.to),
            })
            .collect(),
    );

    format!("digraph G {{\n{}\n}}", join_sections(&sections))
}

fn node_statement(node: &Node, config: &DotConfig, stylesheet: &Stylesheet) -> String {
    let fill = stylesheet.resolve_fill(node.fill.as_deref().unwrap_or(&config.default_fill));
    format!(
        r#"{} [label="{}", fillcolor="{}", shape={}];"#,
        node.id,
        escape_dot(&node.label),
        escape_dot(&fill),
        node.shape.dot_name()
    )
}
