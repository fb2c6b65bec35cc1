//! Reader for Graphviz DOT, backed by `graphviz-rust`

use super::{GraphSummary, VerifyError};

#[cfg(feature = "graphviz")]
pub(super) fn summarize(text: &str) -> Result<GraphSummary, VerifyError> {
    use dot_structures::Graph;

    let graph = graphviz_rust::parse(text).map_err(VerifyError::Dot)?;
    let stmts = match graph {
        Graph::DiGraph { stmts, .. } => stmts,
        Graph::Graph { .. } => return Err(VerifyError::Dot("expected a digraph".to_string())),
    };

    let mut summary = GraphSummary::default();
    collect(&stmts, &mut summary);
    Ok(summary)
}

#[cfg(not(feature = "graphviz"))]
pub(super) fn summarize(_text: &str) -> Result<GraphSummary, VerifyError> {
    Err(VerifyError::FeatureDisabled(
        crate::format::OutputFormat::GraphDescription,
    ))
}

#[cfg(feature = "graphviz")]
fn collect(stmts: &[dot_structures::Stmt], summary: &mut GraphSummary) {
    use dot_structures::{EdgeTy, Stmt, Vertex};

    for stmt in stmts {
        match stmt {
            Stmt::Node(node) => {
                summary.nodes.insert(id_text(&node.id.0));
            }
            Stmt::Subgraph(subgraph) => {
                let name = id_text(&subgraph.id);
                if let Some(cluster) = name.strip_prefix("cluster_") {
                    summary.clusters.insert(cluster.to_string());
                }
                collect(&subgraph.stmts, summary);
            }
            Stmt::Edge(edge) => {
                let vertices: Vec<&Vertex> = match &edge.ty {
                    EdgeTy::Pair(from, to) => vec![from, to],
                    EdgeTy::Chain(chain) => chain.iter().collect(),
                };
                for pair in vertices.windows(2) {
                    if let (Vertex::N(from), Vertex::N(to)) = (pair[0], pair[1]) {
                        summary.add_edge(id_text(&from.0), id_text(&to.0));
                    }
                }
            }
            Stmt::Attribute(_) | Stmt::GAttribute(_) => {}
        }
    }
}

#[cfg(feature = "graphviz")]
fn id_text(id: &dot_structures::Id) -> String {
    use dot_structures::Id;

    match id {
        Id::Escaped(quoted) => quoted.trim_matches('"').to_string(),
        Id::Html(text) | Id::Plain(text) | Id::Anonymous(text) => text.clone(),
    }
}
