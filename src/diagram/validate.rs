//! Fail-fast validation of diagrams against a target grammar

use std::collections::{HashMap, HashSet};

use crate::error::{Reference, ValidationError};
use crate::format::OutputFormat;
use crate::renderer::escape::{identifier_issue, is_valid_color};

use super::model::{Cluster, Diagram, Node};

/// A diagram that passed validation for one output format
///
/// Renderers only accept this view, so unvalidated input never reaches them.
#[derive(Debug, Clone)]
pub struct ValidDiagram<'a> {
    diagram: &'a Diagram,
    /// node id -> index of the cluster containing it
    cluster_of: HashMap<&'a str, usize>,
}

impl<'a> ValidDiagram<'a> {
    pub fn diagram(&self) -> &'a Diagram {
        self.diagram
    }

    pub fn title(&self) -> &'a str {
        &self.diagram.title
    }

    pub fn has_clusters(&self) -> bool {
        !self.diagram.clusters.is_empty()
    }

    /// Member nodes of a cluster, in node declaration order
    pub fn cluster_members(&self, index: usize) -> impl Iterator<Item = &'a Node> + '_ {
        self.diagram
            .nodes
            .iter()
            .filter(move |n| self.cluster_of.get(n.id.as_str()) == Some(&index))
    }

    /// Clusters paired with their member nodes
    pub fn clusters(&self) -> impl Iterator<Item = (&'a Cluster, Vec<&'a Node>)> + '_ {
        self.diagram
            .clusters
            .iter()
            .enumerate()
            .map(move |(i, c)| (c, self.cluster_members(i).collect()))
    }

    /// Nodes outside every cluster, in declaration order
    pub fn unclustered_nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.diagram
            .nodes
            .iter()
            .filter(move |n| !self.cluster_of.contains_key(n.id.as_str()))
    }
}

/// Validate a diagram for rendering in `format`
///
/// Checks run in a fixed order: node ids, cluster names, colors, edge
/// references, cluster membership. The first failure is returned.
pub fn validate(diagram: &Diagram, format: OutputFormat) -> Result<ValidDiagram<'_>, ValidationError> {
    let mut defined = HashSet::new();
    for node in &diagram.nodes {
        check_identifier(&node.id, format)?;
        if !defined.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateNode { id: node.id.clone() });
        }
    }

    let mut cluster_names = HashSet::new();
    for cluster in &diagram.clusters {
        check_identifier(&cluster.name, format)?;
        if !cluster_names.insert(cluster.name.as_str()) {
            return Err(ValidationError::DuplicateCluster {
                name: cluster.name.clone(),
            });
        }
        // Mermaid subgraphs and vertices share one id space
        if format == OutputFormat::FlowchartMarkup && defined.contains(cluster.name.as_str()) {
            return Err(ValidationError::ClusterNameConflict {
                name: cluster.name.clone(),
                format,
            });
        }
    }

    for node in &diagram.nodes {
        if let Some(fill) = &node.fill {
            if !is_valid_color(fill) {
                return Err(ValidationError::InvalidColor {
                    node: node.id.clone(),
                    color: fill.clone(),
                });
            }
        }
    }

    for (index, edge) in diagram.edges.iter().enumerate() {
        for endpoint in [&edge.from, &edge.to] {
            if !defined.contains(endpoint.as_str()) {
                return Err(ValidationError::undefined(
                    endpoint.clone(),
                    Reference::Edge(index),
                    find_similar(&defined, endpoint, 2),
                ));
            }
        }
    }

    let mut cluster_of: HashMap<&str, usize> = HashMap::new();
    for (index, cluster) in diagram.clusters.iter().enumerate() {
        for member in &cluster.nodes {
            if !defined.contains(member.as_str()) {
                return Err(ValidationError::undefined(
                    member.clone(),
                    Reference::Cluster(cluster.name.clone()),
                    find_similar(&defined, member, 2),
                ));
            }
            match cluster_of.get(member.as_str()) {
                // Listing a node twice in the same cluster is harmless
                Some(&existing) if existing == index => {}
                Some(&existing) => {
                    return Err(ValidationError::NodeInMultipleClusters {
                        id: member.clone(),
                        first: diagram.clusters[existing].name.clone(),
                        second: cluster.name.clone(),
                    });
                }
                None => {
                    cluster_of.insert(member.as_str(), index);
                }
            }
        }
    }

    Ok(ValidDiagram {
        diagram,
        cluster_of,
    })
}

fn check_identifier(id: &str, format: OutputFormat) -> Result<(), ValidationError> {
    match identifier_issue(id, format) {
        Some(reason) => Err(ValidationError::InvalidIdentifier {
            id: id.to_string(),
            format,
            reason,
        }),
        None => Ok(()),
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Single rolling row is enough; only the previous row is read
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Find declared ids within a maximum edit distance, closest first
fn find_similar(defined: &HashSet<&str>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = defined
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((*name, dist))
        })
        .collect();

    // Tie-break on name so suggestions do not depend on hash order
    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}
