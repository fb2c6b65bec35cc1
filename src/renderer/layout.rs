//! Layered placement of nodes for SVG output
//!
//! Nodes are assigned to ranks by longest path from the sources, then laid
//! out left to right within each rank in declaration order. Each rank is
//! centered on the widest one. Everything here is deterministic: the same
//! diagram and config always give the same coordinates.

use std::collections::HashMap;

use crate::diagram::{Cluster, Edge, Node, ValidDiagram};

use super::SvgConfig;

/// Height reserved above a cluster's nodes for its label
const CLUSTER_LABEL_HEIGHT: f64 = 18.0;

/// Horizontal offset of a self-loop from the node's right edge
const SELF_LOOP_REACH: f64 = 25.0;

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box by `left`/`top`/`right`/`bottom` on each side
    pub fn expand(&self, left: f64, top: f64, right: f64, bottom: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

/// Position of one node
#[derive(Debug, Clone)]
pub struct NodeLayout<'a> {
    pub node: &'a Node,
    pub rank: usize,
    pub bounds: BoundingBox,
}

/// Route of one edge
#[derive(Debug, Clone)]
pub struct EdgeLayout<'a> {
    pub edge: &'a Edge,
    pub path: Vec<Point>,
    pub label_position: Option<Point>,
}

/// Backdrop of one cluster
#[derive(Debug, Clone)]
pub struct ClusterLayout<'a> {
    pub cluster: &'a Cluster,
    pub bounds: BoundingBox,
    pub label_position: Point,
}

/// Complete placement for a diagram
#[derive(Debug, Clone)]
pub struct DiagramLayout<'a> {
    /// In declaration order
    pub nodes: Vec<NodeLayout<'a>>,
    /// In declaration order
    pub edges: Vec<EdgeLayout<'a>>,
    /// Clusters with at least one member, in declaration order
    pub clusters: Vec<ClusterLayout<'a>>,
    pub width: f64,
    pub height: f64,
}

/// Compute node, edge and cluster positions
pub fn compute<'a>(valid: &ValidDiagram<'a>, config: &SvgConfig) -> DiagramLayout<'a> {
    let diagram = valid.diagram();
    let index: HashMap<&str, usize> = diagram
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let ranks = assign_ranks(&diagram.nodes, &diagram.edges, &index);
    let rank_count = ranks.iter().max().map_or(0, |r| r + 1);

    // Cluster membership decides extra spacing between neighbours
    let mut cluster_of: Vec<Option<usize>> = vec![None; diagram.nodes.len()];
    for (ci, (_, members)) in valid.clusters().enumerate() {
        for member in members {
            if let Some(&ni) = index.get(member.id.as_str()) {
                cluster_of[ni] = Some(ci);
            }
        }
    }

    let sizes: Vec<f64> = diagram
        .nodes
        .iter()
        .map(|n| node_width(&n.label, config))
        .collect();

    // Members of each rank, in declaration order
    let mut rows: Vec<Vec<usize>> = vec![vec![]; rank_count];
    for (i, &rank) in ranks.iter().enumerate() {
        rows[rank].push(i);
    }

    let gap_between = |a: usize, b: usize| {
        if cluster_of[a] == cluster_of[b] {
            config.node_gap
        } else {
            config.node_gap + 2.0 * config.cluster_padding
        }
    };

    let row_widths: Vec<f64> = rows
        .iter()
        .map(|row| {
            let nodes: f64 = row.iter().map(|&i| sizes[i]).sum();
            let gaps: f64 = row.windows(2).map(|w| gap_between(w[0], w[1])).sum();
            nodes + gaps
        })
        .collect();

    let title_width = diagram.title.chars().count() as f64 * config.char_width * 1.25;
    let content_width = row_widths.iter().copied().fold(title_width, f64::max);

    let mut bounds = vec![BoundingBox::new(0.0, 0.0, 0.0, 0.0); diagram.nodes.len()];
    for (rank, row) in rows.iter().enumerate() {
        let y = config.margin + config.title_height + rank as f64 * (config.node_height + config.rank_gap);
        let mut x = config.margin + (content_width - row_widths[rank]) / 2.0;
        for (pos, &i) in row.iter().enumerate() {
            if pos > 0 {
                x += gap_between(row[pos - 1], i);
            }
            bounds[i] = BoundingBox::new(x, y, sizes[i], config.node_height);
            x += sizes[i];
        }
    }

    let nodes: Vec<NodeLayout<'a>> = diagram
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| NodeLayout {
            node,
            rank: ranks[i],
            bounds: bounds[i],
        })
        .collect();

    let edges = diagram
        .edges
        .iter()
        .filter_map(|edge| {
            let s = *index.get(edge.from.as_str())?;
            let t = *index.get(edge.to.as_str())?;
            let path = route(&nodes[s], &nodes[t], s == t);
            let label_position = edge.label.as_ref().map(|_| label_anchor(&path));
            Some(EdgeLayout {
                edge,
                path,
                label_position,
            })
        })
        .collect();

    let clusters = valid
        .clusters()
        .filter_map(|(cluster, members)| {
            let mut boxes = members
                .iter()
                .filter_map(|m| index.get(m.id.as_str()))
                .map(|&i| bounds[i]);
            let first = boxes.next()?;
            let inner = boxes.fold(first, |acc, b| acc.union(&b));
            let p = config.cluster_padding;
            let outer = inner.expand(p, p + CLUSTER_LABEL_HEIGHT, p, p);
            Some(ClusterLayout {
                cluster,
                bounds: outer,
                label_position: Point::new(outer.x + 8.0, outer.y + CLUSTER_LABEL_HEIGHT - 2.0),
            })
        })
        .collect();

    let rows_height = if rank_count == 0 {
        0.0
    } else {
        rank_count as f64 * config.node_height + (rank_count - 1) as f64 * config.rank_gap
    };

    DiagramLayout {
        nodes,
        edges,
        clusters,
        width: content_width + 2.0 * config.margin,
        height: config.title_height + rows_height + 2.0 * config.margin,
    }
}

/// Longest-path ranking from the sources
///
/// Ranks are capped at `nodes.len() - 1`, so cycles settle instead of
/// growing without bound.
fn assign_ranks(nodes: &[Node], edges: &[Edge], index: &HashMap<&str, usize>) -> Vec<usize> {
    let n = nodes.len();
    let mut ranks = vec![0usize; n];

    for _ in 0..n {
        let mut changed = false;
        for edge in edges {
            let (Some(&s), Some(&t)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str())) else {
                continue;
            };
            if s == t {
                continue;
            }
            let candidate = ranks[s] + 1;
            if candidate > ranks[t] && candidate < n {
                ranks[t] = candidate;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    ranks
}

fn node_width(label: &str, config: &SvgConfig) -> f64 {
    let text = (label.chars().count() + 2) as f64 * config.char_width;
    text.max(config.node_min_width)
}

/// Straight route between the facing sides of two nodes
fn route(from: &NodeLayout<'_>, to: &NodeLayout<'_>, self_loop: bool) -> Vec<Point> {
    let s = &from.bounds;
    let t = &to.bounds;

    if self_loop {
        let reach = s.right() + SELF_LOOP_REACH;
        let top = s.center_y() - 10.0;
        let bottom = s.center_y() + 10.0;
        return vec![
            Point::new(s.right(), top),
            Point::new(reach, top),
            Point::new(reach, bottom),
            Point::new(s.right(), bottom),
        ];
    }

    if to.rank > from.rank {
        vec![
            Point::new(s.center_x(), s.bottom()),
            Point::new(t.center_x(), t.y),
        ]
    } else if to.rank < from.rank {
        vec![
            Point::new(s.center_x(), s.y),
            Point::new(t.center_x(), t.bottom()),
        ]
    } else if t.x >= s.right() {
        vec![
            Point::new(s.right(), s.center_y()),
            Point::new(t.x, t.center_y()),
        ]
    } else {
        vec![
            Point::new(s.x, s.center_y()),
            Point::new(t.right(), t.center_y()),
        ]
    }
}

fn label_anchor(path: &[Point]) -> Point {
    match (path.first(), path.last()) {
        (Some(&a), Some(&b)) => a.midpoint(b),
        _ => Point::new(0.0, 0.0),
    }
}
