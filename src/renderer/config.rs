//! Configuration for each output format

/// Layout direction shared by DOT `rankdir` and Mermaid flowchart headers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    TopBottom,
    LeftRight,
    BottomTop,
    RightLeft,
}

impl Direction {
    /// Two-letter code understood by both Graphviz and Mermaid
    pub fn code(self) -> &'static str {
        match self {
            Direction::TopBottom => "TB",
            Direction::LeftRight => "LR",
            Direction::BottomTop => "BT",
            Direction::RightLeft => "RL",
        }
    }
}

/// Configuration options for Graphviz DOT output
#[derive(Debug, Clone, PartialEq)]
pub struct DotConfig {
    /// Graph rank direction
    pub rankdir: Direction,

    /// Fill for nodes that do not set one
    pub default_fill: String,

    /// Color of cluster backgrounds
    pub cluster_color: String,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            rankdir: Direction::TopBottom,
            default_fill: "#ffffff".to_string(),
            cluster_color: "lightgrey".to_string(),
        }
    }
}

impl DotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rankdir(mut self, rankdir: Direction) -> Self {
        self.rankdir = rankdir;
        self
    }

    pub fn with_default_fill(mut self, fill: impl Into<String>) -> Self {
        self.default_fill = fill.into();
        self
    }

    pub fn with_cluster_color(mut self, color: impl Into<String>) -> Self {
        self.cluster_color = color.into();
        self
    }
}

/// Configuration options for Mermaid flowchart output
#[derive(Debug, Clone, PartialEq)]
pub struct MermaidConfig {
    /// Flow direction
    pub direction: Direction,

    /// Wrap output in a ```` ```mermaid ```` fence
    pub fenced: bool,

    /// Indentation unit for nested lines
    pub indent: String,
}

impl Default for MermaidConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopBottom,
            fenced: true,
            indent: "    ".to_string(),
        }
    }
}

impl MermaidConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_fenced(mut self, fenced: bool) -> Self {
        self.fenced = fenced;
        self
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "ad-" for "ad-node")
    pub class_prefix: Option<String>,

    /// Minimum node width; wider labels grow the node
    pub node_min_width: f64,

    /// Node height
    pub node_height: f64,

    /// Approximate width of one label character, used to size nodes
    pub char_width: f64,

    /// Horizontal gap between nodes in the same rank
    pub node_gap: f64,

    /// Vertical gap between ranks
    pub rank_gap: f64,

    /// Space around the drawing
    pub margin: f64,

    /// Height reserved for the title above the first rank
    pub title_height: f64,

    /// Padding between a cluster backdrop and its nodes
    pub cluster_padding: f64,

    /// Font size for node labels
    pub font_size: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("ad-".to_string()),
            node_min_width: 120.0,
            node_height: 50.0,
            char_width: 8.0,
            node_gap: 20.0,
            rank_gap: 60.0,
            margin: 40.0,
            title_height: 50.0,
            cluster_padding: 15.0,
            font_size: 14.0,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    ///
    /// Characters that cannot appear in a CSS class name are dropped, and a
    /// leading digit gets an `_` in front.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(sanitize_class_prefix(&prefix.into()));
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set node height and minimum width
    pub fn with_node_size(mut self, min_width: f64, height: f64) -> Self {
        self.node_min_width = min_width;
        self.node_height = height;
        self
    }

    /// Set the gaps between nodes and between ranks
    pub fn with_spacing(mut self, node_gap: f64, rank_gap: f64) -> Self {
        self.node_gap = node_gap;
        self.rank_gap = rank_gap;
        self
    }
}

/// Reduce `prefix` to `[A-Za-z_-][A-Za-z0-9_-]*`
pub(crate) fn sanitize_class_prefix(prefix: &str) -> String {
    let mut out: String = prefix
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("ad-".to_string()));
        assert_eq!(config.node_height, 50.0);

        let dot = DotConfig::default();
        assert_eq!(dot.rankdir.code(), "TB");
        assert_eq!(dot.default_fill, "#ffffff");

        let mermaid = MermaidConfig::default();
        assert!(mermaid.fenced);
        assert_eq!(mermaid.direction, Direction::TopBottom);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("my-")
            .with_node_size(100.0, 40.0)
            .with_spacing(10.0, 30.0);

        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, Some("my-".to_string()));
        assert_eq!(config.node_min_width, 100.0);
        assert_eq!(config.rank_gap, 30.0);

        let dot = DotConfig::new().with_rankdir(Direction::LeftRight).with_cluster_color("#eeeeee");
        assert_eq!(dot.rankdir.code(), "LR");
        assert_eq!(dot.cluster_color, "#eeeeee");

        let mermaid = MermaidConfig::new().with_direction(Direction::RightLeft).with_fenced(false);
        assert_eq!(mermaid.direction.code(), "RL");
        assert!(!mermaid.fenced);
    }

    #[test]
    fn test_without_class_prefix() {
        let config = SvgConfig::new().without_class_prefix();
        assert_eq!(config.class_prefix, None);
    }

    #[test]
    fn test_class_prefix_is_sanitized() {
        let config = SvgConfig::new().with_class_prefix("x\" onload=\"alert(1)");
        assert_eq!(config.class_prefix, Some("xonloadalert1".to_string()));

        assert_eq!(sanitize_class_prefix("ad-"), "ad-");
        assert_eq!(sanitize_class_prefix("9lives."), "_9lives");
        assert_eq!(sanitize_class_prefix("a b<c>"), "abc");
        assert_eq!(sanitize_class_prefix(""), "");
    }
}
