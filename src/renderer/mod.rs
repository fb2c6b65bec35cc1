//! Renderers turning validated diagrams into target-grammar text
//!
//! Each output format has one [`TargetRenderer`] implementation. All of them
//! walk the same [`ValidDiagram`] view, so the ordering rules (clusters, then
//! loose nodes, then edges in input order) hold for every grammar.

pub mod config;
pub mod dot;
pub mod escape;
pub mod layout;
pub mod mermaid;
pub mod svg;

pub use config::{Direction, DotConfig, MermaidConfig, SvgConfig};
pub use dot::{render_dot, DotRenderer};
pub use mermaid::{render_mermaid, MermaidRenderer};
pub use svg::{render_svg, SvgRenderer};

use crate::diagram::ValidDiagram;
use crate::format::OutputFormat;
use crate::RenderConfig;

/// A code generator for one target grammar
pub trait TargetRenderer {
    /// The format this renderer produces
    fn format(&self) -> OutputFormat;

    /// Produce the complete document for an already validated diagram
    fn render(&self, diagram: &ValidDiagram<'_>, config: &RenderConfig) -> String;
}

/// Look up the renderer for a format
pub fn renderer_for(format: OutputFormat) -> &'static dyn TargetRenderer {
    match format {
        OutputFormat::GraphDescription => &DotRenderer,
        OutputFormat::FlowchartMarkup => &MermaidRenderer,
        OutputFormat::VectorMarkup => &SvgRenderer,
    }
}

/// Join line groups, separating non-empty groups with a blank line
pub(crate) fn join_sections(sections: &[Vec<String>]) -> String {
    sections
        .iter()
        .filter(|lines| !lines.is_empty())
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_for_matches_format() {
        for format in OutputFormat::ALL {
            assert_eq!(renderer_for(format).format(), format);
        }
    }

    #[test]
    fn test_join_sections_skips_empty() {
        let sections = vec![
            vec!["a".to_string(), "b".to_string()],
            vec![],
            vec!["c".to_string()],
        ];
        assert_eq!(join_sections(&sections), "a\nb\n\nc");
        assert_eq!(join_sections(&[]), "");
    }
}
