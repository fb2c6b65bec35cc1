//! Output format selection

use std::fmt;
use std::str::FromStr;

use crate::error::UnsupportedFormatError;

/// Target grammar for rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Graphviz DOT
    GraphDescription,
    /// Mermaid flowchart in a fenced code block
    FlowchartMarkup,
    /// Standalone SVG document
    VectorMarkup,
}

impl OutputFormat {
    /// All supported formats, in a stable order
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::GraphDescription,
        OutputFormat::FlowchartMarkup,
        OutputFormat::VectorMarkup,
    ];

    /// Short name used in messages and `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::GraphDescription => "dot",
            OutputFormat::FlowchartMarkup => "mermaid",
            OutputFormat::VectorMarkup => "svg",
        }
    }

    /// Conventional file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::GraphDescription => "dot",
            OutputFormat::FlowchartMarkup => "md",
            OutputFormat::VectorMarkup => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = UnsupportedFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" | "gv" | "graphviz" => Ok(OutputFormat::GraphDescription),
            "mermaid" | "mmd" | "flowchart" => Ok(OutputFormat::FlowchartMarkup),
            "svg" => Ok(OutputFormat::VectorMarkup),
            _ => Err(UnsupportedFormatError {
                requested: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("dot".parse::<OutputFormat>(), Ok(OutputFormat::GraphDescription));
        assert_eq!("Graphviz".parse::<OutputFormat>(), Ok(OutputFormat::GraphDescription));
        assert_eq!("mermaid".parse::<OutputFormat>(), Ok(OutputFormat::FlowchartMarkup));
        assert_eq!(" svg ".parse::<OutputFormat>(), Ok(OutputFormat::VectorMarkup));
    }

    #[test]
    fn test_parse_unknown_format() {
        let err = "png".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.requested, "png");
        assert!(err.to_string().contains("png"));
    }

    #[test]
    fn test_display_round_trips() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
    }
}
