//! Color palette for node fills and SVG styling
//!
//! Node fills may name a palette token (`tier-api`, `status-error`) instead
//! of a concrete color. Tokens are resolved here before they reach any
//! output format. The SVG renderer also exposes the palette as CSS custom
//! properties.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a palette file
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Token to color mappings, read from the `[colors]` table of a TOML file
///
/// Other tables are ignored. Tokens the file does not define fall back to
/// the built-in palette.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stylesheet {
    /// Ordered so generated CSS is stable
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

const DEFAULT_PALETTE: &[(&str, &str)] = &[
    ("foreground-1", "#333333"),
    ("foreground-3", "#999999"),
    ("background-1", "#ffffff"),
    ("background-2", "#f5f5f5"),
    ("text-1", "#333333"),
    ("text-2", "#666666"),
    ("tier-client", "#e3f2fd"),
    ("tier-api", "#fff3e0"),
    ("tier-service", "#f3e5f5"),
    ("tier-data", "#c8e6c9"),
    ("tier-infra", "#e8f5e9"),
    ("status-success", "#4caf50"),
    ("status-warning", "#ff9800"),
    ("status-error", "#f44336"),
];

fn builtin(token: &str) -> Option<&'static str> {
    DEFAULT_PALETTE
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, color)| *color)
}

impl Stylesheet {
    /// Load a palette from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, StylesheetError> {
        Ok(toml::from_str(content)?)
    }

    /// The color this stylesheet, or failing that the built-in palette,
    /// gives `token`
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.colors
            .get(token)
            .map(String::as_str)
            .or_else(|| builtin(token))
    }

    /// Turn a node fill into a concrete color for output
    ///
    /// Hex colors and unknown names such as `lightgrey` pass through.
    pub fn resolve_fill(&self, fill: &str) -> String {
        if fill.starts_with('#') {
            return fill.to_string();
        }
        self.lookup(fill).unwrap_or(fill).to_string()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|(token, color)| (token.to_string(), color.to_string()))
                .collect(),
        }
    }
}
