//! Optional rasterization of DOT documents through Graphviz
//!
//! Text generation never depends on this module. With the `graphviz` feature
//! the `dot` executable is driven through `graphviz-rust`; without it every
//! call reports a missing dependency.

use thiserror::Error;

/// Image formats the Graphviz `dot` executable can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Svg,
    Pdf,
}

impl RasterFormat {
    /// File extension for the produced image
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Svg => "svg",
            RasterFormat::Pdf => "pdf",
        }
    }
}

/// Errors that can occur while rasterizing
#[derive(Debug, Error)]
pub enum RasterizeError {
    /// Graphviz support was not compiled in, or `dot` is not installed
    #[error("rendering dependency missing: {0}")]
    DependencyMissing(String),

    /// Graphviz ran but could not render the document
    #[error("graphviz failed: {0}")]
    Failed(String),
}

/// Render a DOT document to image bytes
#[cfg(feature = "graphviz")]
pub fn rasterize(dot: &str, format: RasterFormat) -> Result<Vec<u8>, RasterizeError> {
    use graphviz_rust::cmd::{CommandArg, Format};

    let target = match format {
        RasterFormat::Png => Format::Png,
        RasterFormat::Svg => Format::Svg,
        RasterFormat::Pdf => Format::Pdf,
    };

    log::debug!(format = format.extension(), bytes = dot.len(); "Running graphviz");
    graphviz_rust::exec_dot(dot.to_string(), vec![CommandArg::Format(target)]).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            RasterizeError::DependencyMissing(format!("graphviz `dot` executable not found: {err}"))
        } else {
            RasterizeError::Failed(err.to_string())
        }
    })
}

/// Render a DOT document to image bytes
#[cfg(not(feature = "graphviz"))]
pub fn rasterize(_dot: &str, _format: RasterFormat) -> Result<Vec<u8>, RasterizeError> {
    Err(RasterizeError::DependencyMissing(
        "built without the `graphviz` feature".to_string(),
    ))
}

/// Rasterize, treating a missing Graphviz as a soft failure
///
/// A missing dependency is logged as a warning and yields `None`, so callers
/// can fall back to the text document. Other failures are returned.
pub fn try_rasterize(dot: &str, format: RasterFormat) -> Result<Option<Vec<u8>>, RasterizeError> {
    match rasterize(dot, format) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(RasterizeError::DependencyMissing(reason)) => {
            log::warn!(format = format.extension(); "Skipping rasterization: {reason}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
