//! Reader for SVG documents, backed by `roxmltree`

use super::{GraphSummary, VerifyError};

pub(super) fn summarize(text: &str) -> Result<GraphSummary, VerifyError> {
    let document = roxmltree::Document::parse(text)?;
    let mut summary = GraphSummary::default();

    for element in document.descendants().filter(|n| n.is_element()) {
        match element.tag_name().name() {
            "g" => {
                let Some(id) = element.attribute("data-id") else {
                    continue;
                };
                let classes = element.attribute("class").unwrap_or_default();
                if has_class(classes, "node") {
                    summary.nodes.insert(id.to_string());
                } else if has_class(classes, "cluster") {
                    summary.clusters.insert(id.to_string());
                }
            }
            "path" => {
                if let (Some(from), Some(to)) =
                    (element.attribute("data-from"), element.attribute("data-to"))
                {
                    summary.add_edge(from.to_string(), to.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(summary)
}

/// Whether a class list holds `suffix`, possibly behind a prefix like `ad-`
fn has_class(classes: &str, suffix: &str) -> bool {
    classes.split_whitespace().any(|class| class.ends_with(suffix))
}
