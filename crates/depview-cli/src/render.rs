//! HTML rendering of the dependency bundle.

use depview_graph::GraphData;
use thiserror::Error;

const TEMPLATE: &str = include_str!("../templates/graph.html");
const DATA_MARKER: &str = "<!--GRAPH_DATA_PLACEHOLDER-->";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to serialize graph data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("HTML template is missing the graph data placeholder")]
    MissingMarker,
}

/// Render the interactive graph page with the bundle embedded.
pub fn render_html(graph_data: &GraphData) -> Result<String, RenderError> {
    render_with_template(TEMPLATE, graph_data)
}

fn render_with_template(template: &str, graph_data: &GraphData) -> Result<String, RenderError> {
    if !template.contains(DATA_MARKER) {
        return Err(RenderError::MissingMarker);
    }

    let graph_json = serde_json::to_string(graph_data)?;
    Ok(template.replace(DATA_MARKER, &graph_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use depview_graph::{GraphLink, GraphNode, ModuleInfo};
    use std::path::PathBuf;

    fn sample_data() -> GraphData {
        GraphData {
            nodes: vec![
                GraphNode {
                    id: "example.com/a/x".to_string(),
                    module: "example.com/a".to_string(),
                },
                GraphNode {
                    id: "example.com/a/y".to_string(),
                    module: "example.com/a".to_string(),
                },
            ],
            links: vec![GraphLink {
                source: "example.com/a/x".to_string(),
                target: "example.com/a/y".to_string(),
            }],
            modules: vec![ModuleInfo {
                path: ".".to_string(),
                dir: PathBuf::from("/work"),
                name: ".".to_string(),
                color: "#3498db".to_string(),
                module_path: "example.com/a".to_string(),
            }],
            saved_positions: None,
        }
    }

    #[test]
    fn test_render_embeds_bundle() {
        let html = render_html(&sample_data()).unwrap();

        assert!(html.contains("example.com/a/x"));
        assert!(html.contains("\"modulePath\":\"example.com/a\""));
        assert!(!html.contains(DATA_MARKER));
        assert!(html.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_render_exposes_interaction_vocabulary() {
        // The CSS classes the frontend applies are the names the visibility
        // engine emits.
        let html = render_html(&sample_data()).unwrap();

        for class in ["selected", "importing", "imported"] {
            assert!(html.contains(&format!(".node.{class}")), "missing {class}");
        }
        for style in ["all", "outgoing", "incoming", "background"] {
            assert!(
                html.contains(&format!(".dependency-link.{style}")),
                "missing {style}"
            );
        }
    }

    #[test]
    fn test_render_without_marker_fails() {
        let err = render_with_template("<html></html>", &sample_data()).unwrap_err();
        assert!(matches!(err, RenderError::MissingMarker));
    }
}
