//! Shared graph models for depview.
//!
//! The types here form the JSON bundle handed from the CLI to the
//! visualization frontend, plus the algorithms that operate on it: building
//! the internal package graph, projecting it into a folder/package
//! hierarchy, and computing filtered visibility for interactive selection.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod hierarchy;
pub mod package_graph;
pub mod visibility;

pub use hierarchy::{AdjacencyIndex, HierarchyError, HierarchyNode};
pub use package_graph::{ImportRecord, PackageGraph};
pub use visibility::{DrawnEdge, EdgeStyle, Filter, HighlightClass, RenderSet, VisibilityEngine};

/// Graph node representation shared between the CLI and frontend: one
/// internal package, annotated with its owning module path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct GraphNode {
    pub id: String,
    pub module: String,
}

/// Directed link meaning "source imports target".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// A discovered module: where it lives and what its manifest declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct ModuleInfo {
    /// Directory relative to the analyzed root, slash-separated ("." for the
    /// root itself).
    pub path: String,
    /// Absolute directory of the module.
    #[cfg_attr(feature = "ts-bindings", ts(type = "string"))]
    pub dir: PathBuf,
    /// Base name of the module directory, used as a display label.
    pub name: String,
    /// Palette color assigned in discovery order.
    pub color: String,
    /// Module path declared in the manifest, or the directory base name when
    /// no declaration was found.
    #[serde(rename = "modulePath")]
    pub module_path: String,
}

/// Cached node coordinates from a previous interactive layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
}

/// Complete bundle passed from the CLI to the frontend.
///
/// `saved_positions` is a layout hint only; it is omitted from the JSON
/// entirely when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub modules: Vec<ModuleInfo>,
    #[serde(rename = "savedPositions", skip_serializing_if = "Option::is_none")]
    pub saved_positions: Option<BTreeMap<String, NodePosition>>,
}

impl GraphData {
    /// True when the bundle carries no packages at all (an analyzed tree with
    /// no listable modules still renders, just empty).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_field_names_match_frontend_contract() {
        let data = GraphData {
            nodes: vec![GraphNode {
                id: "example.com/a/x".to_string(),
                module: "example.com/a".to_string(),
            }],
            links: vec![GraphLink {
                source: "example.com/a/x".to_string(),
                target: "example.com/a/y".to_string(),
            }],
            modules: vec![ModuleInfo {
                path: ".".to_string(),
                dir: PathBuf::from("/work/a"),
                name: "a".to_string(),
                color: "#3498db".to_string(),
                module_path: "example.com/a".to_string(),
            }],
            saved_positions: None,
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"modulePath\":\"example.com/a\""));
        assert!(json.contains("\"nodes\""));
        assert!(json.contains("\"links\""));
        // Empty position cache stays out of the payload.
        assert!(!json.contains("savedPositions"));
    }

    #[test]
    fn test_saved_positions_serialize_sorted_by_id() {
        let mut positions = BTreeMap::new();
        positions.insert("b".to_string(), NodePosition { x: 2.0, y: 2.0 });
        positions.insert("a".to_string(), NodePosition { x: 1.0, y: 1.0 });

        let data = GraphData {
            nodes: vec![],
            links: vec![],
            modules: vec![],
            saved_positions: Some(positions),
        };

        let json = serde_json::to_string(&data).unwrap();
        let a_at = json.find("\"a\":").unwrap();
        let b_at = json.find("\"b\":").unwrap();
        assert!(a_at < b_at);
        assert!(json.contains("\"savedPositions\""));
    }
}
