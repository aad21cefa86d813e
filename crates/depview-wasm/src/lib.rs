//! Browser-side explorer over a depview bundle.
//!
//! Wraps the shared hierarchy projection and visibility engine behind a
//! wasm-bindgen surface: a frontend constructs a [`GraphExplorer`] from the
//! bundle JSON the CLI produced, drives selection and filter state through
//! it, and reads back the render set after every change. All graph logic
//! lives in `depview-graph`; this crate only marshals it across the JS
//! boundary, so the state machine itself stays testable on native targets.

use depview_graph::{Filter, GraphData, HierarchyNode, VisibilityEngine, hierarchy};
use wasm_bindgen::prelude::*;

/// Interactive explorer for one dependency bundle.
#[wasm_bindgen]
#[derive(Debug)]
pub struct GraphExplorer {
    hierarchy: HierarchyNode,
    engine: VisibilityEngine,
    node_count: usize,
    link_count: usize,
}

impl GraphExplorer {
    /// Parse and project a bundle. Kept off the wasm surface so error cases
    /// stay exercisable without a JS runtime.
    fn from_json(graph_json: &str) -> Result<GraphExplorer, String> {
        let data: GraphData = serde_json::from_str(graph_json)
            .map_err(|e| format!("Failed to parse graph JSON: {e}"))?;

        let root = hierarchy::project(&data)
            .map_err(|e| format!("Inconsistent graph bundle: {e}"))?;

        let engine = VisibilityEngine::from_hierarchy(&root);

        Ok(GraphExplorer {
            hierarchy: root,
            engine,
            node_count: data.nodes.len(),
            link_count: data.links.len(),
        })
    }
}

#[wasm_bindgen]
impl GraphExplorer {
    /// Create an explorer from the bundle JSON embedded in the page.
    ///
    /// Fails on malformed JSON and on bundles whose links reference nodes
    /// that do not exist.
    #[wasm_bindgen(constructor)]
    pub fn new(graph_json: &str) -> Result<GraphExplorer, JsValue> {
        let explorer = GraphExplorer::from_json(graph_json).map_err(|e| JsValue::from_str(&e))?;

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(
            &format!(
                "GraphExplorer ready: {} packages, {} dependencies",
                explorer.node_count, explorer.link_count
            )
            .into(),
        );

        Ok(explorer)
    }

    /// Toggle a node in or out of the selection. A non-additive toggle
    /// replaces the selection with the clicked node.
    pub fn toggle_node(&mut self, node_id: &str, additive: bool) {
        self.engine.toggle(node_id, additive);
    }

    pub fn set_show_outgoing(&mut self, enabled: bool) {
        self.engine.set_filter(Filter::Outgoing, enabled);
    }

    pub fn set_show_incoming(&mut self, enabled: bool) {
        self.engine.set_filter(Filter::Incoming, enabled);
    }

    pub fn set_cross_module_only(&mut self, enabled: bool) {
        self.engine.set_filter(Filter::CrossModuleOnly, enabled);
    }

    pub fn clear_selection(&mut self) {
        self.engine.clear();
    }

    /// Selected node ids in selection order.
    pub fn selected_ids(&self) -> js_sys::Array {
        self.engine
            .selected()
            .iter()
            .map(|id| JsValue::from_str(id))
            .collect()
    }

    /// Highlight classes and the styled edge list for the current state.
    pub fn render(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine.render()).unwrap_or(JsValue::NULL)
    }

    /// The folder/package tree, in the camelCase shape the frontend lays out.
    pub fn hierarchy(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.hierarchy).unwrap_or(JsValue::NULL)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }
}
