//! Internal package dependency graph.
//!
//! Builds a deduplicated graph of internal packages from the decoded records
//! of the package-listing tool, restricted to packages owned by the
//! discovered modules.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;

use crate::{GraphData, GraphLink, GraphNode, ModuleInfo, NodePosition};

/// One decoded record from the package-listing tool: a package and its
/// direct imports. Field names match the tool's JSON output; unknown fields
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportRecord {
    #[serde(rename = "ImportPath")]
    pub import_path: String,
    #[serde(rename = "Imports", default)]
    pub imports: Vec<String>,
}

/// Package-level dependency graph for a set of discovered modules.
///
/// Nodes are deduplicated by import path (first occurrence wins) and edges
/// by ordered `(source, target)` pair, so feeding the same records through
/// repeatedly yields the same graph.
pub struct PackageGraph {
    graph: DiGraph<GraphNode, ()>,
    node_indices: HashMap<String, NodeIndex>,
    modules: Vec<ModuleInfo>,
}

/// First module in list order whose declared path is a string prefix of the
/// import path. The test is a literal prefix, not segment-aware: a module
/// `"foo"` also claims `"foobar"`. Both behaviors are kept as-is; see the
/// attribution notes in DESIGN.md before changing either.
fn owning_module<'a>(modules: &'a [ModuleInfo], import_path: &str) -> Option<&'a str> {
    modules
        .iter()
        .find(|m| import_path.starts_with(m.module_path.as_str()))
        .map(|m| m.module_path.as_str())
}

impl PackageGraph {
    /// Build the graph from discovered modules and decoded package records.
    ///
    /// First pass creates one node per distinct internal import path,
    /// attributed to its owning module. Second pass adds one edge per
    /// ordered pair where both endpoints exist as nodes; imports of external
    /// packages (or of internal packages whose module could not be listed)
    /// are dropped rather than left dangling.
    pub fn build(modules: Vec<ModuleInfo>, records: &[ImportRecord]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices: HashMap<String, NodeIndex> = HashMap::new();

        for record in records {
            let Some(owner) = owning_module(&modules, &record.import_path) else {
                continue;
            };

            if !node_indices.contains_key(&record.import_path) {
                let idx = graph.add_node(GraphNode {
                    id: record.import_path.clone(),
                    module: owner.to_string(),
                });
                node_indices.insert(record.import_path.clone(), idx);
            }
        }

        for record in records {
            let Some(&source) = node_indices.get(&record.import_path) else {
                continue;
            };

            for target in &record.imports {
                if let Some(&target_idx) = node_indices.get(target) {
                    graph.update_edge(source, target_idx, ());
                }
            }
        }

        Self {
            graph,
            node_indices,
            modules,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, import_path: &str) -> bool {
        self.node_indices.contains_key(import_path)
    }

    /// Owning module of a package already in the graph.
    pub fn module_of(&self, import_path: &str) -> Option<&str> {
        self.node_indices
            .get(import_path)
            .map(|&idx| self.graph[idx].module.as_str())
    }

    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    /// Convert into the serializable bundle, nodes and links in insertion
    /// order. An empty position map is dropped so the field stays out of the
    /// JSON payload.
    pub fn into_graph_data(
        self,
        saved_positions: std::collections::BTreeMap<String, NodePosition>,
    ) -> GraphData {
        let nodes: Vec<GraphNode> = self.graph.node_weights().cloned().collect();

        let links: Vec<GraphLink> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(from, to)| GraphLink {
                source: self.graph[from].id.clone(),
                target: self.graph[to].id.clone(),
            })
            .collect();

        GraphData {
            nodes,
            links,
            modules: self.modules,
            saved_positions: if saved_positions.is_empty() {
                None
            } else {
                Some(saved_positions)
            },
        }
    }
}
