//! Folder/package hierarchy projection.
//!
//! Splits every package id on `/` and folds the flat graph into a tree of
//! folders and packages for the collapsible frontend layout. Dependency
//! links stay an arbitrary graph layered on top of the tree: each node
//! carries its own imports / imported-by lists after projection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::GraphData;

/// Errors raised while projecting the hierarchy.
// Display/Error are hand-written: thiserror's derive treats any field named
// `source` as the error source, which a plain `String` cannot be.
#[derive(Debug)]
pub enum HierarchyError {
    /// A link references an id with no node in the tree. The builder always
    /// inserts both endpoints, so this signals a malformed bundle rather
    /// than bad input data.
    MissingEndpoint {
        source: String,
        target: String,
        endpoint: String,
    },
}

impl std::fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HierarchyError::MissingEndpoint {
                source,
                target,
                endpoint,
            } => write!(f, "link {source} -> {target} references unknown node {endpoint}"),
        }
    }
}

impl std::error::Error for HierarchyError {}

/// One entry in the folder/package tree. Exactly one node exists per
/// distinct path prefix; `is_package` marks prefixes that are real packages
/// rather than synthetic folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct HierarchyNode {
    pub id: String,
    pub name: String,
    pub module: String,
    pub is_package: bool,
    pub children: Vec<HierarchyNode>,
    pub imports: Vec<String>,
    pub imported_by: Vec<String>,
}

impl HierarchyNode {
    fn new(id: String, name: String, module: String, is_package: bool) -> Self {
        Self {
            id,
            name,
            module,
            is_package,
            children: Vec::new(),
            imports: Vec::new(),
            imported_by: Vec::new(),
        }
    }

    /// The empty-path sentinel every projection is rooted at.
    fn root() -> Self {
        Self::new(String::new(), "root".to_string(), String::new(), false)
    }
}

/// Project the flat bundle into a folder/package tree.
///
/// Walking a package id creates one node per path prefix. A prefix that is
/// itself a package id becomes that package's node (with its own module);
/// any other prefix becomes a folder inheriting the module of the package
/// whose insertion created it. Re-walking an existing prefix reuses the
/// node, so projection is idempotent with respect to duplicate inserts.
///
/// A second pass attaches the links; a link endpoint with no node fails the
/// projection.
pub fn project(data: &GraphData) -> Result<HierarchyNode, HierarchyError> {
    let packages: HashMap<&str, &str> = data
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.module.as_str()))
        .collect();

    let mut root = HierarchyNode::root();

    for node in &data.nodes {
        insert_path(&mut root, &node.id, &node.module, &packages);
    }

    for link in &data.links {
        let source = find_mut(&mut root, &link.source).ok_or_else(|| {
            HierarchyError::MissingEndpoint {
                source: link.source.clone(),
                target: link.target.clone(),
                endpoint: link.source.clone(),
            }
        })?;
        source.imports.push(link.target.clone());

        let target = find_mut(&mut root, &link.target).ok_or_else(|| {
            HierarchyError::MissingEndpoint {
                source: link.source.clone(),
                target: link.target.clone(),
                endpoint: link.target.clone(),
            }
        })?;
        target.imported_by.push(link.source.clone());
    }

    Ok(root)
}

fn insert_path(
    root: &mut HierarchyNode,
    id: &str,
    inserting_module: &str,
    packages: &HashMap<&str, &str>,
) {
    let mut node = root;
    let mut current = String::new();

    for part in id.split('/') {
        if part.is_empty() {
            continue;
        }

        if current.is_empty() {
            current.push_str(part);
        } else {
            current = format!("{current}/{part}");
        }

        let idx = match node.children.iter().position(|c| c.id == current) {
            Some(existing) => existing,
            None => {
                let (is_package, module) = match packages.get(current.as_str()) {
                    Some(own) => (true, (*own).to_string()),
                    None => (false, inserting_module.to_string()),
                };
                node.children.push(HierarchyNode::new(
                    current.clone(),
                    part.to_string(),
                    module,
                    is_package,
                ));
                node.children.len() - 1
            }
        };

        node = &mut node.children[idx];
    }
}

fn find_mut<'a>(mut node: &'a mut HierarchyNode, id: &str) -> Option<&'a mut HierarchyNode> {
    for part in id.split('/') {
        if part.is_empty() {
            continue;
        }
        let idx = node.children.iter().position(|c| c.name == part)?;
        node = &mut node.children[idx];
    }
    Some(node)
}

/// Flattened read model of a hierarchy: per-id module and adjacency lists
/// plus a stable depth-first id order. This is what the visibility engine
/// consumes; the tree itself stays with the layout.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    ids: Vec<String>,
    modules: HashMap<String, String>,
    imports: HashMap<String, Vec<String>>,
    imported_by: HashMap<String, Vec<String>>,
}

impl AdjacencyIndex {
    pub fn from_hierarchy(root: &HierarchyNode) -> Self {
        let mut index = AdjacencyIndex::default();
        index.collect(root);
        index
    }

    fn collect(&mut self, node: &HierarchyNode) {
        self.ids.push(node.id.clone());
        self.modules.insert(node.id.clone(), node.module.clone());
        self.imports.insert(node.id.clone(), node.imports.clone());
        self.imported_by
            .insert(node.id.clone(), node.imported_by.clone());

        for child in &node.children {
            self.collect(child);
        }
    }

    /// All ids in depth-first preorder, the root sentinel first.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// Module of a node, or the empty string for unknown ids and the root.
    pub fn module_of(&self, id: &str) -> &str {
        self.modules.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn imports_of(&self, id: &str) -> &[String] {
        self.imports.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn imported_by_of(&self, id: &str) -> &[String] {
        self.imported_by.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
