//! Selection and edge-visibility state for the interactive view.
//!
//! The engine owns the selected-node set and the three display filters, and
//! turns them into a [`RenderSet`]: a highlight class per node plus the
//! ordered list of edges to draw. Rendering never mutates state, so the
//! same engine state always produces the same picture.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::hierarchy::{AdjacencyIndex, HierarchyNode};

/// The three user-facing display filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Draw edges from selected nodes to their imports.
    Outgoing,
    /// Draw edges from importers into selected nodes.
    Incoming,
    /// Restrict selection edges to pairs in different modules.
    CrossModuleOnly,
}

/// Highlight class attached to each node when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub enum HighlightClass {
    None,
    Selected,
    /// Imported by a selected node (a dependency of the selection).
    Importing,
    /// Imports a selected node (a dependent of the selection).
    Imported,
}

/// Style class attached to each drawn edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub enum EdgeStyle {
    /// Plain edge while nothing is selected.
    All,
    Outgoing,
    Incoming,
    /// Context edge not touching the selection.
    Background,
}

/// One edge the frontend should draw, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct DrawnEdge {
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
}

/// Everything the frontend needs to repaint after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS), ts(export))]
pub struct RenderSet {
    pub highlight: HashMap<String, HighlightClass>,
    pub edges: Vec<DrawnEdge>,
}

/// Selection state plus display filters over one adjacency index.
#[derive(Debug, Clone)]
pub struct VisibilityEngine {
    index: AdjacencyIndex,
    selected: Vec<String>,
    show_outgoing: bool,
    show_incoming: bool,
    cross_module_only: bool,
}

impl VisibilityEngine {
    pub fn new(index: AdjacencyIndex) -> Self {
        Self {
            index,
            selected: Vec::new(),
            show_outgoing: true,
            show_incoming: true,
            cross_module_only: false,
        }
    }

    pub fn from_hierarchy(root: &HierarchyNode) -> Self {
        Self::new(AdjacencyIndex::from_hierarchy(root))
    }

    /// Toggle a node in or out of the selection.
    ///
    /// Without `additive` the selection is cleared first and then membership
    /// is flipped, so a plain click always leaves exactly the clicked node
    /// selected, including a plain click on the sole selected node.
    pub fn toggle(&mut self, node_id: &str, additive: bool) {
        if !additive {
            self.selected.clear();
        }
        if let Some(pos) = self.selected.iter().position(|s| s == node_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(node_id.to_string());
        }
    }

    pub fn set_filter(&mut self, filter: Filter, enabled: bool) {
        match filter {
            Filter::Outgoing => self.show_outgoing = enabled,
            Filter::Incoming => self.show_incoming = enabled,
            Filter::CrossModuleOnly => self.cross_module_only = enabled,
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids in the order they were selected.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, node_id: &str) -> bool {
        self.selected.iter().any(|s| s == node_id)
    }

    fn crosses_modules(&self, source: &str, target: &str) -> bool {
        self.index.module_of(source) != self.index.module_of(target)
    }

    /// Compute the picture for the current state.
    ///
    /// With an empty selection every edge is drawn with [`EdgeStyle::All`],
    /// subject only to the cross-module filter. Otherwise each selected
    /// node contributes its outgoing and incoming edges per the direction
    /// filters, neighbor nodes are classed from the edges actually drawn
    /// (dependents win over dependencies when a node is both), and every
    /// edge not touching the selection is emitted as background context.
    /// The cross-module filter never applies to background edges.
    pub fn render(&self) -> RenderSet {
        let mut highlight: HashMap<String, HighlightClass> = self
            .index
            .ids()
            .iter()
            .map(|id| (id.clone(), HighlightClass::None))
            .collect();
        let mut edges = Vec::new();

        if self.selected.is_empty() {
            for id in self.index.ids() {
                for target in self.index.imports_of(id) {
                    if self.cross_module_only && !self.crosses_modules(id, target) {
                        continue;
                    }
                    edges.push(DrawnEdge {
                        source: id.clone(),
                        target: target.clone(),
                        style: EdgeStyle::All,
                    });
                }
            }
            return RenderSet { highlight, edges };
        }

        let selected_set: HashSet<&str> = self.selected.iter().map(String::as_str).collect();

        for id in &self.selected {
            if self.show_outgoing {
                for target in self.index.imports_of(id) {
                    if self.cross_module_only && !self.crosses_modules(id, target) {
                        continue;
                    }
                    edges.push(DrawnEdge {
                        source: id.clone(),
                        target: target.clone(),
                        style: EdgeStyle::Outgoing,
                    });
                    if !selected_set.contains(target.as_str()) {
                        let class = highlight
                            .entry(target.clone())
                            .or_insert(HighlightClass::None);
                        if *class != HighlightClass::Imported {
                            *class = HighlightClass::Importing;
                        }
                    }
                }
            }
            if self.show_incoming {
                for source in self.index.imported_by_of(id) {
                    if self.cross_module_only && !self.crosses_modules(source, id) {
                        continue;
                    }
                    edges.push(DrawnEdge {
                        source: source.clone(),
                        target: id.clone(),
                        style: EdgeStyle::Incoming,
                    });
                    if !selected_set.contains(source.as_str()) {
                        highlight.insert(source.clone(), HighlightClass::Imported);
                    }
                }
            }
        }

        for id in self.index.ids() {
            if selected_set.contains(id.as_str()) {
                continue;
            }
            for target in self.index.imports_of(id) {
                if selected_set.contains(target.as_str()) {
                    continue;
                }
                edges.push(DrawnEdge {
                    source: id.clone(),
                    target: target.clone(),
                    style: EdgeStyle::Background,
                });
            }
        }

        for id in &self.selected {
            highlight.insert(id.clone(), HighlightClass::Selected);
        }

        RenderSet { highlight, edges }
    }
}
