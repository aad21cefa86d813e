//! End-to-end analysis pipeline.
//!
//! Orchestrates discovery, per-module package listing, graph assembly, the
//! position cache, and a hierarchy consistency check on the finished bundle.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use depview_graph::{GraphData, HierarchyError, NodePosition, PackageGraph, hierarchy};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{self, ConfigError, DEFAULT_OUTPUT, DEFAULT_POSITIONS};
use crate::discover::{self, DiscoverError};
use crate::golist::PackageLister;

/// Fatal pipeline errors. Per-module listing failures are not here: those
/// degrade to warnings and the affected module's packages are dropped.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read positions file {0}: {1}")]
    PositionsRead(PathBuf, io::Error),

    #[error("Failed to parse positions file {0}: {1}")]
    PositionsParse(PathBuf, serde_json::Error),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("Failed to write output file {0}: {1}")]
    WriteOutput(PathBuf, io::Error),
}

/// Flag-level inputs layered over `depview.toml`.
#[derive(Debug, Default)]
pub struct Overrides {
    pub ignore: Vec<String>,
    pub output: Option<String>,
    pub positions: Option<String>,
}

/// Effective settings after merging the config file with flag overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Path prefixes to prune during discovery.
    pub ignore: Vec<String>,
    /// Where the rendered page goes, resolved against the root.
    pub output: PathBuf,
    /// Position cache location, resolved against the root.
    pub positions: PathBuf,
}

/// Merge `depview.toml` from `root` with the command-line overrides.
///
/// Ignore entries are unioned; output and positions fall back from flag to
/// config to default. Relative paths resolve against the root.
pub fn resolve(root: &Path, overrides: &Overrides) -> Result<Settings, AnalyzeError> {
    let config = config::load(root)?;

    let mut ignore = config.ignore;
    ignore.extend(overrides.ignore.iter().cloned());

    let output = overrides
        .output
        .clone()
        .or(config.output)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let positions = overrides
        .positions
        .clone()
        .or(config.positions)
        .unwrap_or_else(|| DEFAULT_POSITIONS.to_string());

    Ok(Settings {
        ignore,
        output: root.join(output),
        positions: root.join(positions),
    })
}

/// Run the full analysis for `root` and return the output bundle.
pub fn analyze(
    root: &Path,
    settings: &Settings,
    lister: &dyn PackageLister,
) -> Result<GraphData, AnalyzeError> {
    let modules = discover::find_modules(root, &settings.ignore)?;
    info!(count = modules.len(), "discovered modules");

    let mut records = Vec::new();
    for module in &modules {
        info!("processing module in directory: {}", module.dir.display());
        match lister.list_packages(&module.dir) {
            Ok(mut listed) => records.append(&mut listed),
            Err(err) => {
                warn!("failed to list packages in {}: {err}", module.dir.display());
            }
        }
    }

    let graph = PackageGraph::build(modules, &records);
    info!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        "built dependency graph"
    );

    let saved_positions = load_saved_positions(&settings.positions)?;
    let data = graph.into_graph_data(saved_positions);

    // Projecting here validates that every link endpoint resolves before the
    // bundle is handed to any consumer.
    hierarchy::project(&data)?;

    Ok(data)
}

/// Read the node position cache. A missing file is an empty cache; an
/// unreadable or malformed one fails the run rather than silently
/// discarding saved layout.
pub fn load_saved_positions(
    path: &Path,
) -> Result<BTreeMap<String, NodePosition>, AnalyzeError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => return Err(AnalyzeError::PositionsRead(path.to_path_buf(), err)),
    };

    serde_json::from_slice(&bytes)
        .map_err(|err| AnalyzeError::PositionsParse(path.to_path_buf(), err))
}
