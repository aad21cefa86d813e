//! Module discovery: find every `go.mod`-bearing directory under a root.

use std::fs;
use std::path::{Path, PathBuf};

use depview_graph::ModuleInfo;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Fixed palette cycled over modules in discovery order.
pub const MODULE_COLORS: [&str; 6] = [
    "#3498db", // blue
    "#9b59b6", // purple
    "#f1c40f", // yellow
    "#e67e22", // orange
    "#1abc9c", // turquoise
    "#34495e", // dark blue
];

/// Errors that can occur during module discovery
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Invalid workspace root: {0}")]
    InvalidRoot(PathBuf),

    #[error("Failed to walk workspace: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read manifest {0}: {1}")]
    ManifestRead(PathBuf, std::io::Error),
}

/// Walk `root` and collect every directory containing a `go.mod` manifest.
///
/// Subtrees whose root-relative path starts with an ignore entry are pruned
/// whole, manifests included. Entries are visited sorted by file name so
/// discovery order, and with it color assignment, is stable across runs.
pub fn find_modules(root: &Path, ignore: &[String]) -> Result<Vec<ModuleInfo>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::InvalidRoot(root.to_path_buf()));
    }

    let mut modules = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry.path(), root, ignore));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name() != "go.mod" {
            continue;
        }

        let dir = match entry.path().parent() {
            Some(parent) => parent.to_path_buf(),
            None => continue,
        };

        let rel = match dir.strip_prefix(root) {
            Ok(stripped) if stripped.as_os_str().is_empty() => PathBuf::from("."),
            Ok(stripped) => stripped.to_path_buf(),
            Err(_) => dir.clone(),
        };
        let path = slash_path(&rel);
        let name = rel
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(".")
            .to_string();

        let content = fs::read_to_string(entry.path())
            .map_err(|e| DiscoverError::ManifestRead(entry.path().to_path_buf(), e))?;
        let module_path = parse_module_path(&content).unwrap_or_else(|| name.clone());

        let color = MODULE_COLORS[modules.len() % MODULE_COLORS.len()].to_string();

        debug!(path = %path, module = %module_path, "discovered module");

        modules.push(ModuleInfo {
            path,
            dir,
            name,
            color,
            module_path,
        });
    }

    Ok(modules)
}

/// Extract the declared module path from manifest content: the first line of
/// the form `module <value>`, whitespace-trimmed. An empty value counts as
/// undeclared.
fn parse_module_path(content: &str) -> Option<String> {
    for line in content.lines() {
        if let Some(rest) = line.trim().strip_prefix("module ") {
            let value = rest.trim();
            if value.is_empty() {
                return None;
            }
            return Some(value.to_string());
        }
    }
    None
}

/// True when `path`, made relative to `root` and slash-normalized, starts
/// with any ignore entry.
fn is_ignored(path: &Path, root: &Path, ignore: &[String]) -> bool {
    if ignore.is_empty() {
        return false;
    }
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    if rel.as_os_str().is_empty() {
        return false;
    }
    let rel = slash_path(rel);
    ignore.iter().any(|prefix| rel.starts_with(prefix.as_str()))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}
