//! Optional per-workspace configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File name looked up in the analyzed root.
pub const CONFIG_FILE: &str = "depview.toml";

/// Default output file name, relative to the analyzed root.
pub const DEFAULT_OUTPUT: &str = "dependency_graph.html";

/// Default position cache file name, relative to the analyzed root.
pub const DEFAULT_POSITIONS: &str = "node_positions.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

/// Settings from `depview.toml`. Every field is optional; command-line
/// flags extend `ignore` and override the rest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Path prefixes to prune, relative to the root.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Output file name for the rendered page.
    pub output: Option<String>,
    /// Position cache location.
    pub positions: Option<String>,
}

/// Load `depview.toml` from `root`. A missing file yields defaults; a
/// malformed one is fatal.
pub fn load(root: &Path) -> Result<Config, ConfigError> {
    let path = root.join(CONFIG_FILE);

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| ConfigError::Read(path.clone(), e))?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(path, e))
}
