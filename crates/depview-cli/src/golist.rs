//! Package listing through the Go toolchain.

use std::path::{Path, PathBuf};
use std::process::Command;

use depview_graph::ImportRecord;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from listing one module's packages. Callers treat these as
/// per-module failures: warn and move on.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("Failed to run `go list` in {dir}: {source}")]
    Spawn {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`go list` failed in {dir}: {stderr}")]
    Failed { dir: PathBuf, stderr: String },
}

/// Source of package import records for one module directory.
///
/// Abstracted so the pipeline can be driven by a stub in tests instead of a
/// real toolchain.
pub trait PackageLister {
    fn list_packages(&self, dir: &Path) -> Result<Vec<ImportRecord>, ListError>;
}

/// Production lister shelling out to `go list -json ./...`.
///
/// The module directory is passed as the child's working directory; the
/// parent process never changes its own.
pub struct GoList;

impl PackageLister for GoList {
    fn list_packages(&self, dir: &Path) -> Result<Vec<ImportRecord>, ListError> {
        let output = Command::new("go")
            .args(["list", "-json", "./..."])
            .current_dir(dir)
            .output()
            .map_err(|source| ListError::Spawn {
                dir: dir.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(ListError::Failed {
                dir: dir.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(decode_records(&output.stdout))
    }
}

/// Decode a concatenation of JSON package objects, as `go list -json` emits
/// them.
///
/// A record that parses as JSON but fails to take the expected shape is
/// skipped with a warning and decoding continues. A syntax error ends the
/// stream, keeping everything decoded before it.
pub fn decode_records(bytes: &[u8]) -> Vec<ImportRecord> {
    let mut records = Vec::new();

    for value in serde_json::Deserializer::from_slice(bytes).into_iter::<serde_json::Value>() {
        let value = match value {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to decode package stream: {err}");
                break;
            }
        };
        match serde_json::from_value::<ImportRecord>(value) {
            Ok(record) => records.push(record),
            Err(err) => warn!("failed to decode package: {err}"),
        }
    }

    debug!(count = records.len(), "decoded package records");
    records
}
