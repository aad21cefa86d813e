//! Pipeline integration tests: fixture workspace, stubbed lister.

use std::path::{Path, PathBuf};

use depview_cli::analyze::{self, AnalyzeError, Overrides};
use depview_cli::golist::{ListError, PackageLister};
use depview_graph::ImportRecord;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_workspace")
}

fn positions_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("positions")
        .join(name)
}

fn record(import_path: &str, imports: &[&str]) -> ImportRecord {
    ImportRecord {
        import_path: import_path.to_string(),
        imports: imports.iter().map(|s| s.to_string()).collect(),
    }
}

/// Answers per module directory; listing the api module fails, the root
/// module imports a package of the failed module.
struct StubLister;

impl PackageLister for StubLister {
    fn list_packages(&self, dir: &Path) -> Result<Vec<ImportRecord>, ListError> {
        if dir.ends_with("services/api") {
            return Err(ListError::Failed {
                dir: dir.to_path_buf(),
                stderr: "go: updates to go.sum needed".to_string(),
            });
        }
        if dir.ends_with("tools") || dir.ends_with("vendor/dep") {
            return Ok(vec![]);
        }
        Ok(vec![
            record(
                "example.com/root/cmd",
                &[
                    "example.com/root/internal/util",
                    "example.com/api/client",
                    "fmt",
                ],
            ),
            record("example.com/root/internal/util", &["strings"]),
        ])
    }
}

#[test]
fn test_pipeline_skips_failed_module_and_keeps_the_rest() {
    let root = fixture_path();
    let overrides = Overrides {
        ignore: vec!["vendor".to_string()],
        ..Overrides::default()
    };
    let settings = analyze::resolve(&root, &overrides).expect("resolve failed");

    let data = analyze::analyze(&root, &settings, &StubLister).expect("analysis failed");

    let node_ids: Vec<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        node_ids,
        vec!["example.com/root/cmd", "example.com/root/internal/util"]
    );
    assert!(data.nodes.iter().all(|n| n.module == "example.com/root"));

    // The import into the failed module's package has no node on the other
    // end, so no edge survives for it; the external imports are dropped too.
    assert_eq!(data.links.len(), 1);
    assert_eq!(data.links[0].source, "example.com/root/cmd");
    assert_eq!(data.links[0].target, "example.com/root/internal/util");

    let module_paths: Vec<&str> = data.modules.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(module_paths, vec![".", "services/api", "tools"]);

    // No cache file in the fixture, so the bundle omits positions.
    assert!(data.saved_positions.is_none());
}

#[test]
fn test_positions_cache_round_trip_into_bundle() {
    let positions = analyze::load_saved_positions(&positions_fixture("layout.json"))
        .expect("failed to load positions");

    assert_eq!(positions.len(), 2);
    let cmd = &positions["example.com/root/cmd"];
    assert_eq!(cmd.x, 120.5);
    assert_eq!(cmd.y, -40.25);
}

#[test]
fn test_malformed_positions_file_fails() {
    let err = analyze::load_saved_positions(&positions_fixture("malformed.json")).unwrap_err();
    assert!(matches!(err, AnalyzeError::PositionsParse(..)));
}

#[test]
fn test_config_file_merges_with_flag_overrides() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("config_workspace");
    let overrides = Overrides {
        ignore: vec!["tools".to_string()],
        positions: Some("layout.json".to_string()),
        ..Overrides::default()
    };

    let settings = analyze::resolve(&root, &overrides).expect("resolve failed");

    assert_eq!(settings.ignore, vec!["vendor", "tools"]);
    assert_eq!(settings.output, root.join("out.html"));
    assert_eq!(settings.positions, root.join("layout.json"));
}
