//! Test fixture loader for sysdecomp system scenarios.
//!
//! Fixtures live under `test-fixtures/` at the workspace root. Each system
//! fixture holds a transition matrix as nested rows, the binary distribution
//! string, and the distance a correct search should report.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A transition system scenario from `test-fixtures/systems/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub matrix: Vec<Vec<f64>>,
    pub binary_distribution: String,
    pub expected_distance: Option<f64>,
}

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    // Walk up from any crate to the workspace root.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").join("systems").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/systems from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load `systems/<name>.json`.
pub fn load_system(name: &str) -> SystemFixture {
    load_fixture(&format!("systems/{name}.json"))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Names of every system fixture, sorted.
pub fn list_systems() -> Vec<String> {
    let dir = fixtures_root().join("systems");
    let mut names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path.file_stem()?.to_string_lossy().into_owned())
            } else {
                None
            }
        })
        .collect();
    names.sort();
    names
}
