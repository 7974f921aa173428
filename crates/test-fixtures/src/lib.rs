//! Golden scenario loader for the adjacency search.
//!
//! Fixtures are JSON files under `golden/`. Each one describes an oracle as a
//! list of independence facts, optional background knowledge and seed graph,
//! and the skeleton and separating sets the search must produce.

use std::path::PathBuf;

use fas_core::config::KnowledgeConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Walk up from whichever crate is running the test.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
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

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Load a scenario from an absolute path, as returned by [`list_fixtures`].
pub fn load_scenario_at(path: &std::path::Path) -> FasScenario {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

// ---------------------------------------------------------------------------
// Scenario schema
// ---------------------------------------------------------------------------

/// One golden search scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FasScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub oracle: OracleFixture,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    /// Undirected seed edges. `None` searches all pairs.
    #[serde(default)]
    pub seed_edges: Option<Vec<(String, String)>>,
    #[serde(default = "unbounded_depth")]
    pub depth: i64,
    pub expected: ExpectedSkeleton,
}

/// Oracle as a list of asserted independencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleFixture {
    pub variables: Vec<String>,
    #[serde(default)]
    pub independencies: Vec<FactFixture>,
    #[serde(default)]
    pub unevaluable: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactFixture {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub given: Vec<String>,
}

/// What the search must return.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedSkeleton {
    /// Complete list of surviving undirected edges.
    pub edges: Vec<(String, String)>,
    /// Pairs that must carry exactly this separating set.
    #[serde(default)]
    pub sepsets: Vec<FactFixture>,
    /// Non-adjacent pairs that must have no separating set.
    #[serde(default)]
    pub no_sepset: Vec<(String, String)>,
    /// Adjacent pairs the oracle would separate but knowledge keeps,
    /// so no separating set may be recorded.
    #[serde(default)]
    pub adjacent_without_sepset: Vec<(String, String)>,
    /// Expected failed-test count, when the scenario pins it.
    #[serde(default)]
    pub failed_tests: Option<usize>,
}

fn unbounded_depth() -> i64 {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_golden_fas_files_exist() {
        let files = [
            "golden/fas/all_independent.json",
            "golden/fas/chain.json",
            "golden/fas/chain_required.json",
            "golden/fas/failing_oracle.json",
            "golden/fas/collider.json",
            "golden/fas/seeded.json",
            "golden/fas/forbidden.json",
            "golden/fas/tiered.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn every_fas_fixture_parses() {
        let files = list_fixtures("golden/fas");
        assert!(!files.is_empty());
        for path in files {
            let scenario = load_scenario_at(&path);
            assert!(!scenario.name.is_empty(), "{} has no name", path.display());
            assert!(!scenario.oracle.variables.is_empty());
        }
    }

    #[test]
    fn pair_lists_agree_with_edges() {
        let same = |a: &(String, String), b: &(String, String)| {
            (a.0 == b.0 && a.1 == b.1) || (a.0 == b.1 && a.1 == b.0)
        };
        for path in list_fixtures("golden/fas") {
            let scenario = load_scenario_at(&path);
            let expected = &scenario.expected;
            for pair in &expected.no_sepset {
                assert!(
                    !expected.edges.iter().any(|e| same(e, pair)),
                    "{}: {pair:?} is listed as an edge and under no_sepset",
                    scenario.name
                );
            }
            for pair in &expected.adjacent_without_sepset {
                assert!(
                    expected.edges.iter().any(|e| same(e, pair)),
                    "{}: {pair:?} under adjacent_without_sepset is not an edge",
                    scenario.name
                );
            }
        }
    }

    #[test]
    fn raw_value_loads() {
        let value = load_fixture_value("golden/fas/chain.json");
        assert_eq!(value["name"], "chain");
    }

    #[test]
    fn missing_fixture_is_reported() {
        assert!(!fixture_exists("golden/fas/does_not_exist.json"));
        assert!(list_fixtures("golden/nowhere").is_empty());
    }
}
