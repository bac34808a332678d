//! Test fixtures for Quarry: golden datasets, an in-memory search index, and
//! scripted collaborators for driving the pipeline in tests and benchmarks.

pub mod index;
pub mod llm;
pub mod search;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use index::{HashingEmbedder, InMemoryIndex};
pub use llm::{FailingLanguageModel, ScriptedLanguageModel};
pub use search::{FailingSearch, StaticSearch};

/// Root directory of the golden fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
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

/// The annual-report corpus used by end-to-end tests.
pub fn load_corpus() -> Vec<quarry_core::models::Document> {
    load_fixture("corpus.json")
}

/// Golden model replies with the stage and answer the parser must produce.
pub fn load_golden_replies() -> Vec<GoldenReply> {
    load_fixture("replies.json")
}

/// One golden parser case.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoldenReply {
    pub name: String,
    pub reply: String,
    pub expected_stage: quarry_core::models::ParseStage,
    pub expected_final_answer: serde_json::Value,
    #[serde(default)]
    pub expected_pages: Option<Vec<u32>>,
}
