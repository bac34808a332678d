use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Weight of the dense score in fusion; the sparse score gets `1 - vector_weight`.
    pub vector_weight: f64,
    /// Number of candidates kept when the caller does not specify one.
    pub default_top_k: usize,
    /// Each source is asked for `top_k * fusion_multiplier` hits, and fusion keeps as many.
    pub fusion_multiplier: usize,
    /// Whether requests rerank by default.
    pub use_rerank: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            default_top_k: defaults::DEFAULT_TOP_K,
            fusion_multiplier: defaults::DEFAULT_FUSION_MULTIPLIER,
            use_rerank: defaults::DEFAULT_USE_RERANK,
        }
    }
}
