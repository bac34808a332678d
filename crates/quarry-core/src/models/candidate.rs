use serde::{Deserialize, Serialize};

/// Opaque key/value metadata carried through retrieval unchanged.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One hit as returned by a dense or sparse search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub score: f64,
}

impl SearchHit {
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Metadata::new(),
            score,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// One retrieved unit after fusion, annotated with provenance.
///
/// `id` is unique within a fused list. The rerank fields are only set when a
/// reranking backend actually scored the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub dense_score: f64,
    #[serde(default)]
    pub sparse_score: f64,
    pub fused_score: f64,
    pub rerank_score: Option<f64>,
    /// 1-based position after fusion.
    pub original_rank: usize,
    /// 1-based position after reranking.
    pub rerank_rank: Option<usize>,
}

impl Candidate {
    /// Seed a candidate from a dense hit. Fused fields are filled in by fusion.
    pub fn from_dense(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            content: hit.content,
            metadata: hit.metadata,
            dense_score: hit.score,
            sparse_score: 0.0,
            fused_score: 0.0,
            rerank_score: None,
            original_rank: 0,
            rerank_rank: None,
        }
    }

    /// Seed a candidate from a sparse hit.
    pub fn from_sparse(hit: SearchHit) -> Self {
        Self {
            dense_score: 0.0,
            sparse_score: hit.score,
            ..Self::from_dense(hit)
        }
    }

    /// The score a consumer should display: rerank score when present, else fused.
    pub fn effective_score(&self) -> f64 {
        self.rerank_score.unwrap_or(self.fused_score)
    }
}
