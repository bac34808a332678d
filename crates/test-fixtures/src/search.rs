//! Fixed and failing search collaborators.

use quarry_core::errors::{QuarryResult, RetrievalError};
use quarry_core::models::SearchHit;
use quarry_core::traits::{DenseSearch, Embedder, SparseSearch};

/// Returns the same hits for every query, truncated to `k`.
#[derive(Debug, Clone, Default)]
pub struct StaticSearch {
    pub dense: Vec<SearchHit>,
    pub sparse: Vec<SearchHit>,
}

impl StaticSearch {
    pub fn new(dense: Vec<SearchHit>, sparse: Vec<SearchHit>) -> Self {
        Self { dense, sparse }
    }
}

impl Embedder for StaticSearch {
    fn embed(&self, _text: &str) -> QuarryResult<Vec<f32>> {
        Ok(vec![1.0])
    }
}

impl DenseSearch for StaticSearch {
    fn dense_search(&self, _query_vector: &[f32], k: usize) -> QuarryResult<Vec<SearchHit>> {
        Ok(self.dense.iter().take(k).cloned().collect())
    }
}

impl SparseSearch for StaticSearch {
    fn sparse_search(&self, _query: &str, k: usize) -> QuarryResult<Vec<SearchHit>> {
        Ok(self.sparse.iter().take(k).cloned().collect())
    }
}

/// Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSearch;

impl Embedder for FailingSearch {
    fn embed(&self, _text: &str) -> QuarryResult<Vec<f32>> {
        Err(RetrievalError::EmbeddingFailed {
            reason: "embedding service unreachable".into(),
        }
        .into())
    }
}

impl DenseSearch for FailingSearch {
    fn dense_search(&self, _query_vector: &[f32], _k: usize) -> QuarryResult<Vec<SearchHit>> {
        Err(RetrievalError::DenseSearchFailed {
            reason: "vector index unreachable".into(),
        }
        .into())
    }
}

impl SparseSearch for FailingSearch {
    fn sparse_search(&self, _query: &str, _k: usize) -> QuarryResult<Vec<SearchHit>> {
        Err(RetrievalError::SparseSearchFailed {
            reason: "keyword index unreachable".into(),
        }
        .into())
    }
}
