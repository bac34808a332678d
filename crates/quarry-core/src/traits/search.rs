use crate::errors::QuarryResult;
use crate::models::SearchHit;

/// Turns text into a query vector for dense search.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> QuarryResult<Vec<f32>>;
}

/// Similarity search over embedding vectors.
pub trait DenseSearch: Send + Sync {
    /// Up to `k` hits ordered by descending score.
    fn dense_search(&self, query_vector: &[f32], k: usize) -> QuarryResult<Vec<SearchHit>>;
}

/// Keyword search over the same collection.
pub trait SparseSearch: Send + Sync {
    /// Up to `k` hits ordered by descending score.
    fn sparse_search(&self, query: &str, k: usize) -> QuarryResult<Vec<SearchHit>>;
}
