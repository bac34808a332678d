use quarry_core::errors::RerankError;
use quarry_core::models::{Candidate, Reranking};

use crate::outcome;
use crate::strategy::RerankerStrategy;

/// Identity reranking: the fused order expressed as `1/(rank+1)` scores.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughReranker;

impl RerankerStrategy for PassThroughReranker {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn score(&self, _query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError> {
        Ok((0..documents.len()).map(outcome::positional_score).collect())
    }

    fn rerank(&self, _query: &str, candidates: &[Candidate], top_k: usize) -> Reranking {
        outcome::passthrough(candidates, top_k)
    }
}
